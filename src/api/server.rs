use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::service::WalletService;

pub fn create_router(service: Arc<WalletService>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session routes
        .route("/api/session/connect", post(handlers::connect_handler))
        .route(
            "/api/session/disconnect",
            post(handlers::disconnect_handler),
        )
        .route("/api/session", get(handlers::get_session_handler))
        // Balance & funding
        .route("/api/balance", get(handlers::get_balance_handler))
        .route("/api/fund", post(handlers::fund_handler))
        // Payment pipeline
        .route("/api/payment/send", post(handlers::send_payment_handler))
        .route(
            "/api/payment/status",
            get(handlers::payment_status_handler),
        )
        .with_state(service)
}

pub async fn start_server(addr: &str, service: Arc<WalletService>) -> anyhow::Result<()> {
    // Configure CORS based on environment.
    // Set ALLOWED_ORIGINS="https://your-app.example" for production;
    // if not set, any origin is allowed (development mode).
    let cors = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<_> = origins
                .split(',')
                .map(|s| s.trim().parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!(
                "CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS for production."
            );
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = create_router(service).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
