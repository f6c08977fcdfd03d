use axum::{extract::State, Json};
use std::sync::Arc;

use super::types::{
    DisconnectResponse, FundingResponse, SendPaymentRequest, SendPaymentResponse, SessionResponse,
};
use crate::balance::AccountBalance;
use crate::error::WalletError;
use crate::payment::OperationStatus;
use crate::service::WalletService;
use crate::session::WalletSession;

pub async fn connect_handler(
    State(service): State<Arc<WalletService>>,
) -> Result<Json<SessionResponse>, WalletError> {
    let session = service.connect().await?;
    let display_address = session.display_address();

    Ok(Json(SessionResponse {
        address: session.address,
        message: format!("Wallet connected: {}", display_address),
        display_address,
    }))
}

pub async fn disconnect_handler(
    State(service): State<Arc<WalletService>>,
) -> Json<DisconnectResponse> {
    service.disconnect().await;
    Json(DisconnectResponse {
        status: "disconnected".to_string(),
    })
}

pub async fn get_session_handler(
    State(service): State<Arc<WalletService>>,
) -> Json<Option<WalletSession>> {
    Json(service.session().await)
}

pub async fn get_balance_handler(
    State(service): State<Arc<WalletService>>,
) -> Result<Json<AccountBalance>, WalletError> {
    let balance = service.fetch_balance().await?;
    Ok(Json(balance))
}

pub async fn fund_handler(
    State(service): State<Arc<WalletService>>,
) -> Result<Json<FundingResponse>, WalletError> {
    let balance = service.request_funding().await?;

    Ok(Json(FundingResponse {
        balance,
        message: "Account funded! 10,000 testnet XLM added to your wallet.".to_string(),
    }))
}

pub async fn send_payment_handler(
    State(service): State<Arc<WalletService>>,
    Json(req): Json<SendPaymentRequest>,
) -> Result<Json<SendPaymentResponse>, WalletError> {
    let receipt = service.send(&req.recipient, &req.amount).await?;

    Ok(Json(SendPaymentResponse {
        hash: receipt.hash,
        recipient: receipt.recipient,
        amount: receipt.amount,
        message: "Transaction successful!".to_string(),
    }))
}

pub async fn payment_status_handler(
    State(service): State<Arc<WalletService>>,
) -> Json<OperationStatus> {
    Json(service.status().await)
}

pub async fn health_check() -> &'static str {
    "OK"
}
