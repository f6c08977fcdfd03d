//! Closed failure taxonomy and stage-boundary classification.
//!
//! Every raw failure from a collaborator (Horizon, the signer bridge,
//! Friendbot) is classified here before it reaches a caller; no raw error
//! crosses the orchestrator boundary. Failures are per-operation and never
//! fatal to the process, so the session stays usable for the next attempt.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::friendbot::FaucetError;
use crate::horizon::LedgerError;
use crate::signer::SignerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet extension not found. Install a Freighter-compatible wallet and unlock it.")]
    WalletNotFound,

    #[error("Wallet authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("No wallet session is connected")]
    NotConnected,

    #[error("A payment is already in progress")]
    PipelineBusy,

    #[error("Invalid payment request: {0}")]
    ValidationFailed(String),

    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Transaction signing rejected: {0}")]
    SigningRejected(String),

    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("Funding failed: {0}")]
    FundingFailed(String),
}

/// Classify a failure while loading the payment source account.
///
/// A missing source account is a hard error here (the sender cannot pay from
/// an account that does not exist); contrast with the recipient, whose
/// existence is never checked client-side.
pub fn classify_account_load(address: &str, err: LedgerError) -> WalletError {
    match err {
        LedgerError::NotFound => WalletError::AccountNotFound(address.to_string()),
        LedgerError::Rejected(rejection) => {
            WalletError::LedgerUnavailable(rejection.most_specific_reason())
        }
        LedgerError::Transport(msg) => WalletError::LedgerUnavailable(msg),
    }
}

/// Classify a failure while submitting a signed envelope.
///
/// Rejections are decoded to the most specific reason Horizon provides:
/// the first operation result code, then the transaction result code, then
/// the problem-document detail.
pub fn classify_submission(err: LedgerError) -> WalletError {
    match err {
        LedgerError::Rejected(rejection) => {
            WalletError::SubmissionRejected(rejection.most_specific_reason())
        }
        LedgerError::NotFound => {
            WalletError::SubmissionRejected("transaction was not accepted".to_string())
        }
        LedgerError::Transport(msg) => WalletError::LedgerUnavailable(msg),
    }
}

/// Classify a signing failure. Refusal, signer error, and an empty or
/// malformed signed result all collapse to `SigningRejected`.
pub fn classify_signing(err: SignerError) -> WalletError {
    WalletError::SigningRejected(err.to_string())
}

/// Classify a faucet failure, preserving the faucet's own detail message
/// when it provided one.
pub fn classify_funding(err: FaucetError) -> WalletError {
    WalletError::FundingFailed(err.to_string())
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            WalletError::WalletNotFound => (StatusCode::FAILED_DEPENDENCY, self.to_string()),
            WalletError::AuthorizationDenied(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            WalletError::NotConnected => (StatusCode::UNAUTHORIZED, self.to_string()),
            WalletError::PipelineBusy => (StatusCode::CONFLICT, self.to_string()),
            WalletError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            WalletError::AccountNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            WalletError::LedgerUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            WalletError::SigningRejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            WalletError::SubmissionRejected(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            WalletError::FundingFailed(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
