//! Horizon ledger service
//!
//! - Account queries (sequence number, balances)
//! - Signed transaction submission and rejection decoding

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::stellar::SignedEnvelope;

pub use client::HorizonClient;
pub use types::{AccountRecord, SubmitRejection, SubmitSuccess};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account not found")]
    NotFound,

    #[error("{}", .0.most_specific_reason())]
    Rejected(SubmitRejection),

    #[error("{0}")]
    Transport(String),
}

/// The ledger query/submission boundary. Production talks to Horizon over
/// HTTP; tests substitute an in-memory fake.
#[async_trait]
pub trait LedgerService: Send + Sync {
    async fn load_account(&self, address: &str) -> Result<AccountRecord, LedgerError>;

    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmitSuccess, LedgerError>;
}
