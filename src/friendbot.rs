//! Test funding via Friendbot.
//!
//! Friendbot credits a fixed 10,000 XLM to a testnet address (creating the
//! account if needed). Its own idempotency and rate limits are
//! authoritative: a rejection is surfaced with the faucet's detail message,
//! never suppressed or retried.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaucetError {
    /// The faucet rejected the request and said why (e.g. already funded).
    #[error("{0}")]
    Rejected(String),

    /// Non-success status with no usable detail in the body.
    #[error("Friendbot request failed ({0})")]
    Status(u16),

    #[error("Friendbot unreachable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait FaucetService: Send + Sync {
    async fn fund(&self, address: &str) -> Result<(), FaucetError>;
}

pub struct FriendbotClient {
    client: reqwest::Client,
    base_url: String,
}

impl FriendbotClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FaucetService for FriendbotClient {
    async fn fund(&self, address: &str) -> Result<(), FaucetError> {
        log::info!("Requesting testnet XLM from Friendbot for {}", address);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("addr", address)])
            .send()
            .await
            .map_err(|e| FaucetError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => match body.get("detail").and_then(|d| d.as_str()) {
                Some(detail) => Err(FaucetError::Rejected(detail.to_string())),
                None => Err(FaucetError::Status(status.as_u16())),
            },
            Err(_) => Err(FaucetError::Status(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FaucetError::Rejected("account already funded".into()).to_string(),
            "account already funded"
        );
        assert_eq!(
            FaucetError::Status(400).to_string(),
            "Friendbot request failed (400)"
        );
    }
}
