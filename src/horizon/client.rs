use async_trait::async_trait;
use reqwest::StatusCode;

use super::types::{AccountRecord, SubmitRejection, SubmitSuccess};
use super::{LedgerError, LedgerService};
use crate::stellar::SignedEnvelope;

pub struct HorizonClient {
    client: reqwest::Client,
    base_url: String,
}

impl HorizonClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LedgerService for HorizonClient {
    async fn load_account(&self, address: &str) -> Result<AccountRecord, LedgerError> {
        let url = format!("{}/accounts/{}", self.base_url, address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound);
        }
        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "Horizon returned {}",
                response.status()
            )));
        }

        response
            .json::<AccountRecord>()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))
    }

    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmitSuccess, LedgerError> {
        let url = format!("{}/transactions", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("tx", envelope.as_str())])
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SubmitSuccess>()
                .await
                .map_err(|e| LedgerError::Transport(e.to_string()));
        }

        // Decode the problem document; fall back to the bare status when the
        // body is not the expected shape.
        let rejection = response
            .json::<SubmitRejection>()
            .await
            .unwrap_or_else(|_| SubmitRejection::from_status(status.as_u16()));

        log::debug!(
            "Horizon rejected submission ({}): {}",
            status,
            rejection.most_specific_reason()
        );

        Err(LedgerError::Rejected(rejection))
    }
}
