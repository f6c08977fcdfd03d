//! External signing authority boundary.
//!
//! The signing authority is a user-controlled capability holding the private
//! keys: presence check, interactive access request, and envelope signing.
//! It is reached through the narrow `SigningProvider` trait so the pipeline's
//! sequencing never depends on the authority's interactive nature; tests
//! substitute a parameterizable fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stellar::{SignedEnvelope, UnsignedEnvelope};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user declined, or the authority returned nothing usable.
    #[error("{0}")]
    Refused(String),

    /// The authority itself failed (locked, unreachable, internal error).
    #[error("signer failure: {0}")]
    Failure(String),
}

#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// Whether the signing authority is installed and reachable.
    async fn is_present(&self) -> bool;

    /// Request account access. Interactive: the authority may prompt the
    /// user and be refused. Returns the account address on approval.
    async fn request_access(&self) -> Result<String, SignerError>;

    /// Sign an unsigned envelope, pinned to the given network passphrase.
    async fn sign(
        &self,
        envelope: &UnsignedEnvelope,
        network_passphrase: &str,
    ) -> Result<SignedEnvelope, SignerError>;
}

/// Production signing provider: a thin HTTP client for the local signer
/// bridge that fronts the user's Freighter-compatible browser extension.
/// The bridge mirrors the extension API shapes (camelCase JSON fields).
pub struct FreighterBridge {
    client: reqwest::Client,
    base_url: String,
}

impl FreighterBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceResponse {
    #[serde(default)]
    is_connected: bool,
}

#[derive(Debug, Deserialize)]
struct AccessResponse {
    #[serde(default)]
    address: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest<'a> {
    transaction_xdr: &'a str,
    network_passphrase: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignResponse {
    #[serde(default)]
    signed_tx_xdr: String,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl SigningProvider for FreighterBridge {
    async fn is_present(&self) -> bool {
        let url = format!("{}/status", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<PresenceResponse>()
                .await
                .map(|p| p.is_connected)
                .unwrap_or(false),
            Ok(_) | Err(_) => false,
        }
    }

    async fn request_access(&self) -> Result<String, SignerError> {
        let url = format!("{}/access", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| SignerError::Failure(e.to_string()))?;

        let access: AccessResponse = response
            .json()
            .await
            .map_err(|e| SignerError::Failure(e.to_string()))?;

        if let Some(error) = access.error {
            return Err(SignerError::Refused(error));
        }
        Ok(access.address)
    }

    async fn sign(
        &self,
        envelope: &UnsignedEnvelope,
        network_passphrase: &str,
    ) -> Result<SignedEnvelope, SignerError> {
        let url = format!("{}/sign", self.base_url);
        let request = SignRequest {
            transaction_xdr: envelope.as_str(),
            network_passphrase,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignerError::Failure(e.to_string()))?;

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| SignerError::Failure(e.to_string()))?;

        if let Some(error) = signed.error {
            return Err(SignerError::Refused(error));
        }
        if signed.signed_tx_xdr.trim().is_empty() {
            return Err(SignerError::Refused(
                "Transaction signing failed or was cancelled".to_string(),
            ));
        }

        Ok(SignedEnvelope::new(signed.signed_tx_xdr))
    }
}
