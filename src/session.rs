//! Wallet session lifecycle.
//!
//! Exactly one session may be active; `connect` and `disconnect` are the
//! sole mutators of the bound address. The session slot is explicit state
//! held by the orchestrator instance, never a global, so multiple service
//! instances can coexist in tests.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::WalletError;
use crate::signer::SigningProvider;
use crate::stellar::strkey;

#[derive(Debug, Clone, Serialize)]
pub struct WalletSession {
    pub address: String,
}

impl WalletSession {
    /// Truncated form for display and logs, e.g. `GBRPYH...C7OX2H`.
    pub fn display_address(&self) -> String {
        if self.address.len() <= 12 {
            return self.address.clone();
        }
        format!(
            "{}...{}",
            &self.address[..6],
            &self.address[self.address.len() - 6..]
        )
    }
}

pub struct SessionManager {
    signer: Arc<dyn SigningProvider>,
    session: RwLock<Option<WalletSession>>,
}

impl SessionManager {
    pub fn new(signer: Arc<dyn SigningProvider>) -> Self {
        Self {
            signer,
            session: RwLock::new(None),
        }
    }

    /// Establish a session with the signing authority.
    ///
    /// Probes presence, requests account access (interactive; may be
    /// refused), validates the returned address, and binds it. No automatic
    /// retry — the caller may connect again after a failure.
    pub async fn connect(&self) -> Result<WalletSession, WalletError> {
        if !self.signer.is_present().await {
            return Err(WalletError::WalletNotFound);
        }

        let address = self
            .signer
            .request_access()
            .await
            .map_err(|e| WalletError::AuthorizationDenied(e.to_string()))?;

        if address.is_empty() || !strkey::is_valid_account(&address) {
            return Err(WalletError::AuthorizationDenied(
                "wallet returned a malformed account address".to_string(),
            ));
        }

        let session = WalletSession { address };
        log::info!("Wallet connected: {}", session.display_address());

        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Clear the bound address. Idempotent: disconnecting an already
    /// disconnected session is a no-op.
    pub async fn disconnect(&self) {
        let mut slot = self.session.write().await;
        if let Some(session) = slot.take() {
            log::info!("Wallet disconnected: {}", session.display_address());
        }
    }

    pub async fn current(&self) -> Option<WalletSession> {
        self.session.read().await.clone()
    }

    /// The bound address, or `NotConnected`. Every pipeline and balance
    /// operation goes through this precondition.
    pub async fn require_address(&self) -> Result<String, WalletError> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.address.clone())
            .ok_or(WalletError::NotConnected)
    }

    /// Fail fast when the session no longer holds `address` — a disconnect
    /// mid-run must not let a later stage operate on a stale address.
    pub async fn ensure_bound(&self, address: &str) -> Result<(), WalletError> {
        match self.session.read().await.as_ref() {
            Some(session) if session.address == address => Ok(()),
            _ => Err(WalletError::NotConnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_address_truncates() {
        let session = WalletSession {
            address: "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H".to_string(),
        };
        assert_eq!(session.display_address(), "GBRPYH...C7OX2H");
    }

    #[test]
    fn test_display_address_short_values_untouched() {
        let session = WalletSession {
            address: "GSHORT".to_string(),
        };
        assert_eq!(session.display_address(), "GSHORT");
    }
}
