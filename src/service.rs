//! Wallet service — orchestration layer.
//!
//! Owns the session slot, the cached balance, the per-run operation status,
//! and the single-flight pipeline guard; delegates each operation to its
//! component module. This is the presentation boundary: every method
//! returns a result tagged with the taxonomy so a UI can render it without
//! re-deriving any sequencing logic.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::balance::{self, AccountBalance};
use crate::config::StellarConfig;
use crate::error::{self, WalletError};
use crate::friendbot::{FaucetService, FriendbotClient};
use crate::horizon::{HorizonClient, LedgerService};
use crate::payment::{self, OperationStatus, PaymentReceipt, PaymentRequest};
use crate::session::{SessionManager, WalletSession};
use crate::signer::{FreighterBridge, SigningProvider};

pub struct WalletService {
    config: StellarConfig,
    ledger: Arc<dyn LedgerService>,
    signer: Arc<dyn SigningProvider>,
    faucet: Arc<dyn FaucetService>,
    session: SessionManager,
    balance: RwLock<Option<AccountBalance>>,
    status: RwLock<OperationStatus>,
    // Single in-flight payment per session: held for the whole run,
    // acquired with try_lock so a second send is rejected, never queued.
    send_guard: Mutex<()>,
}

impl WalletService {
    /// Production wiring: Horizon, Friendbot, and the local signer bridge.
    pub fn new(config: StellarConfig) -> Self {
        let ledger = Arc::new(HorizonClient::new(config.horizon_url.clone()));
        let signer = Arc::new(FreighterBridge::new(config.signer_bridge_url.clone()));
        let faucet = Arc::new(FriendbotClient::new(config.friendbot_url.clone()));
        Self::with_collaborators(config, ledger, signer, faucet)
    }

    /// Wire explicit collaborators (used by tests with fakes).
    pub fn with_collaborators(
        config: StellarConfig,
        ledger: Arc<dyn LedgerService>,
        signer: Arc<dyn SigningProvider>,
        faucet: Arc<dyn FaucetService>,
    ) -> Self {
        Self {
            config,
            ledger,
            signer: signer.clone(),
            faucet,
            session: SessionManager::new(signer),
            balance: RwLock::new(None),
            status: RwLock::new(OperationStatus::idle()),
            send_guard: Mutex::new(()),
        }
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    pub async fn connect(&self) -> Result<WalletSession, WalletError> {
        self.session.connect().await
    }

    /// Disconnect and drop all derived state (balance, status). Idempotent.
    pub async fn disconnect(&self) {
        self.session.disconnect().await;
        *self.balance.write().await = None;
        *self.status.write().await = OperationStatus::idle();
    }

    pub async fn session(&self) -> Option<WalletSession> {
        self.session.current().await
    }

    // ============================================================================
    // Balance & funding
    // ============================================================================

    /// Fetch the session account's native balance and cache it. Degrades to
    /// `"0"` on query failure instead of erroring; `NotConnected` only when
    /// no session is bound.
    pub async fn fetch_balance(&self) -> Result<AccountBalance, WalletError> {
        let address = self.session.require_address().await?;
        Ok(self.refresh_balance(&address).await)
    }

    /// The last fetched balance, as the presentation layer displays it.
    pub async fn cached_balance(&self) -> Option<AccountBalance> {
        self.balance.read().await.clone()
    }

    /// Request test funds from the faucet, then re-sync the balance.
    /// Funding success is never reported without a refreshed balance; a
    /// faucet rejection leaves the displayed balance untouched.
    pub async fn request_funding(&self) -> Result<AccountBalance, WalletError> {
        let address = self.session.require_address().await?;

        self.faucet
            .fund(&address)
            .await
            .map_err(error::classify_funding)?;

        log::info!("Account funded: {}", address);
        Ok(self.refresh_balance(&address).await)
    }

    // ============================================================================
    // Payment pipeline
    // ============================================================================

    /// Run one payment to its terminal state, then re-sync the balance on
    /// confirmation. A second call while a run is outstanding fails with
    /// `PipelineBusy`.
    pub async fn send(&self, recipient: &str, amount: &str) -> Result<PaymentReceipt, WalletError> {
        let _guard = self
            .send_guard
            .try_lock()
            .map_err(|_| WalletError::PipelineBusy)?;

        let request = PaymentRequest::new(recipient, amount);
        let result = payment::run(
            self.ledger.as_ref(),
            self.signer.as_ref(),
            &self.session,
            &self.status,
            &self.config,
            request,
        )
        .await;

        // The pipeline itself never re-syncs; the orchestrator refreshes
        // after observing Confirmed, keeping balance freshness in one place.
        if result.is_ok() {
            if let Ok(address) = self.session.require_address().await {
                self.refresh_balance(&address).await;
            }
        }

        result
    }

    /// The current pipeline status, for the presentation layer.
    pub async fn status(&self) -> OperationStatus {
        self.status.read().await.clone()
    }

    async fn refresh_balance(&self, address: &str) -> AccountBalance {
        let fetched = balance::fetch_balance(self.ledger.as_ref(), address).await;
        *self.balance.write().await = Some(fetched.clone());
        fetched
    }
}
