//! Payment pipeline: validate → build → sign → submit → confirm.
//!
//! One run at a time per session; every stage failure is classified into
//! the closed taxonomy and terminates the run in `Failed`. There is no
//! automatic retry anywhere. A retry is a fresh caller-initiated run
//! starting again at `Validating`.
//!
//! Policy note: a recipient that is well-formed but does not exist
//! on-ledger is NOT rejected client-side. Payments can create new accounts
//! on this ledger, so whether such a payment funds the recipient or is
//! rejected is left entirely to the network's submission-time validation.

use chrono::{Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::StellarConfig;
use crate::error::{self, WalletError};
use crate::horizon::LedgerService;
use crate::session::SessionManager;
use crate::signer::SigningProvider;
use crate::stellar::{amount, envelope, strkey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Idle,
    Validating,
    Building,
    AwaitingSignature,
    Submitting,
    Confirmed,
    Failed,
}

impl PipelinePhase {
    /// The defined successor set of each phase. `Failed` is reachable from
    /// every non-terminal phase.
    pub fn successors(self) -> &'static [PipelinePhase] {
        use PipelinePhase::*;
        match self {
            Idle => &[Validating, Failed],
            Validating => &[Building, Failed],
            Building => &[AwaitingSignature, Failed],
            AwaitingSignature => &[Submitting, Failed],
            Submitting => &[Confirmed, Failed],
            Confirmed => &[],
            Failed => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

/// Transient per-run status, replaced at the start of each new run.
/// Readable by the presentation layer at any point during a run.
#[derive(Debug, Clone, Serialize)]
pub struct OperationStatus {
    pub phase: PipelinePhase,
    pub message: String,
    pub tx_hash: Option<String>,
}

impl OperationStatus {
    pub fn idle() -> Self {
        Self {
            phase: PipelinePhase::Idle,
            message: String::new(),
            tx_hash: None,
        }
    }
}

/// Immutable once accepted into the pipeline.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub recipient: String,
    pub amount: String,
}

impl PaymentRequest {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// Validate recipient format and amount before any network action.
    fn validate(&self) -> Result<i64, WalletError> {
        if self.recipient.is_empty() {
            return Err(WalletError::ValidationFailed(
                "recipient address is empty".to_string(),
            ));
        }
        if let Err(e) = strkey::decode_account(&self.recipient) {
            return Err(WalletError::ValidationFailed(e.to_string()));
        }

        amount::parse_native_amount(&self.amount)
            .map_err(|e| WalletError::ValidationFailed(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub hash: String,
    pub recipient: String,
    pub amount: String,
}

/// Drive one payment run to its terminal state.
///
/// Stages execute strictly in sequence; the bound address is re-checked at
/// each stage boundary so a disconnect mid-run fails fast instead of
/// operating on a stale address.
pub async fn run(
    ledger: &dyn LedgerService,
    signer: &dyn SigningProvider,
    session: &SessionManager,
    status: &RwLock<OperationStatus>,
    config: &StellarConfig,
    request: PaymentRequest,
) -> Result<PaymentReceipt, WalletError> {
    *status.write().await = OperationStatus::idle();

    let outcome = drive(ledger, signer, session, status, config, &request).await;

    let mut s = status.write().await;
    match &outcome {
        Ok(receipt) => {
            s.phase = PipelinePhase::Confirmed;
            s.message = "Transaction successful!".to_string();
            s.tx_hash = Some(receipt.hash.clone());
            log::info!("Payment confirmed: {}", receipt.hash);
        }
        Err(e) => {
            s.phase = PipelinePhase::Failed;
            s.message = e.to_string();
            s.tx_hash = None;
            log::warn!("Payment failed: {}", e);
        }
    }

    outcome
}

async fn drive(
    ledger: &dyn LedgerService,
    signer: &dyn SigningProvider,
    session: &SessionManager,
    status: &RwLock<OperationStatus>,
    config: &StellarConfig,
    request: &PaymentRequest,
) -> Result<PaymentReceipt, WalletError> {
    set_phase(status, PipelinePhase::Validating, "Validating payment...").await;

    // Precondition: the pipeline never starts without a bound address.
    let source = session.require_address().await?;
    let amount_stroops = request.validate()?;

    set_phase(status, PipelinePhase::Building, "Preparing transaction...").await;

    let account = ledger
        .load_account(&source)
        .await
        .map_err(|e| error::classify_account_load(&source, e))?;
    let sequence = account
        .sequence_number()
        .map_err(|e| WalletError::LedgerUnavailable(e.to_string()))?;

    let valid_until = Utc::now() + Duration::seconds(config.tx_timeout_secs);
    let unsigned = envelope::build_payment_envelope(
        &source,
        &request.recipient,
        amount_stroops,
        sequence + 1,
        config.base_fee,
        valid_until,
    )
    .map_err(|e| WalletError::ValidationFailed(e.to_string()))?;

    session.ensure_bound(&source).await?;
    set_phase(
        status,
        PipelinePhase::AwaitingSignature,
        "Please sign the transaction in your wallet...",
    )
    .await;

    let signed = signer
        .sign(&unsigned, &config.network_passphrase)
        .await
        .map_err(error::classify_signing)?;

    // An empty signed result is treated identically to refusal,
    // never silently retried.
    if signed.is_empty() {
        return Err(WalletError::SigningRejected(
            "wallet returned an empty signed envelope".to_string(),
        ));
    }

    session.ensure_bound(&source).await?;
    set_phase(status, PipelinePhase::Submitting, "Submitting to network...").await;

    let result = ledger
        .submit(&signed)
        .await
        .map_err(error::classify_submission)?;

    Ok(PaymentReceipt {
        hash: result.hash,
        recipient: request.recipient.clone(),
        amount: request.amount.clone(),
    })
}

async fn set_phase(status: &RwLock<OperationStatus>, phase: PipelinePhase, message: &str) {
    log::debug!("Pipeline phase: {:?}", phase);
    let mut s = status.write().await;
    s.phase = phase;
    s.message = message.to_string();
}
