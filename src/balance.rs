//! Balance synchronization.
//!
//! Balance display is advisory, not authoritative for transaction safety:
//! the ledger re-validates at submission time regardless. A failed fetch
//! therefore degrades to the defined zero-fallback instead of blocking the
//! caller. This is the one deliberate exception to "classify and surface
//! everything".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::horizon::LedgerService;

#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub address: String,
    /// Decimal-string native-asset amount; `"0"` when the account has no
    /// native entry or the query failed.
    pub native_amount: String,
    pub fetched_at: DateTime<Utc>,
}

/// Fetch the native-asset balance for an address.
///
/// Never returns an error: account-not-found, a missing native entry, and
/// transport failures all yield `"0"` (logged, not propagated).
pub async fn fetch_balance(ledger: &dyn LedgerService, address: &str) -> AccountBalance {
    let native_amount = match ledger.load_account(address).await {
        Ok(account) => account.native_balance().unwrap_or("0").to_string(),
        Err(e) => {
            log::warn!("Balance fetch for {} failed, showing zero: {}", address, e);
            "0".to_string()
        }
    };

    log::debug!("Balance for {}: {} XLM", address, native_amount);

    AccountBalance {
        address: address.to_string(),
        native_amount,
        fetched_at: Utc::now(),
    }
}
