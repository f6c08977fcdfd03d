use serde::Deserialize;

use super::LedgerError;

/// Account record as returned by `GET /accounts/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    /// Horizon encodes the sequence number as a string.
    pub sequence: String,
    #[serde(default)]
    pub balances: Vec<BalanceLine>,
}

impl AccountRecord {
    pub fn sequence_number(&self) -> Result<i64, LedgerError> {
        self.sequence
            .parse()
            .map_err(|_| LedgerError::Transport(format!("malformed sequence: {}", self.sequence)))
    }

    /// The native-asset balance entry, if the account holds one.
    pub fn native_balance(&self) -> Option<&str> {
        self.balances
            .iter()
            .find(|b| b.asset_type == "native")
            .map(|b| b.balance.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceLine {
    pub asset_type: String,
    pub balance: String,
}

/// Successful submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSuccess {
    pub hash: String,
}

/// Horizon problem document for a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitRejection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub extras: Option<RejectionExtras>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RejectionExtras {
    #[serde(default)]
    pub result_codes: Option<ResultCodes>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultCodes {
    #[serde(default)]
    pub transaction: Option<String>,
    #[serde(default)]
    pub operations: Vec<String>,
}

impl SubmitRejection {
    /// Rejection carrying only an HTTP status, for bodies that fail to parse.
    pub fn from_status(status: u16) -> Self {
        Self {
            detail: Some(format!("Horizon rejected the transaction ({})", status)),
            ..Self::default()
        }
    }

    /// The most specific reason available: the first operation result code,
    /// then the transaction result code, then the problem-document detail.
    pub fn most_specific_reason(&self) -> String {
        if let Some(codes) = self.extras.as_ref().and_then(|e| e.result_codes.as_ref()) {
            if let Some(op_code) = codes.operations.first() {
                return op_code.clone();
            }
            if let Some(tx_code) = &codes.transaction {
                return tx_code.clone();
            }
        }
        if let Some(detail) = &self.detail {
            return detail.clone();
        }
        if let Some(title) = &self.title {
            return title.clone();
        }
        "transaction failed".to_string()
    }
}
