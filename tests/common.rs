//! Common test infrastructure: parameterizable fakes for the three
//! external collaborators (ledger, signing authority, faucet) and a
//! `TestEnvironment` that wires them into a `WalletService`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use stellar_pay::config::StellarConfig;
use stellar_pay::friendbot::{FaucetError, FaucetService};
use stellar_pay::horizon::types::{BalanceLine, RejectionExtras, ResultCodes, SubmitRejection};
use stellar_pay::horizon::{AccountRecord, LedgerError, LedgerService, SubmitSuccess};
use stellar_pay::service::WalletService;
use stellar_pay::signer::{SignerError, SigningProvider};
use stellar_pay::stellar::{strkey, SignedEnvelope, UnsignedEnvelope};

// ============================================================================
// Fake ledger
// ============================================================================

#[derive(Clone)]
struct FakeAccount {
    sequence: i64,
    native_balance: Option<String>,
}

pub struct FakeLedger {
    accounts: Mutex<HashMap<String, FakeAccount>>,
    unavailable: Mutex<bool>,
    submit_outcome: Mutex<Result<String, SubmitRejection>>,
    balance_after_submit: Mutex<Option<(String, String)>>,
    pub load_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            unavailable: Mutex::new(false),
            submit_outcome: Mutex::new(Ok("deadbeefcafe".to_string())),
            balance_after_submit: Mutex::new(None),
            load_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// Create or replace an account with a native-asset balance.
    pub fn credit(&self, address: &str, native_balance: &str, sequence: i64) {
        self.accounts.lock().unwrap().insert(
            address.to_string(),
            FakeAccount {
                sequence,
                native_balance: Some(native_balance.to_string()),
            },
        );
    }

    /// Create an account that holds no native-asset entry at all.
    pub fn credit_without_native_entry(&self, address: &str, sequence: i64) {
        self.accounts.lock().unwrap().insert(
            address.to_string(),
            FakeAccount {
                sequence,
                native_balance: None,
            },
        );
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn confirm_submissions_with(&self, hash: &str) {
        *self.submit_outcome.lock().unwrap() = Ok(hash.to_string());
    }

    pub fn reject_submissions_with(&self, tx_code: &str, op_codes: &[&str]) {
        *self.submit_outcome.lock().unwrap() = Err(SubmitRejection {
            title: Some("Transaction Failed".to_string()),
            detail: Some("The transaction failed when submitted to the network.".to_string()),
            extras: Some(RejectionExtras {
                result_codes: Some(ResultCodes {
                    transaction: Some(tx_code.to_string()),
                    operations: op_codes.iter().map(|c| c.to_string()).collect(),
                }),
            }),
        });
    }

    /// After a successful submission, replace the given account's balance
    /// (the fake's stand-in for settlement).
    pub fn set_balance_after_submit(&self, address: &str, native_balance: &str) {
        *self.balance_after_submit.lock().unwrap() =
            Some((address.to_string(), native_balance.to_string()));
    }
}

#[async_trait]
impl LedgerService for FakeLedger {
    async fn load_account(&self, address: &str) -> Result<AccountRecord, LedgerError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        if *self.unavailable.lock().unwrap() {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }

        let account = self
            .accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or(LedgerError::NotFound)?;

        let mut balances = vec![BalanceLine {
            asset_type: "credit_alphanum4".to_string(),
            balance: "1.0000000".to_string(),
        }];
        if let Some(native) = account.native_balance {
            balances.push(BalanceLine {
                asset_type: "native".to_string(),
                balance: native,
            });
        }

        Ok(AccountRecord {
            account_id: address.to_string(),
            sequence: account.sequence.to_string(),
            balances,
        })
    }

    async fn submit(&self, _envelope: &SignedEnvelope) -> Result<SubmitSuccess, LedgerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        if *self.unavailable.lock().unwrap() {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }

        match self.submit_outcome.lock().unwrap().clone() {
            Ok(hash) => {
                if let Some((address, balance)) = self.balance_after_submit.lock().unwrap().clone()
                {
                    if let Some(account) = self.accounts.lock().unwrap().get_mut(&address) {
                        account.native_balance = Some(balance);
                        account.sequence += 1;
                    }
                }
                Ok(SubmitSuccess { hash })
            }
            Err(rejection) => Err(LedgerError::Rejected(rejection)),
        }
    }
}

// ============================================================================
// Fake signing authority
// ============================================================================

#[derive(Clone)]
pub enum SignBehavior {
    /// Return a canned signed envelope.
    Sign,
    /// User declined in the wallet.
    Refuse,
    /// Signer internal failure (locked, not authorized).
    Fail(String),
    /// Return an empty signed result.
    Empty,
    /// Park until notified, then sign (for in-flight concurrency tests).
    BlockThenSign(Arc<Notify>),
}

pub struct FakeSigner {
    present: Mutex<bool>,
    access: Mutex<Result<String, String>>,
    sign_behavior: Mutex<SignBehavior>,
    pub access_calls: AtomicUsize,
    pub sign_calls: AtomicUsize,
}

impl FakeSigner {
    /// Present, grants access to `address`, signs everything.
    pub fn granting(address: &str) -> Self {
        Self {
            present: Mutex::new(true),
            access: Mutex::new(Ok(address.to_string())),
            sign_behavior: Mutex::new(SignBehavior::Sign),
            access_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_present(&self, present: bool) {
        *self.present.lock().unwrap() = present;
    }

    pub fn refuse_access(&self, reason: &str) {
        *self.access.lock().unwrap() = Err(reason.to_string());
    }

    pub fn grant_access_to(&self, address: &str) {
        *self.access.lock().unwrap() = Ok(address.to_string());
    }

    pub fn set_sign_behavior(&self, behavior: SignBehavior) {
        *self.sign_behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl SigningProvider for FakeSigner {
    async fn is_present(&self) -> bool {
        *self.present.lock().unwrap()
    }

    async fn request_access(&self) -> Result<String, SignerError> {
        self.access_calls.fetch_add(1, Ordering::SeqCst);
        self.access
            .lock()
            .unwrap()
            .clone()
            .map_err(SignerError::Refused)
    }

    async fn sign(
        &self,
        _envelope: &UnsignedEnvelope,
        _network_passphrase: &str,
    ) -> Result<SignedEnvelope, SignerError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);

        let behavior = self.sign_behavior.lock().unwrap().clone();
        match behavior {
            SignBehavior::Sign => Ok(SignedEnvelope::new("AAAASIGNEDENVELOPE".to_string())),
            SignBehavior::Refuse => Err(SignerError::Refused(
                "Transaction signing failed or was cancelled".to_string(),
            )),
            SignBehavior::Fail(msg) => Err(SignerError::Failure(msg)),
            SignBehavior::Empty => Ok(SignedEnvelope::new(String::new())),
            SignBehavior::BlockThenSign(gate) => {
                gate.notified().await;
                Ok(SignedEnvelope::new("AAAASIGNEDENVELOPE".to_string()))
            }
        }
    }
}

// ============================================================================
// Fake faucet
// ============================================================================

pub struct FakeFaucet {
    ledger: Arc<FakeLedger>,
    outcome: Mutex<Result<(), FaucetError>>,
    pub fund_calls: AtomicUsize,
}

/// Amount Friendbot credits to a freshly funded testnet account.
pub const FRIENDBOT_CREDIT: &str = "10000.0000000";

impl FakeFaucet {
    pub fn succeeding(ledger: Arc<FakeLedger>) -> Self {
        Self {
            ledger,
            outcome: Mutex::new(Ok(())),
            fund_calls: AtomicUsize::new(0),
        }
    }

    pub fn reject_with(&self, detail: &str) {
        *self.outcome.lock().unwrap() = Err(FaucetError::Rejected(detail.to_string()));
    }

    pub fn reject_with_status(&self, status: u16) {
        *self.outcome.lock().unwrap() = Err(FaucetError::Status(status));
    }
}

#[async_trait]
impl FaucetService for FakeFaucet {
    async fn fund(&self, address: &str) -> Result<(), FaucetError> {
        self.fund_calls.fetch_add(1, Ordering::SeqCst);

        self.outcome.lock().unwrap().clone()?;

        // Friendbot creates the account if needed and credits 10,000 XLM
        self.ledger.credit(address, FRIENDBOT_CREDIT, 1);
        Ok(())
    }
}

// ============================================================================
// Test environment
// ============================================================================

pub struct TestEnvironment {
    pub ledger: Arc<FakeLedger>,
    pub signer: Arc<FakeSigner>,
    pub faucet: Arc<FakeFaucet>,
    pub service: Arc<WalletService>,
    pub address: String,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let address = source_address();
        let ledger = Arc::new(FakeLedger::new());
        let signer = Arc::new(FakeSigner::granting(&address));
        let faucet = Arc::new(FakeFaucet::succeeding(ledger.clone()));

        let service = Arc::new(WalletService::with_collaborators(
            StellarConfig::default(),
            ledger.clone(),
            signer.clone(),
            faucet.clone(),
        ));

        Self {
            ledger,
            signer,
            faucet,
            service,
            address,
        }
    }

    /// Environment with a connected session and a funded source account.
    pub async fn connected_and_funded() -> Self {
        let env = Self::new();
        env.ledger.credit(&env.address, FRIENDBOT_CREDIT, 100);
        env.service.connect().await.expect("connect");
        env
    }
}

pub fn source_address() -> String {
    strkey::encode_account(&[1u8; 32])
}

pub fn recipient_address() -> String {
    strkey::encode_account(&[2u8; 32])
}
