//! Orchestrator configuration from environment variables
//!
//! Controls the Horizon and Friendbot endpoints, the pinned network
//! passphrase, and transaction build parameters. Defaults to the public
//! Stellar testnet.

use std::env;

/// Passphrase of the Stellar test network. Every sign request is pinned to
/// this value so a wallet configured for another network refuses to sign.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Network-standard base fee per operation, in stroops.
pub const BASE_FEE_STROOPS: u32 = 100;

/// Validity window applied to every built transaction, in seconds. An
/// unsigned envelope older than this is rejected by the network, so a stale
/// envelope can never be signed and replayed arbitrarily later.
pub const TX_TIMEOUT_SECS: i64 = 30;

#[derive(Clone, Debug)]
pub struct StellarConfig {
    /// Horizon API base URL (account queries and transaction submission)
    pub horizon_url: String,
    /// Friendbot base URL (testnet funding faucet)
    pub friendbot_url: String,
    /// Network passphrase pinned into every sign request
    pub network_passphrase: String,
    /// Base URL of the local signer bridge fronting the wallet extension
    pub signer_bridge_url: String,
    /// Per-transaction base fee in stroops
    pub base_fee: u32,
    /// Transaction validity window in seconds
    pub tx_timeout_secs: i64,
}

impl StellarConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `HORIZON_URL`: Horizon endpoint (default: public testnet Horizon)
    /// - `FRIENDBOT_URL`: Friendbot endpoint (default: public Friendbot)
    /// - `NETWORK_PASSPHRASE`: network to pin sign requests to (default: testnet)
    /// - `SIGNER_BRIDGE_URL`: signer bridge endpoint (default: http://localhost:8310)
    pub fn from_env() -> Self {
        let horizon_url = env::var("HORIZON_URL")
            .unwrap_or_else(|_| "https://horizon-testnet.stellar.org".to_string());
        log::info!("Horizon URL: {}", horizon_url);

        let friendbot_url = env::var("FRIENDBOT_URL")
            .unwrap_or_else(|_| "https://friendbot.stellar.org".to_string());
        log::info!("Friendbot URL: {}", friendbot_url);

        let network_passphrase =
            env::var("NETWORK_PASSPHRASE").unwrap_or_else(|_| TESTNET_PASSPHRASE.to_string());
        if network_passphrase != TESTNET_PASSPHRASE {
            log::warn!("Using non-default network passphrase: {}", network_passphrase);
        }

        let signer_bridge_url = env::var("SIGNER_BRIDGE_URL")
            .unwrap_or_else(|_| "http://localhost:8310".to_string());
        log::info!("Signer bridge URL: {}", signer_bridge_url);

        Self {
            horizon_url,
            friendbot_url,
            network_passphrase,
            signer_bridge_url,
            base_fee: BASE_FEE_STROOPS,
            tx_timeout_secs: TX_TIMEOUT_SECS,
        }
    }
}

impl Default for StellarConfig {
    /// Default configuration (public Stellar testnet)
    fn default() -> Self {
        Self {
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
            friendbot_url: "https://friendbot.stellar.org".to_string(),
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            signer_bridge_url: "http://localhost:8310".to_string(),
            base_fee: BASE_FEE_STROOPS,
            tx_timeout_secs: TX_TIMEOUT_SECS,
        }
    }
}
