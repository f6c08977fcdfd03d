//! Stellar Pay — wallet session & payment orchestrator for the Stellar
//! testnet.
//!
//! Connects an external Freighter-compatible wallet, synchronizes the
//! account's native-asset balance, requests test funds from Friendbot, and
//! drives the build → sign → submit → confirm payment pipeline against
//! Horizon. All failure modes are classified into a closed taxonomy; an
//! HTTP API exposes the orchestrator to a UI.

pub mod api;
pub mod balance;
pub mod config;
pub mod error;
pub mod friendbot;
pub mod horizon;
pub mod payment;
pub mod service;
pub mod session;
pub mod signer;
pub mod stellar;
