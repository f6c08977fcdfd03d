//! Payment envelope construction.
//!
//! Builds the XDR `TransactionEnvelope` for a single native-asset payment:
//! one `PaymentOp`, no memo, time-bounds preconditions, zero signatures.
//! The envelope is carried as base64 text; once it leaves the builder the
//! orchestrator treats it as opaque and never inspects or mutates it.
//! Signing and submission only sequence its transformation.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::strkey::{self, StrkeyError};
use super::xdr::XdrWriter;

const ENVELOPE_TYPE_TX: u32 = 2;
const KEY_TYPE_ED25519: u32 = 0;
const PRECOND_TIME: u32 = 1;
const MEMO_NONE: u32 = 0;
const OP_PAYMENT: u32 = 1;
const ASSET_NATIVE: u32 = 0;

/// A transaction envelope built locally, not yet signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedEnvelope(String);

impl UnsignedEnvelope {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A transaction envelope returned by the signing authority. Opaque: the
/// pipeline only forwards it to the ledger, never parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope(String);

impl SignedEnvelope {
    pub fn new(xdr_base64: String) -> Self {
        Self(xdr_base64)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("invalid source address: {0}")]
    InvalidSource(StrkeyError),

    #[error("invalid destination address: {0}")]
    InvalidDestination(StrkeyError),
}

/// Build an unsigned native-asset payment envelope.
///
/// `sequence` is the transaction sequence number (source account sequence
/// plus one). `valid_until` closes the validity window; the network refuses
/// the transaction after that instant, so an old unsigned envelope cannot
/// be signed and replayed later.
pub fn build_payment_envelope(
    source: &str,
    destination: &str,
    amount_stroops: i64,
    sequence: i64,
    base_fee: u32,
    valid_until: DateTime<Utc>,
) -> Result<UnsignedEnvelope, EnvelopeError> {
    let source_key = strkey::decode_account(source).map_err(EnvelopeError::InvalidSource)?;
    let dest_key = strkey::decode_account(destination).map_err(EnvelopeError::InvalidDestination)?;

    let mut w = XdrWriter::new();
    w.put_u32(ENVELOPE_TYPE_TX);

    // Transaction
    put_account(&mut w, &source_key);
    w.put_u32(base_fee);
    w.put_i64(sequence);

    // Preconditions: finite time bounds [0, valid_until]
    w.put_u32(PRECOND_TIME);
    w.put_u64(0);
    w.put_u64(valid_until.timestamp().max(0) as u64);

    w.put_u32(MEMO_NONE);

    // Operations: a single payment
    w.put_u32(1);
    w.put_u32(0); // no per-operation source account
    w.put_u32(OP_PAYMENT);
    put_account(&mut w, &dest_key);
    w.put_u32(ASSET_NATIVE);
    w.put_i64(amount_stroops);

    w.put_u32(0); // transaction ext
    w.put_u32(0); // no signatures yet

    Ok(UnsignedEnvelope(BASE64.encode(w.into_bytes())))
}

fn put_account(w: &mut XdrWriter, key: &[u8; 32]) {
    w.put_u32(KEY_TYPE_ED25519);
    w.put_opaque_fixed(key);
}
