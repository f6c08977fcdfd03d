//! Stellar wire primitives
//!
//! - Account strkey encoding/validation
//! - Native-asset amount parsing (stroops)
//! - Minimal XDR writer
//! - Payment envelope construction

pub mod amount;
pub mod envelope;
pub mod strkey;
pub mod xdr;

// Re-export main types
pub use amount::{parse_native_amount, AmountError, STROOPS_PER_UNIT};
pub use envelope::{build_payment_envelope, EnvelopeError, SignedEnvelope, UnsignedEnvelope};
pub use strkey::{decode_account, encode_account, is_valid_account, StrkeyError};
