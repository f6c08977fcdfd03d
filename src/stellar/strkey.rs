//! Stellar account strkey codec.
//!
//! An account strkey is 56 characters starting with `G`: the RFC 4648
//! base32 encoding (no padding) of `version byte || 32-byte ed25519 key ||
//! CRC16-XModem checksum (little-endian)`.

use crc::{Crc, CRC_16_XMODEM};
use thiserror::Error;

/// Version byte for ed25519 account keys; encodes to the leading `G`.
const VERSION_ACCOUNT: u8 = 6 << 3;

/// Encoded length of an account strkey.
pub const ACCOUNT_STRKEY_LEN: usize = 56;

const CHECKSUM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrkeyError {
    #[error("account address must be {ACCOUNT_STRKEY_LEN} characters, got {0}")]
    BadLength(usize),

    #[error("account address contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("account address has the wrong version byte (expected a 'G' address)")]
    BadVersion,

    #[error("account address checksum mismatch")]
    BadChecksum,
}

/// Encode a raw ed25519 public key as a `G...` account address.
pub fn encode_account(key: &[u8; 32]) -> String {
    let mut payload = Vec::with_capacity(35);
    payload.push(VERSION_ACCOUNT);
    payload.extend_from_slice(key);
    let checksum = CHECKSUM.checksum(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&payload)
}

/// Decode a `G...` account address back to the raw ed25519 public key,
/// verifying length, alphabet, version byte, and checksum.
pub fn decode_account(address: &str) -> Result<[u8; 32], StrkeyError> {
    if address.len() != ACCOUNT_STRKEY_LEN {
        return Err(StrkeyError::BadLength(address.len()));
    }

    // 56 chars * 5 bits = exactly 35 bytes, no leftover bits
    let data = base32_decode(address)?;

    if data[0] != VERSION_ACCOUNT {
        return Err(StrkeyError::BadVersion);
    }

    let expected = u16::from_le_bytes([data[33], data[34]]);
    if CHECKSUM.checksum(&data[..33]) != expected {
        return Err(StrkeyError::BadChecksum);
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&data[1..33]);
    Ok(key)
}

/// Whether the given string is a well-formed account address.
pub fn is_valid_account(address: &str) -> bool {
    decode_account(address).is_ok()
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 8 / 5 + 1);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn base32_decode(input: &str) -> Result<Vec<u8>, StrkeyError> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for ch in input.chars() {
        let value = match ch {
            'A'..='Z' => ch as u32 - 'A' as u32,
            '2'..='7' => ch as u32 - '2' as u32 + 26,
            _ => return Err(StrkeyError::InvalidCharacter(ch)),
        };
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xff) as u8);
        }
    }

    Ok(out)
}
