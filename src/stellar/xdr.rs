//! Minimal XDR writer (RFC 4506).
//!
//! Only the primitives the payment envelope needs: big-endian integers and
//! fixed-length opaque data. Everything written here is four-byte aligned
//! because keys are 32 bytes and there are no variable-length fields.

pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Fixed-length opaque data; the caller guarantees 4-byte alignment.
    pub fn put_opaque_fixed(&mut self, data: &[u8]) {
        debug_assert!(data.len() % 4 == 0);
        self.buf.extend_from_slice(data);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for XdrWriter {
    fn default() -> Self {
        Self::new()
    }
}
