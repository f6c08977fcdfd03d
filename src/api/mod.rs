//! HTTP presentation boundary (consumed by, not part of, the core).

pub mod handlers;
pub mod server;
pub mod types;
