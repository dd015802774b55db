//! Native JSON-RPC client for `rippled` compatible endpoints.
//!
//! Implements [`LedgerRpc`](super::LedgerRpc) over HTTP using `reqwest`, with
//! per-request timeouts, optional request rate limiting, and envelope
//! normalization into [`UpstreamError`](crate::error::UpstreamError).

mod client;
mod parsing;
mod protocol;

pub use client::{HttpLedgerClient, DEFAULT_LEDGER_TIMEOUT};
