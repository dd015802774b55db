//! XRP Ledger JSON-RPC abstraction layer.
//!
//! Defines the [`LedgerRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpLedgerClient`]) plus a test mock (`mock::MockLedger`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::{HttpLedgerClient, DEFAULT_LEDGER_TIMEOUT};
pub use types::{ServerInfo, ValidatedLedger};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::address::Address;
use crate::error::UpstreamError;
use crate::types::TransactionRecord;

/// Number of recent transactions requested when the caller does not say.
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 10;

/// The ledger node methods the explorer needs.
///
/// Implementations normalize the response envelope and classify failures
/// into [`UpstreamError`]s.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Balance of `address` in the latest validated ledger, in XRP.
    async fn fetch_balance(&self, address: &Address) -> Result<Decimal, UpstreamError>;

    /// Up to `limit` most recent transactions touching `address`.
    async fn fetch_transactions(
        &self,
        address: &Address,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, UpstreamError>;

    /// Basic node status, used as a connectivity probe.
    async fn server_info(&self) -> Result<ServerInfo, UpstreamError>;
}
