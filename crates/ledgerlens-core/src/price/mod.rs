//! Fiat price feed for the ledger's native asset.
//!
//! [`PriceFeed`] errors are absorbed by the aggregator, which substitutes a
//! configured fallback quote; implementations only need to classify them.

mod http_client;
#[cfg(test)]
pub mod mock;

pub use http_client::{HttpPriceClient, DEFAULT_PRICE_TIMEOUT};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::UpstreamError;

#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current fiat price of one unit of the native asset.
    async fn fetch_price(&self) -> Result<Decimal, UpstreamError>;

    /// Fiat currency code quotes are expressed in, e.g. `usd`.
    fn currency(&self) -> &str;
}
