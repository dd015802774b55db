use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::UpstreamError;

use super::PriceFeed;

/// A mock price feed returning one canned result and counting calls.
pub struct MockPriceFeed {
    quote: Result<Decimal, UpstreamError>,
    calls: AtomicUsize,
}

impl MockPriceFeed {
    pub fn quoting(price: Decimal) -> Self {
        Self {
            quote: Ok(price),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            quote: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    async fn fetch_price(&self) -> Result<Decimal, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quote.clone()
    }

    fn currency(&self) -> &str {
        "usd"
    }
}
