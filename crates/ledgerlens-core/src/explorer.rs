//! Wallet aggregation: validation, cache lookup, upstream orchestration, and
//! the partial-failure policy.
//!
//! Balance is the one fact that cannot be approximated, so a balance failure
//! aborts the request. Transaction history and price are enrichments: their
//! failures are logged and replaced by an empty list and the configured
//! fallback quote respectively.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::address::Address;
use crate::cache::SnapshotCache;
use crate::error::{ConfigError, ExplorerError};
use crate::ledger::{LedgerRpc, DEFAULT_TRANSACTION_LIMIT};
use crate::price::PriceFeed;
use crate::types::{TransactionRecord, WalletSnapshot};

/// Quote substituted when the price feed fails.
pub const DEFAULT_FALLBACK_PRICE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Largest accepted fallback quote.
pub const MAX_FALLBACK_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Lifetime of a cached snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

// ==============================================================================
// Configuration
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Number of recent transactions requested per address.
    pub transaction_limit: u32,
    /// Price used when the feed is unavailable.
    pub fallback_price: Decimal,
    /// Fixed (non-sliding) lifetime of cached snapshots.
    pub cache_ttl: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            transaction_limit: DEFAULT_TRANSACTION_LIMIT,
            fallback_price: DEFAULT_FALLBACK_PRICE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ExplorerConfig {
    /// Reject settings the aggregator cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_price < Decimal::ZERO {
            return Err(ConfigError::InvalidSetting(format!(
                "fallback price must not be negative, got {}",
                self.fallback_price
            )));
        }
        if self.fallback_price > MAX_FALLBACK_PRICE {
            return Err(ConfigError::InvalidSetting(format!(
                "fallback price must be at most {MAX_FALLBACK_PRICE}, got {}",
                self.fallback_price
            )));
        }
        Ok(())
    }
}

// ==============================================================================
// Explorer
// ==============================================================================

/// Aggregates balance, recent transactions, and fiat value for an address.
///
/// Shared across request handlers via `Arc<WalletExplorer>`; every
/// collaborator is injected so tests can substitute doubles.
pub struct WalletExplorer {
    ledger: Arc<dyn LedgerRpc>,
    prices: Arc<dyn PriceFeed>,
    cache: Arc<dyn SnapshotCache>,
    config: ExplorerConfig,
}

impl WalletExplorer {
    pub fn new(
        ledger: Arc<dyn LedgerRpc>,
        prices: Arc<dyn PriceFeed>,
        cache: Arc<dyn SnapshotCache>,
        config: ExplorerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ledger,
            prices,
            cache,
            config,
        })
    }

    /// Validate `raw` and return its snapshot, from cache when still live.
    ///
    /// Validation happens before any I/O. Only successful aggregations are
    /// cached.
    pub async fn explore(&self, raw: &str) -> Result<WalletSnapshot, ExplorerError> {
        let address = Address::parse(raw).inspect_err(|err| {
            debug!(input = raw, error = %err, "rejected malformed address");
        })?;

        if let Some(snapshot) = self.cache.get(&address).await {
            info!(address = %address, "serving cached wallet snapshot");
            return Ok(snapshot);
        }

        info!(address = %address, "fetching wallet data");
        let balance = self
            .ledger
            .fetch_balance(&address)
            .await
            .inspect_err(|err| {
                error!(
                    address = %address,
                    rpc.method = %err.method,
                    error.kind = %err.kind,
                    error.code = ?err.code,
                    error = %err,
                    "balance lookup failed"
                );
            })?;

        // Both enrichments are independent and non-fatal, so they run
        // concurrently with their own timeouts.
        let (transactions, quote) =
            futures::join!(self.load_transactions(&address), self.load_price());

        let (price, fiat_value, price_is_fallback) =
            self.valuate(balance, quote).inspect_err(|err| {
                error!(address = %address, error = %err, "fiat valuation failed");
            })?;
        let snapshot = WalletSnapshot {
            address: address.clone(),
            balance,
            transactions,
            price,
            currency: self.prices.currency().to_owned(),
            price_is_fallback,
            fiat_value,
        };

        self.cache
            .put(address.clone(), snapshot.clone(), self.config.cache_ttl)
            .await;
        info!(
            address = %address,
            balance = %snapshot.balance,
            tx_count = snapshot.transactions.len(),
            price = %snapshot.price,
            price_is_fallback,
            "wallet snapshot assembled"
        );

        Ok(snapshot)
    }

    async fn load_transactions(&self, address: &Address) -> Vec<TransactionRecord> {
        match self
            .ledger
            .fetch_transactions(address, self.config.transaction_limit)
            .await
        {
            Ok(transactions) => transactions,
            Err(err) => {
                warn!(
                    address = %address,
                    rpc.method = %err.method,
                    error.kind = %err.kind,
                    error.code = ?err.code,
                    error = %err,
                    "transaction lookup failed; continuing without history"
                );
                Vec::new()
            }
        }
    }

    async fn load_price(&self) -> Option<Decimal> {
        match self.prices.fetch_price().await {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(
                    error.kind = %err.kind,
                    error = %err,
                    fallback = %self.config.fallback_price,
                    "price lookup failed; using fallback price"
                );
                None
            }
        }
    }

    /// Returns `(price, fiat_value, price_is_fallback)`.
    ///
    /// A live quote whose product overflows is discarded like a failed quote,
    /// so `price_is_fallback` always describes the price actually reported.
    fn valuate(
        &self,
        balance: Decimal,
        quote: Option<Decimal>,
    ) -> Result<(Decimal, Decimal, bool), ExplorerError> {
        if let Some(price) = quote {
            match balance.checked_mul(price) {
                Some(fiat_value) => return Ok((price, fiat_value, false)),
                None => warn!(
                    %balance,
                    %price,
                    fallback = %self.config.fallback_price,
                    "quoted fiat value is out of range; using fallback price"
                ),
            }
        }

        let price = self.config.fallback_price;
        let fiat_value = balance
            .checked_mul(price)
            .ok_or(ExplorerError::Valuation { balance, price })?;
        Ok((price, fiat_value, true))
    }
}
