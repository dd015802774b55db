use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::address::Address;
use crate::error::UpstreamError;
use crate::types::TransactionRecord;

use super::types::ServerInfo;
use super::LedgerRpc;

/// A mock ledger backend for testing. Returns canned results configured via
/// the builder and counts every call it receives.
pub struct MockLedger {
    balance: Result<Decimal, UpstreamError>,
    transactions: Result<Vec<TransactionRecord>, UpstreamError>,
    balance_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
    last_limit: AtomicUsize,
}

impl MockLedger {
    pub fn builder() -> MockLedgerBuilder {
        MockLedgerBuilder {
            balance: Ok(Decimal::ZERO),
            transactions: Ok(Vec::new()),
        }
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }

    /// Total number of upstream calls made against this mock.
    pub fn calls(&self) -> usize {
        self.balance_calls() + self.transaction_calls()
    }

    pub fn last_limit(&self) -> usize {
        self.last_limit.load(Ordering::SeqCst)
    }
}

pub struct MockLedgerBuilder {
    balance: Result<Decimal, UpstreamError>,
    transactions: Result<Vec<TransactionRecord>, UpstreamError>,
}

impl MockLedgerBuilder {
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Ok(balance);
        self
    }

    pub fn with_balance_error(mut self, err: UpstreamError) -> Self {
        self.balance = Err(err);
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<TransactionRecord>) -> Self {
        self.transactions = Ok(transactions);
        self
    }

    pub fn with_transactions_error(mut self, err: UpstreamError) -> Self {
        self.transactions = Err(err);
        self
    }

    pub fn build(self) -> MockLedger {
        MockLedger {
            balance: self.balance,
            transactions: self.transactions,
            balance_calls: AtomicUsize::new(0),
            transaction_calls: AtomicUsize::new(0),
            last_limit: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn fetch_balance(&self, _address: &Address) -> Result<Decimal, UpstreamError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance.clone()
    }

    async fn fetch_transactions(
        &self,
        _address: &Address,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, UpstreamError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit as usize, Ordering::SeqCst);
        self.transactions.clone()
    }

    async fn server_info(&self) -> Result<ServerInfo, UpstreamError> {
        Ok(ServerInfo {
            build_version: "mock".into(),
            complete_ledgers: "1-100".into(),
            server_state: "full".into(),
            validated_ledger: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_util::address;

    #[tokio::test]
    async fn counts_calls_and_records_limit() {
        let ledger = MockLedger::builder().with_balance(dec!(1)).build();
        let addr = address(1);

        assert_eq!(ledger.fetch_balance(&addr).await.expect("ok"), dec!(1));
        assert!(ledger.fetch_transactions(&addr, 7).await.expect("ok").is_empty());
        assert_eq!(ledger.balance_calls(), 1);
        assert_eq!(ledger.transaction_calls(), 1);
        assert_eq!(ledger.last_limit(), 7);
    }
}
