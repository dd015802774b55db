//! Domain types returned by the wallet explorer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Number of drops in one XRP.
pub const DROPS_PER_XRP: u32 = 1_000_000;

// ==============================================================================
// Transactions
// ==============================================================================

/// One entry of `account_tx` output, passed through as the ledger returned it.
///
/// `#[serde(transparent)]` keeps the JSON representation identical to the
/// upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord(pub serde_json::Value);

impl From<serde_json::Value> for TransactionRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

// ==============================================================================
// Snapshot
// ==============================================================================

/// Aggregated view of one address at the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Address,
    /// Balance in XRP.
    pub balance: Decimal,
    /// Most recent transactions, newest first as returned by the node.
    pub transactions: Vec<TransactionRecord>,
    /// Fiat price of one XRP.
    pub price: Decimal,
    /// Fiat currency code the price is quoted in.
    pub currency: String,
    /// True when the price feed failed and the configured fallback was used.
    pub price_is_fallback: bool,
    /// `balance * price`.
    pub fiat_value: Decimal,
}

/// Convert a drop count into XRP without losing precision.
pub fn drops_to_xrp(drops: u64) -> Decimal {
    (Decimal::from(drops) / Decimal::from(DROPS_PER_XRP)).normalize()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn drops_convert_exactly() {
        assert_eq!(drops_to_xrp(12_345_000), dec!(12.345));
        assert_eq!(drops_to_xrp(1), dec!(0.000001));
        assert_eq!(drops_to_xrp(0), Decimal::ZERO);
    }

    #[test]
    fn converted_balance_has_no_trailing_zeros() {
        assert_eq!(drops_to_xrp(12_345_000).to_string(), "12.345");
        assert_eq!(drops_to_xrp(20_000_000).to_string(), "20");
    }

    #[test]
    fn total_supply_converts_exactly() {
        assert_eq!(drops_to_xrp(100_000_000_000_000_000), dec!(100000000000));
    }

    #[test]
    fn transaction_record_is_transparent() {
        let raw = serde_json::json!({ "tx": { "TransactionType": "Payment" }, "validated": true });
        let record = TransactionRecord::from(raw.clone());
        assert_eq!(serde_json::to_value(&record).expect("serialize"), raw);
    }
}
