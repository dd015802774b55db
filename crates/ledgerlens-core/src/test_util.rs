//! Shared test helpers for `ledgerlens-core` unit tests.
//!
//! Builds deterministic addresses, snapshots, and raw ledger responses so that
//! tests across modules share one source of dummy data.

use rust_decimal_macros::dec;

use crate::address::Address;
use crate::types::{TransactionRecord, WalletSnapshot};

const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// ==============================================================================
// Address Helpers
// ==============================================================================

/// Create a deterministic valid `Address` from a single distinguishing byte.
pub fn address(n: u8) -> Address {
    let n = usize::from(n);
    let suffix = [BASE58[n / BASE58.len()], BASE58[n % BASE58.len()]];
    let raw = format!(
        "rHb9CJAWyB4rj91VRWn96DkukG4bwdty{}",
        std::str::from_utf8(&suffix).expect("base58 alphabet is ascii")
    );
    Address::parse(&raw).expect("generated address must validate")
}

// ==============================================================================
// Domain Builders
// ==============================================================================

pub fn transaction(hash: &str) -> TransactionRecord {
    TransactionRecord(serde_json::json!({
        "tx": { "TransactionType": "Payment", "hash": hash },
        "validated": true,
    }))
}

/// A snapshot of 12.345 XRP at 0.50 USD with one transaction.
pub fn snapshot(address: &Address) -> WalletSnapshot {
    WalletSnapshot {
        address: address.clone(),
        balance: dec!(12.345),
        transactions: vec![transaction("ABC")],
        price: dec!(0.50),
        currency: "usd".to_owned(),
        price_is_fallback: false,
        fiat_value: dec!(6.1725),
    }
}

// ==============================================================================
// Raw Ledger Responses
// ==============================================================================

pub fn account_info_success(drops: &str) -> serde_json::Value {
    serde_json::json!({
        "result": {
            "account_data": { "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "Balance": drops },
            "ledger_current_index": 90_000_000u64,
            "status": "success",
            "validated": true,
        }
    })
}

pub fn account_not_found() -> serde_json::Value {
    serde_json::json!({
        "result": {
            "account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "error": "actNotFound",
            "error_code": 19,
            "error_message": "Account not found.",
            "status": "error",
            "validated": true,
        }
    })
}

pub fn account_tx_success(count: usize) -> serde_json::Value {
    let transactions: Vec<serde_json::Value> = (0..count)
        .map(|i| transaction(&format!("TX{i}")).0)
        .collect();
    serde_json::json!({
        "result": {
            "account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "limit": 10,
            "status": "success",
            "transactions": transactions,
        }
    })
}
