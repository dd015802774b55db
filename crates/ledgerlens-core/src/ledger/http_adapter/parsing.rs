use rust_decimal::Decimal;

use crate::error::UpstreamError;
use crate::ledger::types::ServerInfo;
use crate::types::{drops_to_xrp, TransactionRecord};

/// Read `account_data.Balance` (drops, as an integer string) and convert to XRP.
pub(super) fn parse_balance(
    method: &str,
    result: &serde_json::Value,
) -> Result<Decimal, UpstreamError> {
    let raw = result
        .get("account_data")
        .and_then(|data| data.get("Balance"))
        .ok_or_else(|| UpstreamError::malformed(method, "missing account_data.Balance"))?;

    let drops = parse_drops(raw)
        .ok_or_else(|| UpstreamError::malformed(method, format!("invalid drops amount `{raw}`")))?;
    Ok(drops_to_xrp(drops))
}

// `rippled` always sends a string; bare integers are accepted as well.
fn parse_drops(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Read `transactions` as an ordered list of opaque records.
pub(super) fn parse_transactions(
    method: &str,
    result: &serde_json::Value,
) -> Result<Vec<TransactionRecord>, UpstreamError> {
    let transactions = result
        .get("transactions")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| UpstreamError::malformed(method, "missing transactions array"))?;

    Ok(transactions
        .iter()
        .cloned()
        .map(TransactionRecord::from)
        .collect())
}

pub(super) fn parse_server_info(
    method: &str,
    result: serde_json::Value,
) -> Result<ServerInfo, UpstreamError> {
    let info = result
        .get("info")
        .cloned()
        .ok_or_else(|| UpstreamError::malformed(method, "missing info object"))?;
    serde_json::from_value(info)
        .map_err(|e| UpstreamError::malformed(method, format!("invalid {method} result: {e}")))
}
