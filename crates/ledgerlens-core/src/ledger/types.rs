//! RPC-specific types that do not belong to the shared domain model.

use serde::Deserialize;

// ==============================================================================
// Server Info
// ==============================================================================

/// Subset of `server_info` output (`result.info`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    #[serde(default)]
    pub build_version: String,
    #[serde(default)]
    pub complete_ledgers: String,
    #[serde(default)]
    pub server_state: String,
    pub validated_ledger: Option<ValidatedLedger>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatedLedger {
    pub seq: u64,
}
