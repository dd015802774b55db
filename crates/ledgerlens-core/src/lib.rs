pub mod address;
pub mod cache;
pub mod error;
pub mod explorer;
mod http;
pub mod ledger;
pub mod price;
pub mod types;

#[cfg(test)]
mod test_util;

pub use address::Address;
pub use error::{ExplorerError, UpstreamError, UpstreamErrorKind, ValidationError};
pub use explorer::{ExplorerConfig, WalletExplorer};
pub use types::{TransactionRecord, WalletSnapshot};
