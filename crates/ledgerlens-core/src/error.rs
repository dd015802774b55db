//! Error taxonomy shared by the ledger client, the price client, and the
//! wallet aggregator.
//!
//! [`ValidationError`] is a client fault and never reaches the network.
//! [`UpstreamError`] classifies a failed remote call. [`ExplorerError`] is the
//! only error surfaced by [`crate::WalletExplorer::explore`].

use std::fmt;

use rust_decimal::Decimal;

/// Message carried by [`UpstreamErrorKind::AccountNotFound`] errors.
pub const ACCOUNT_NOT_FOUND_MESSAGE: &str = "address does not exist or was never activated";

// ==============================================================================
// Validation
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("address is required: expected `r` followed by 25-34 base58 characters")]
    Empty,

    #[error(
        "invalid address `{0}`: expected `r` followed by 25-34 base58 characters \
         (alphabet excludes 0, O, I and l)"
    )]
    Malformed(String),
}

// ==============================================================================
// Upstream
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// The endpoint could not be reached at all.
    Connection,
    /// The request was sent but failed in flight (timeout, body read).
    Transport,
    /// The endpoint answered with a non-success HTTP status.
    Status,
    /// The body did not decode into the expected envelope or shape.
    MalformedEnvelope,
    /// The endpoint reported a domain error inside a well-formed envelope.
    Business,
    /// Business error: the account has never been funded on the ledger.
    AccountNotFound,
}

impl UpstreamErrorKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Connection => "network connection error: ",
            Self::Transport => "request error: ",
            Self::Status => "upstream returned an error status: ",
            Self::MalformedEnvelope => "invalid upstream response: ",
            Self::Business => "upstream error: ",
            Self::AccountNotFound => "",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connection => "connection",
            Self::Transport => "transport",
            Self::Status => "status",
            Self::MalformedEnvelope => "malformed_envelope",
            Self::Business => "business",
            Self::AccountNotFound => "account_not_found",
        };
        f.write_str(name)
    }
}

/// A classified failure from one remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{message}", .kind.prefix())]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    /// Name of the originating call, e.g. `account_info`.
    pub method: String,
    pub message: String,
    /// Structured error code reported by the upstream, when it sent one.
    pub code: Option<String>,
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind, method: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            method: method.to_owned(),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn account_not_found(method: &str) -> Self {
        Self::new(
            UpstreamErrorKind::AccountNotFound,
            method,
            ACCOUNT_NOT_FOUND_MESSAGE,
        )
    }

    pub fn malformed(method: &str, message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::MalformedEnvelope, method, message)
    }

    /// Classify a `reqwest` failure so connection problems stay distinguishable
    /// from requests that reached the endpoint and then failed.
    ///
    /// The endpoint URL is stripped from the message: it may carry credentials
    /// and the message is shown to API callers.
    pub fn from_reqwest(method: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_connect() {
            UpstreamErrorKind::Connection
        } else if err.is_decode() {
            UpstreamErrorKind::MalformedEnvelope
        } else {
            UpstreamErrorKind::Transport
        };
        Self::new(kind, method, describe_without_url(err))
    }

    pub fn is_account_not_found(&self) -> bool {
        self.kind == UpstreamErrorKind::AccountNotFound
    }
}

/// Render `err` and its cause chain, e.g.
/// `error sending request: client error (Connect): tcp connect error: Connection refused`.
fn describe_without_url(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ==============================================================================
// Configuration
// ==============================================================================

/// Raised while constructing an upstream client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint `{url}`: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("{0}")]
    InvalidSetting(String),

    #[error("build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

// ==============================================================================
// Explorer
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    InvalidAddress(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// `balance * price` does not fit a `Decimal`, even at the fallback quote.
    #[error("fiat value of {balance} at {price} is out of range")]
    Valuation { balance: Decimal, price: Decimal },
}

impl ExplorerError {
    /// True when the caller supplied bad input; false for server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_))
    }
}
