//! Syntactic validation of XRP Ledger classic addresses.
//!
//! Validation is purely lexical (no checksum decoding) and runs before any
//! network call, so malformed input never reaches an upstream or the cache.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// `r` followed by 25-34 characters of the ripple base58 alphabet, which
/// omits `0`, `O`, `I` and `l`.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{25,34}$").expect("static address pattern compiles")
});

/// A validated ledger account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !ADDRESS_PATTERN.is_match(input) {
            return Err(ValidationError::Malformed(input.to_owned()));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-function form of [`Address::parse`].
pub fn validate(input: &str) -> Result<Address, ValidationError> {
    Address::parse(input)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
