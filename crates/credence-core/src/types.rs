use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrustError;

/// Monotonic height supplied by the host; stands in for a timestamp.
pub type Height = u64;

/// Externally assigned institution identifier.
pub type InstitutionId = u64;

/// Sequential credential identifier, starting at 1.
pub type CredentialId = u64;

/// Sequential fraud report identifier, starting at 1.
pub type ReportId = u64;

/// Sequential suspicious pattern identifier, starting at 1.
pub type PatternId = u64;

/// Id following `last` in a sequential id space.
///
/// Fails with `CounterExhausted` instead of wrapping back to an id in use.
pub fn next_id(last: u64, kind: &'static str) -> Result<u64, TrustError> {
    last.checked_add(1).ok_or(TrustError::CounterExhausted(kind))
}

/// Identity of a caller, an admin or an institution delegate.
///
/// The format is owned by the host platform (e.g. `ST1PQHQKV0...`); the only
/// requirement here is a non-empty string without whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Returned when an address string is empty or contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address: {0:?}")]
pub struct InvalidAddress(pub String);

impl Address {
    /// Create an address, rejecting empty or whitespace-containing input.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidAddress> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(InvalidAddress(value));
        }
        Ok(Self(value))
    }

    /// Get the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = InvalidAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-call context handed in by the transaction-submission layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Identity that submitted the call.
    pub caller: Address,
    /// Current height at which the call executes.
    pub height: Height,
}

impl CallContext {
    /// Context for a call by `caller` at `height`.
    pub fn new(caller: Address, height: Height) -> Self {
        Self { caller, height }
    }
}
