//! Ledger account addresses.
//!
//! Addresses are opaque 20-byte identifiers rendered as `0x`-prefixed hex
//! (40 hex digits). Formatting and parsing round-trip, and the string form
//! is what appears in config files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// An account address on the token ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address. Never a valid fee wallet.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes.
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw byte view.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// True for [`Address::ZERO`].
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Failure to parse an address string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed address {input:?}: expected 0x followed by 40 hex digits")]
pub struct ParseAddressError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseAddressError {
            input: s.to_string(),
        };

        let digits = s.strip_prefix("0x").ok_or_else(malformed)?;
        let bytes = hex::decode(digits).map_err(|_| malformed())?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| malformed())?;

        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
