//! ZeroTier network identifiers.

use serde::{Deserialize, Serialize};

use crate::error::ShareError;

/// Number of hex digits in a network ID (64 bits).
pub const NETWORK_ID_LEN: usize = 16;

/// A 64-bit ZeroTier network ID, stored as 16 lowercase hex digits.
///
/// The first 10 digits are the controller's node address, the last 6 the
/// network number on that controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkId(String);

impl NetworkId {
    /// Parse a network ID. Surrounding whitespace is ignored and upper-case
    /// digits are normalised to lower case.
    pub fn parse(s: &str) -> Result<Self, ShareError> {
        let trimmed = s.trim();
        if trimmed.len() != NETWORK_ID_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ShareError::InvalidNetworkId(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Controller node address (first 10 hex digits).
    pub fn controller(&self) -> &str {
        &self.0[..10]
    }
}

impl std::str::FromStr for NetworkId {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
