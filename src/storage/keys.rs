//! Storage cell identity derivation
//!
//! Logical keys (a single account, an ordered account pair, or one of
//! the fixed singleton cells) map to uniform 32-byte cell identities
//! via SHA-256 over a domain-tagged serialization of the key bytes.
//! Hashing keeps lookup uniform and collision-resistant without any
//! dynamic allocation of key material.

use crate::crypto::hash::sha256_parts;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Domain tags, one per cell family
const TOTAL_SUPPLY_TAG: u8 = 0x00;
const NAME_TAG: u8 = 0x01;
const SYMBOL_TAG: u8 = 0x02;
const BALANCE_TAG: u8 = 0x03;
const ALLOWANCE_TAG: u8 = 0x04;

/// Identity of a storage cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey([u8; 32]);

impl CellKey {
    /// The raw 32-byte identity
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// Cell keys serialize as hex strings so they can act as JSON map keys.
impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| D::Error::custom("cell key must be 32 bytes"))?;
        Ok(CellKey(raw))
    }
}

/// The global total supply cell
pub fn total_supply_key() -> CellKey {
    CellKey(sha256_parts(&[&[TOTAL_SUPPLY_TAG]]))
}

/// The token name cell
pub fn name_key() -> CellKey {
    CellKey(sha256_parts(&[&[NAME_TAG]]))
}

/// The token symbol cell
pub fn symbol_key() -> CellKey {
    CellKey(sha256_parts(&[&[SYMBOL_TAG]]))
}

/// The balance cell for an account
pub fn balance_key(account: &[u8]) -> CellKey {
    CellKey(sha256_parts(&[&[BALANCE_TAG], account]))
}

/// The allowance cell for an ordered (owner, spender) pair
pub fn allowance_key(owner: &[u8], spender: &[u8]) -> CellKey {
    CellKey(sha256_parts(&[&[ALLOWANCE_TAG], owner, spender]))
}
