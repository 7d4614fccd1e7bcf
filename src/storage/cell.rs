//! Packed storage cell codecs
//!
//! Every logical value the ledger persists fits in a single 256-bit
//! cell. Two packings are used:
//!
//! - Amounts: `(amount << 1) | 1`. The low bit marks the cell as
//!   touched (written at least once, possibly with a zero amount),
//!   which keeps a balance that returns to zero distinct from a cell
//!   that never existed. Amounts therefore occupy the upper 255 bits.
//! - Short strings: top byte holds the length (0-31), the remaining
//!   31 bytes hold the left-aligned UTF-8 content, zero padded.

use primitive_types::U256;
use thiserror::Error;

/// Maximum byte length of a packed short string
pub const MAX_STRING_LEN: usize = 31;

/// Cell encoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("String too long: {len} bytes (max 31)")]
    StringTooLong { len: usize },
}

/// Largest amount a packed cell can carry: `2^255 - 1`
pub fn max_amount() -> U256 {
    U256::MAX >> 1usize
}

/// The all-ones raw cell, reserved as the unlimited-allowance sentinel
pub fn unlimited() -> U256 {
    U256::MAX
}

/// Packs an amount into a cell, setting the touched bit
pub fn encode_amount(amount: U256) -> U256 {
    (amount << 1usize) | U256::one()
}

/// Recovers the amount from a cell
///
/// An absent cell reads as raw zero and decodes to a zero amount,
/// the same logical value as a touched cell holding zero.
pub fn decode_amount(cell: U256) -> U256 {
    cell >> 1usize
}

/// Whether a raw cell has ever been written
pub fn is_touched(cell: U256) -> bool {
    cell.bit(0)
}

/// A display string bounded to 31 bytes, packable into one cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortString(String);

impl ShortString {
    /// Create a short string, rejecting anything over 31 bytes
    pub fn new(s: &str) -> Result<Self, CellError> {
        if s.len() > MAX_STRING_LEN {
            return Err(CellError::StringTooLong { len: s.len() });
        }
        Ok(Self(s.to_string()))
    }

    /// The underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte length of the content
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Packs the string into a cell: length in the top byte,
    /// content left-aligned below it
    pub fn encode(&self) -> U256 {
        let mut buf = [0u8; 32];
        buf[0] = self.0.len() as u8;
        buf[1..1 + self.0.len()].copy_from_slice(self.0.as_bytes());
        U256::from_big_endian(&buf)
    }

    /// Recovers the string content from a packed cell
    ///
    /// Read projections never fail: a foreign or corrupt cell is
    /// decoded lossily (length clamped to 31, invalid UTF-8 replaced).
    pub fn decode(cell: U256) -> String {
        let mut buf = [0u8; 32];
        cell.to_big_endian(&mut buf);
        let len = (buf[0] as usize).min(MAX_STRING_LEN);
        String::from_utf8_lossy(&buf[1..1 + len]).into_owned()
    }
}

impl std::fmt::Display for ShortString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ShortString {
    type Error = CellError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

/// Renders a packed string cell as the fixed-size self-describing
/// return buffer: one word holding the 0x20 offset marker, then the
/// packed cell verbatim (length byte followed by content).
///
/// Two words are needed because marker, length byte, and up to 31
/// content bytes cannot fit a single 32-byte word.
pub fn string_return_data(cell: U256) -> [u8; 64] {
    let mut buf = [0u8; 64];
    buf[31] = 0x20;
    cell.to_big_endian(&mut buf[32..64]);
    buf
}
