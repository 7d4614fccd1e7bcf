//! Packed storage layout and persistence
//!
//! This module provides:
//! - Packed cell codecs (amounts with a touched flag, short strings)
//! - Deterministic cell-key derivation from logical keys
//! - The keyed cell store with buffered, atomic write batches
//! - JSON snapshot persistence

pub mod cell;
pub mod keys;
pub mod persistence;
pub mod store;

pub use cell::{
    decode_amount, encode_amount, is_touched, max_amount, string_return_data, unlimited,
    CellError, ShortString, MAX_STRING_LEN,
};
pub use keys::{allowance_key, balance_key, name_key, symbol_key, total_supply_key, CellKey};
pub use persistence::{load_from_file, save_to_file, Storage, StorageConfig, StorageError};
pub use store::{CellStore, WriteBatch};
