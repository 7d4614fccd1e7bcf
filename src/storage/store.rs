//! Keyed cell store with buffered writes
//!
//! `CellStore` is the persistent mapping from cell identities to raw
//! 256-bit cells. `WriteBatch` buffers the writes of one operation:
//! reads fall through the batch to the store, staged writes become
//! visible to later reads in the same operation, and nothing reaches
//! the store until `commit`. Dropping a batch discards it, so an
//! aborted operation leaves no trace.

use crate::storage::keys::CellKey;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The persistent cell store
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellStore {
    cells: HashMap<CellKey, U256>,
}

impl CellStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw cell read; absent cells read as zero
    pub fn get(&self, key: &CellKey) -> U256 {
        self.cells.get(key).copied().unwrap_or_else(U256::zero)
    }

    /// Raw cell write
    pub fn set(&mut self, key: CellKey, value: U256) {
        self.cells.insert(key, value);
    }

    /// Whether a cell has ever been written
    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Number of cells ever written
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has ever been written
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Buffered writes for a single atomic operation
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: HashMap<CellKey, U256>,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Read through the batch: staged writes shadow the store
    pub fn get(&self, store: &CellStore, key: &CellKey) -> U256 {
        match self.writes.get(key) {
            Some(value) => *value,
            None => store.get(key),
        }
    }

    /// Stage a write
    pub fn set(&mut self, key: CellKey, value: U256) {
        self.writes.insert(key, value);
    }

    /// Number of staged writes
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether the batch stages nothing
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Apply every staged write to the store
    pub fn commit(self, store: &mut CellStore) {
        for (key, value) in self.writes {
            store.set(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys::balance_key;

    #[test]
    fn test_absent_cell_reads_zero() {
        let store = CellStore::new();
        let key = balance_key(b"nobody");
        assert_eq!(store.get(&key), U256::zero());
        assert!(!store.contains(&key));
    }

    #[test]
    fn test_set_get() {
        let mut store = CellStore::new();
        let key = balance_key(b"alice");
        store.set(key, U256::from(42));
        assert_eq!(store.get(&key), U256::from(42));
        assert!(store.contains(&key));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_batch_reads_through_to_store() {
        let mut store = CellStore::new();
        let key = balance_key(b"alice");
        store.set(key, U256::from(7));

        let batch = WriteBatch::new();
        assert_eq!(batch.get(&store, &key), U256::from(7));
    }

    #[test]
    fn test_staged_write_shadows_store() {
        let mut store = CellStore::new();
        let key = balance_key(b"alice");
        store.set(key, U256::from(7));

        let mut batch = WriteBatch::new();
        batch.set(key, U256::from(9));
        assert_eq!(batch.get(&store, &key), U256::from(9));

        // Store untouched until commit
        assert_eq!(store.get(&key), U256::from(7));
    }

    #[test]
    fn test_commit_applies_all_writes() {
        let mut store = CellStore::new();
        let a = balance_key(b"alice");
        let b = balance_key(b"bob");

        let mut batch = WriteBatch::new();
        batch.set(a, U256::from(1));
        batch.set(b, U256::from(2));
        batch.commit(&mut store);

        assert_eq!(store.get(&a), U256::from(1));
        assert_eq!(store.get(&b), U256::from(2));
    }

    #[test]
    fn test_dropped_batch_leaves_no_trace() {
        let mut store = CellStore::new();
        let key = balance_key(b"alice");
        store.set(key, U256::from(5));

        {
            let mut batch = WriteBatch::new();
            batch.set(key, U256::from(100));
            // dropped without commit
        }

        assert_eq!(store.get(&key), U256::from(5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_serde_roundtrip() {
        let mut store = CellStore::new();
        store.set(balance_key(b"alice"), U256::from(123));
        store.set(balance_key(b"bob"), U256::MAX);

        let json = serde_json::to_string(&store).unwrap();
        let back: CellStore = serde_json::from_str(&json).unwrap();
        assert_eq!(store, back);
    }
}
