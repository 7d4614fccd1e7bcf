//! Token-Ledger: a fungible-token ledger with bit-packed storage cells
//!
//! This crate provides a complete token accounting engine featuring:
//! - Fixed-supply fungible token with 18 decimals
//! - Balances and allowances packed into 256-bit storage cells, with a
//!   touched flag that keeps written-as-zero cells distinct from
//!   never-written ones
//! - Short display strings (name, symbol) packed into single cells
//! - Storage cells addressed by SHA-256 of domain-tagged logical keys
//! - Atomic operations: validate, stage into a write batch, commit
//! - Delegated spending with an unlimited-allowance sentinel
//! - Ordered Transfer/Approval event log
//! - JSON snapshot persistence
//!
//! Transport, caller authentication, and calldata dispatch belong to an
//! external call router; the engine takes authenticated addresses as
//! explicit parameters.
//!
//! # Example
//!
//! ```
//! use token_ledger::{Address, Ledger};
//! use primitive_types::U256;
//!
//! let deployer = Address::from([1u8; 20]);
//! let alice = Address::from([2u8; 20]);
//! let bob = Address::from([3u8; 20]);
//!
//! // Deploy: the whole supply is minted to the deployer
//! let mut ledger = Ledger::new(deployer, U256::from(1_000_000), "My Token", "MTK").unwrap();
//!
//! // Direct transfer
//! ledger.transfer(deployer, alice, U256::from(1000)).unwrap();
//!
//! // Delegated transfer
//! ledger.approve(deployer, bob, U256::from(500)).unwrap();
//! ledger.transfer_from(bob, deployer, alice, U256::from(500)).unwrap();
//!
//! assert_eq!(ledger.balance_of(alice), U256::from(1500));
//! assert_eq!(ledger.allowance(deployer, bob), U256::zero());
//! ```

pub mod crypto;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use ledger::{
    Address, AddressError, ApprovalEvent, Ledger, LedgerError, LedgerEvent, TransferEvent,
    DECIMALS,
};
pub use storage::{
    CellError, CellKey, CellStore, ShortString, Storage, StorageConfig, StorageError, WriteBatch,
};
