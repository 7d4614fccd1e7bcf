//! The fungible-token accounting engine
//!
//! Provides a standard fungible-token interface with:
//! - Balances per account, packed into hashed storage cells
//! - Allowances for delegated transfers, with an unlimited sentinel
//! - Transfer, approve, and delegated-transfer operations
//! - An ordered event log of committed operations
//!
//! # Example
//!
//! ```
//! use token_ledger::ledger::{Address, Ledger};
//! use primitive_types::U256;
//!
//! let deployer = Address::from([1u8; 20]);
//! let recipient = Address::from([2u8; 20]);
//!
//! let mut ledger = Ledger::new(deployer, U256::from(1000), "Tok", "TOK").unwrap();
//! ledger.transfer(deployer, recipient, U256::from(400)).unwrap();
//!
//! assert_eq!(ledger.balance_of(recipient), U256::from(400));
//! assert_eq!(ledger.total_supply(), U256::from(1000));
//! ```

pub mod address;
pub mod events;
pub mod ledger;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use events::{ApprovalEvent, LedgerEvent, TransferEvent};
pub use ledger::{Ledger, LedgerError, DECIMALS};
