//! Ledger events
//!
//! Successful mutating operations append events to an ordered log for
//! external observers. Position in the log is the ordering; events are
//! never emitted for aborted operations.

use crate::ledger::address::Address;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Emitted when tokens move between accounts
///
/// Construction emits one with `from` set to the zero address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// Emitted when an allowance is set or decremented
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

/// An entry in the ledger's append-only event log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
}
