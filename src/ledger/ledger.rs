//! The accounting engine
//!
//! Tracks balances, allowances, and total supply in packed storage
//! cells, and applies the validated state transitions: construction
//! (the one-time mint), transfer, approve, and delegated transfer.
//!
//! Every mutating operation is atomic: validation happens against the
//! committed state, tentative writes are staged in a [`WriteBatch`],
//! and the batch commits only after every check has passed. An abort
//! returns `Err` with the store and event log untouched.
//!
//! Callers are identified by explicit `sender`/`owner`/`spender`
//! parameters; authenticating them is the call router's job.

use crate::ledger::address::Address;
use crate::ledger::events::{ApprovalEvent, LedgerEvent, TransferEvent};
use crate::storage::cell::{self, CellError, ShortString};
use crate::storage::keys;
use crate::storage::store::{CellStore, WriteBatch};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places of the token amount, fixed for every ledger
pub const DECIMALS: u8 = 18;

/// Accounting errors
///
/// Every variant is a hard abort: the operation takes no effect and
/// emits nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: U256, need: U256 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: U256, need: U256 },
    #[error("Transfer to the zero address")]
    ZeroRecipient,
    #[error("Initial supply must be greater than zero")]
    ZeroSupply,
    #[error("Amount does not fit in 255 bits")]
    AmountOverflow,
    #[error("Invalid display string: {0}")]
    InvalidString(#[from] CellError),
}

/// A fungible-token ledger
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    store: CellStore,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Deploy a new ledger, minting the entire supply to `deployer`
    ///
    /// Validation failures abort the whole deployment: no state is
    /// created and no ledger value exists.
    pub fn new(
        deployer: Address,
        initial_supply: U256,
        name: &str,
        symbol: &str,
    ) -> Result<Self, LedgerError> {
        if initial_supply.is_zero() {
            return Err(LedgerError::ZeroSupply);
        }
        if initial_supply.bit(255) {
            return Err(LedgerError::AmountOverflow);
        }
        let name = ShortString::new(name)?;
        let symbol = ShortString::new(symbol)?;

        let mut store = CellStore::new();
        store.set(keys::name_key(), name.encode());
        store.set(keys::symbol_key(), symbol.encode());
        // Total supply is written once and never re-read for
        // mutation, so it is stored plain rather than packed.
        store.set(keys::total_supply_key(), initial_supply);
        store.set(
            keys::balance_key(deployer.as_bytes()),
            cell::encode_amount(initial_supply),
        );

        let events = vec![LedgerEvent::Transfer(TransferEvent {
            from: Address::ZERO,
            to: deployer,
            amount: initial_supply,
        })];

        log::info!(
            "Ledger deployed by {}: {} ({}), supply {}",
            deployer,
            name,
            symbol,
            initial_supply
        );

        Ok(Self { store, events })
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    /// Token name
    pub fn name(&self) -> String {
        ShortString::decode(self.name_cell())
    }

    /// Token symbol
    pub fn symbol(&self) -> String {
        ShortString::decode(self.symbol_cell())
    }

    /// The raw packed name cell
    pub fn name_cell(&self) -> U256 {
        self.store.get(&keys::name_key())
    }

    /// The raw packed symbol cell
    pub fn symbol_cell(&self) -> U256 {
        self.store.get(&keys::symbol_key())
    }

    /// The name as a fixed-size self-describing return buffer
    pub fn name_return_data(&self) -> [u8; 64] {
        cell::string_return_data(self.name_cell())
    }

    /// The symbol as a fixed-size self-describing return buffer
    pub fn symbol_return_data(&self) -> [u8; 64] {
        cell::string_return_data(self.symbol_cell())
    }

    /// Decimal places
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Total supply, constant after deployment
    pub fn total_supply(&self) -> U256 {
        self.store.get(&keys::total_supply_key())
    }

    /// Balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        cell::decode_amount(self.store.get(&keys::balance_key(account.as_bytes())))
    }

    /// Remaining allowance of a spender over an owner's balance
    ///
    /// An unlimited allowance decodes to the maximum representable
    /// amount, `2^255 - 1`.
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        cell::decode_amount(
            self.store
                .get(&keys::allowance_key(owner.as_bytes(), spender.as_bytes())),
        )
    }

    /// The ordered event log, grown only by committed operations
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Move `amount` from `sender` to `recipient`
    ///
    /// # Arguments
    /// * `sender` - Authenticated sending account
    /// * `recipient` - Receiving account, must not be the zero address
    /// * `amount` - Amount to move; must not exceed the sender balance
    pub fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        if recipient.is_zero() {
            return Err(LedgerError::ZeroRecipient);
        }

        let mut batch = WriteBatch::new();
        self.debit(&mut batch, sender, amount)?;
        self.credit(&mut batch, recipient, amount);
        batch.commit(&mut self.store);

        let event = TransferEvent {
            from: sender,
            to: recipient,
            amount,
        };
        self.events.push(LedgerEvent::Transfer(event.clone()));
        Ok(event)
    }

    /// Set the allowance of `spender` over `owner`'s balance
    ///
    /// Overwrites the previous allowance rather than adjusting it;
    /// concurrent approvals from the same owner race last-write-wins,
    /// which is the documented contract of this interface. Passing the
    /// all-ones amount grants an unlimited allowance that is never
    /// decremented by use.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        if amount.bit(255) && amount != cell::unlimited() {
            return Err(LedgerError::AmountOverflow);
        }

        self.store.set(
            keys::allowance_key(owner.as_bytes(), spender.as_bytes()),
            cell::encode_amount(amount),
        );

        let event = ApprovalEvent {
            owner,
            spender,
            amount,
        };
        self.events.push(LedgerEvent::Approval(event.clone()));
        Ok(event)
    }

    /// Move `amount` from `owner` to `recipient` on behalf of `spender`
    ///
    /// Requires a prior approval. Limited allowances are decremented
    /// and the remainder announced with an Approval event; unlimited
    /// allowances are left untouched and announce nothing.
    ///
    /// # Arguments
    /// * `spender` - Authenticated account spending the allowance
    /// * `owner` - Account whose balance is debited
    /// * `recipient` - Receiving account, must not be the zero address
    /// * `amount` - Amount to move; bounded by both allowance and balance
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        if recipient.is_zero() {
            return Err(LedgerError::ZeroRecipient);
        }

        let allowance_key = keys::allowance_key(owner.as_bytes(), spender.as_bytes());
        let allowance_cell = self.store.get(&allowance_key);
        let allowed = cell::decode_amount(allowance_cell);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        let mut batch = WriteBatch::new();
        self.debit(&mut batch, owner, amount)?;
        self.credit(&mut batch, recipient, amount);

        // The unlimited sentinel lives in the raw cell, not the
        // decoded amount; it is exempt from decrement-on-use.
        let approval = if allowance_cell == cell::unlimited() {
            None
        } else {
            let remaining = allowed - amount;
            batch.set(allowance_key, cell::encode_amount(remaining));
            Some(ApprovalEvent {
                owner,
                spender,
                amount: remaining,
            })
        };

        batch.commit(&mut self.store);

        if let Some(approval) = approval {
            self.events.push(LedgerEvent::Approval(approval));
        }
        let event = TransferEvent {
            from: owner,
            to: recipient,
            amount,
        };
        self.events.push(LedgerEvent::Transfer(event.clone()));
        Ok(event)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Stage a balance decrease, checking funds against staged state
    fn debit(
        &self,
        batch: &mut WriteBatch,
        account: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let key = keys::balance_key(account.as_bytes());
        let balance = cell::decode_amount(batch.get(&self.store, &key));
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }
        batch.set(key, cell::encode_amount(balance - amount));
        Ok(())
    }

    /// Stage a balance increase
    ///
    /// No range check: the conservation invariant bounds every balance
    /// by the total supply, which fits 255 bits by construction.
    fn credit(&self, batch: &mut WriteBatch, account: Address, amount: U256) {
        let key = keys::balance_key(account.as_bytes());
        let balance = cell::decode_amount(batch.get(&self.store, &key));
        batch.set(key, cell::encode_amount(balance + amount));
    }
}
