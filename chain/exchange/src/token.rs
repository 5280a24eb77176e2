//! External fungible-token collaborator
//!
//! The exchange never mutates token state directly; it only calls through the
//! `TokenTransfer` seam. `Token` is the in-crate reference implementation
//! with allowance semantics: a holder `approve`s a spender, and the spender's
//! `transfer_from` consumes allowance as it moves balance.
//!
//! Caller identity is an explicit parameter on every mutating call — the
//! caller is whoever the embedding boundary authenticated, never ambient
//! state.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::{AccountId, AssetId};

use crate::errors::TokenError;

/// The transfer surface the exchange consumes from an external token.
pub trait TokenTransfer {
    /// The asset this token contract represents.
    fn asset_id(&self) -> &AssetId;

    /// Pull-transfer: `caller` (the spender) moves `quantity` from `from` to
    /// `to`, consuming `from`'s allowance for `caller`.
    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        quantity: Decimal,
    ) -> Result<(), TokenError>;

    /// Push-transfer: `caller` moves `quantity` of its own balance to `to`.
    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        quantity: Decimal,
    ) -> Result<(), TokenError>;

    /// Current balance of `holder` in the token's own ledger.
    fn balance_of(&self, holder: &AccountId) -> Decimal;
}

/// In-memory fungible token with balances and consumable allowances.
#[derive(Debug, Clone)]
pub struct Token {
    asset_id: AssetId,
    balances: HashMap<AccountId, Decimal>,
    /// (owner, spender) -> remaining approved quantity
    allowances: HashMap<(AccountId, AccountId), Decimal>,
}

impl Token {
    /// Create a token minting the full starting supply to `issuer`.
    pub fn new(asset_id: AssetId, issuer: AccountId, supply: Decimal) -> Self {
        let mut balances = HashMap::new();
        balances.insert(issuer, supply);
        Self {
            asset_id,
            balances,
            allowances: HashMap::new(),
        }
    }

    /// Approve `spender` to pull up to `quantity` from `caller`'s balance.
    ///
    /// Overwrites any prior approval for the (caller, spender) pair.
    pub fn approve(&mut self, caller: AccountId, spender: AccountId, quantity: Decimal) {
        self.allowances.insert((caller, spender), quantity);
    }

    /// Remaining approved quantity for a (owner, spender) pair.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Decimal {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Move balance with both sides computed before either commits, so a
    /// failed transfer never leaves a half-applied mutation.
    fn move_balance(
        &mut self,
        from: AccountId,
        to: AccountId,
        quantity: Decimal,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(&from);
        if from_balance < quantity {
            return Err(TokenError::InsufficientBalance {
                required: quantity.to_string(),
                available: from_balance.to_string(),
            });
        }

        if from == to {
            return Ok(());
        }

        let debited = from_balance
            .checked_sub(quantity)
            .ok_or(TokenError::Overflow)?;
        let credited = self
            .balance_of(&to)
            .checked_add(quantity)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(from, debited);
        self.balances.insert(to, credited);
        Ok(())
    }
}

impl TokenTransfer for Token {
    fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        quantity: Decimal,
    ) -> Result<(), TokenError> {
        let approved = self.allowance(&from, &caller);
        if approved < quantity {
            return Err(TokenError::InsufficientAllowance {
                required: quantity.to_string(),
                approved: approved.to_string(),
            });
        }

        self.move_balance(from, to, quantity)?;

        // Allowance is consumed only once the transfer succeeded
        self.allowances.insert((from, caller), approved - quantity);
        Ok(())
    }

    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        quantity: Decimal,
    ) -> Result<(), TokenError> {
        self.move_balance(caller, to, quantity)
    }

    fn balance_of(&self, holder: &AccountId) -> Decimal {
        self.balances.get(holder).copied().unwrap_or(Decimal::ZERO)
    }
}
