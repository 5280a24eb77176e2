//! Native-currency ledger
//!
//! Models the payment value attached to a `buy` call and its forwarding to
//! the seller. In the original execution environment this is the native
//! currency carried by the call itself; here it is an explicit collaborator
//! the exchange transfers through after its own state has committed.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::AccountId;

use crate::errors::TokenError;

/// Native-currency account balances.
#[derive(Debug, Clone, Default)]
pub struct CoinLedger {
    balances: HashMap<AccountId, Decimal>,
}

impl CoinLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account (funding; used by tests and the deposit boundary).
    pub fn credit(&mut self, holder: AccountId, amount: Decimal) -> Result<(), TokenError> {
        let current = self.balances.entry(holder).or_insert(Decimal::ZERO);
        *current = current.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Both sides are computed before either commits, so a failed transfer
    /// never leaves a half-applied mutation.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TokenError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount.to_string(),
                available: available.to_string(),
            });
        }

        if from == to {
            return Ok(());
        }

        let remaining = available.checked_sub(amount).ok_or(TokenError::Overflow)?;
        let credited = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }

    /// Current balance of `holder`.
    pub fn balance_of(&self, holder: &AccountId) -> Decimal {
        self.balances.get(holder).copied().unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_balance() {
        let mut coin = CoinLedger::new();
        let acc = AccountId::new();
        coin.credit(acc, Decimal::from(500)).unwrap();
        assert_eq!(coin.balance_of(&acc), Decimal::from(500));
    }

    #[test]
    fn test_transfer_moves_funds() {
        let mut coin = CoinLedger::new();
        let payer = AccountId::new();
        let payee = AccountId::new();
        coin.credit(payer, Decimal::from(200)).unwrap();

        coin.transfer(payer, payee, Decimal::from(150)).unwrap();
        assert_eq!(coin.balance_of(&payer), Decimal::from(50));
        assert_eq!(coin.balance_of(&payee), Decimal::from(150));
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let mut coin = CoinLedger::new();
        let payer = AccountId::new();
        let payee = AccountId::new();
        coin.credit(payer, Decimal::from(100)).unwrap();

        let result = coin.transfer(payer, payee, Decimal::from(101));
        assert!(matches!(result, Err(TokenError::InsufficientBalance { .. })));
        assert_eq!(coin.balance_of(&payer), Decimal::from(100));
        assert_eq!(coin.balance_of(&payee), Decimal::ZERO);
    }

    #[test]
    fn test_balance_of_unknown_account() {
        let coin = CoinLedger::new();
        assert_eq!(coin.balance_of(&AccountId::new()), Decimal::ZERO);
    }
}
