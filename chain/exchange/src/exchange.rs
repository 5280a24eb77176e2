//! Exchange — escrow accounting, sale listings, and atomic settlement
//!
//! The exchange is a single state machine over two maps:
//! - escrow balances by (holder, asset), credited only against a successful
//!   external pull-transfer and debited only against a push-transfer or an
//!   internal re-attribution;
//! - sale listings by (seller, asset), intent records that never lock the
//!   underlying balance.
//!
//! Every operation either fully commits or leaves all state (ledger, token,
//! coin) at its pre-call values. Internal state is mutated before any
//! external call-out; a failed call-out is compensated before returning.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::{AccountId, AssetId};
use types::listing::Listing;

use crate::coin::CoinLedger;
use crate::errors::ExchangeError;
use crate::events::{
    ExchangeEvent, TokenDeposited, TokenWithdrawn, TokensListed, TradeSettled,
};
use crate::security::ReentrancyGuard;
use crate::token::TokenTransfer;

/// Custodial exchange ledger.
///
/// Balances are stored as `HashMap<AccountId, HashMap<AssetId, Decimal>>`;
/// listings mirror that shape with `Listing` values. The `custodian` account
/// is the exchange's own identity in external token contracts — deposited
/// tokens sit under it until withdrawn.
#[derive(Debug)]
pub struct Exchange {
    /// The exchange's account in external token/coin ledgers
    custodian: AccountId,
    /// Escrow balances: holder -> (asset -> quantity)
    balances: HashMap<AccountId, HashMap<AssetId, Decimal>>,
    /// Sale listings: seller -> (asset -> listing)
    listings: HashMap<AccountId, HashMap<AssetId, Listing>>,
    /// Security: reentrancy guard
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ExchangeEvent>,
}

impl Exchange {
    /// Create a new exchange with a fresh custodian identity.
    pub fn new() -> Self {
        Self::with_custodian(AccountId::new())
    }

    /// Create a new exchange custodying assets under the given account.
    pub fn with_custodian(custodian: AccountId) -> Self {
        Self {
            custodian,
            balances: HashMap::new(),
            listings: HashMap::new(),
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    /// The exchange's own account in external ledgers.
    pub fn custodian(&self) -> AccountId {
        self.custodian
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Deposit tokens into escrow for `caller`.
    ///
    /// Pulls `quantity` from the caller's external token account via
    /// `transfer_from` (the caller must have approved the custodian first),
    /// then credits the caller's escrow balance. The credit headroom is
    /// checked before the pull so a failed credit can never strand tokens.
    pub fn deposit<T: TokenTransfer>(
        &mut self,
        token: &mut T,
        caller: AccountId,
        quantity: Decimal,
    ) -> Result<ExchangeEvent, ExchangeError> {
        self.check_reentrancy()?;

        if quantity <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InvalidQuantity);
        }

        let asset = token.asset_id().clone();
        let credited = match self.get_balance(&caller, &asset).checked_add(quantity) {
            Some(v) => v,
            None => {
                self.reentrancy_guard.release();
                return Err(ExchangeError::Overflow);
            }
        };

        // External pull. On failure nothing was credited and nothing moved.
        if let Err(e) = token.transfer_from(self.custodian, caller, self.custodian, quantity) {
            self.reentrancy_guard.release();
            return Err(ExchangeError::Token(e));
        }

        self.set_balance(caller, asset.clone(), credited);

        let event = ExchangeEvent::TokenDeposited(TokenDeposited {
            account_id: caller,
            asset,
            quantity,
        });

        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── List for sale ─────────────────────────

    /// Record a fixed-price sale listing for `caller`.
    ///
    /// Requires the caller's current escrow balance to cover `quantity`, but
    /// moves and reserves nothing — the authoritative re-check happens at
    /// settlement time. Overwrites any prior listing for the same asset.
    pub fn list_for_sale(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<ExchangeEvent, ExchangeError> {
        self.check_reentrancy()?;

        if quantity <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InvalidQuantity);
        }

        let available = self.get_balance(&caller, &asset);
        if available < quantity {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InsufficientBalance {
                asset: asset.to_string(),
                required: quantity.to_string(),
                available: available.to_string(),
            });
        }

        let listing = Listing::new(quantity, unit_price);
        // Reject listings whose total price cannot be settled
        if listing.total_price().is_none() {
            self.reentrancy_guard.release();
            return Err(ExchangeError::Overflow);
        }

        self.listings
            .entry(caller)
            .or_default()
            .insert(asset.clone(), listing);

        let event = ExchangeEvent::TokensListed(TokensListed {
            seller: caller,
            asset,
            quantity,
            unit_price,
        });

        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Buy ─────────────────────────

    /// Settle a purchase against `seller`'s listing.
    ///
    /// Exact-match policy: `quantity` must equal the listed quantity and
    /// `payment` must equal `quantity × unit_price` exactly. The seller's
    /// live balance is re-validated independently of the stored listing,
    /// since the seller may have withdrawn since listing.
    ///
    /// On success the escrow moves commit first, then the payment is
    /// forwarded buyer→seller through `coin`. A forwarding failure rolls the
    /// escrow moves back, so the call is atomic end to end. The stored
    /// listing is left untouched.
    pub fn buy(
        &mut self,
        coin: &mut CoinLedger,
        caller: AccountId,
        seller: AccountId,
        asset: AssetId,
        quantity: Decimal,
        payment: Decimal,
    ) -> Result<ExchangeEvent, ExchangeError> {
        self.check_reentrancy()?;

        let listing = match self
            .listings
            .get(&seller)
            .and_then(|assets| assets.get(&asset))
        {
            Some(l) => *l,
            None => {
                self.reentrancy_guard.release();
                return Err(ExchangeError::ListingNotFound {
                    seller: seller.to_string(),
                    asset: asset.to_string(),
                });
            }
        };

        if quantity != listing.quantity {
            self.reentrancy_guard.release();
            return Err(ExchangeError::QuantityMismatch {
                listed: listing.quantity.to_string(),
                requested: quantity.to_string(),
            });
        }

        let seller_balance = self.get_balance(&seller, &asset);
        if seller_balance < quantity {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InsufficientBalance {
                asset: asset.to_string(),
                required: quantity.to_string(),
                available: seller_balance.to_string(),
            });
        }

        let expected = match listing.total_price() {
            Some(p) => p,
            None => {
                self.reentrancy_guard.release();
                return Err(ExchangeError::Overflow);
            }
        };
        if payment != expected {
            self.reentrancy_guard.release();
            return Err(ExchangeError::PaymentMismatch {
                expected: expected.to_string(),
                attached: payment.to_string(),
            });
        }

        // Commit the escrow re-attribution before the external payment call.
        // The debit lands first so the buyer-side read stays correct when the
        // buyer and seller are the same account.
        self.set_balance(seller, asset.clone(), seller_balance - quantity);
        let buyer_balance = self.get_balance(&caller, &asset);
        let buyer_credited = match buyer_balance.checked_add(quantity) {
            Some(v) => v,
            None => {
                self.set_balance(seller, asset.clone(), seller_balance);
                self.reentrancy_guard.release();
                return Err(ExchangeError::Overflow);
            }
        };
        self.set_balance(caller, asset.clone(), buyer_credited);

        // Forward the attached payment to the seller
        if let Err(e) = coin.transfer(caller, seller, payment) {
            // Roll the escrow moves back: whole-call atomicity
            self.set_balance(caller, asset.clone(), buyer_balance);
            self.set_balance(seller, asset.clone(), seller_balance);
            self.reentrancy_guard.release();
            return Err(ExchangeError::Token(e));
        }

        let event = ExchangeEvent::TradeSettled(TradeSettled {
            buyer: caller,
            seller,
            asset,
            quantity,
            payment,
        });

        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Withdraw escrowed tokens back to `caller`'s external account.
    ///
    /// The escrow debit lands before the external push-transfer, so a
    /// re-entrant call can never observe a stale, not-yet-debited balance.
    /// A push failure restores the debit before returning.
    pub fn withdraw<T: TokenTransfer>(
        &mut self,
        token: &mut T,
        caller: AccountId,
        quantity: Decimal,
    ) -> Result<ExchangeEvent, ExchangeError> {
        self.check_reentrancy()?;

        if quantity <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InvalidQuantity);
        }

        let asset = token.asset_id().clone();
        let current = self.get_balance(&caller, &asset);
        if current < quantity {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InsufficientBalance {
                asset: asset.to_string(),
                required: quantity.to_string(),
                available: current.to_string(),
            });
        }

        // Debit first, then call out
        self.set_balance(caller, asset.clone(), current - quantity);

        if let Err(e) = token.transfer(self.custodian, caller, quantity) {
            // Restore the debit: whole-call atomicity
            self.set_balance(caller, asset.clone(), current);
            self.reentrancy_guard.release();
            return Err(ExchangeError::Token(e));
        }

        let event = ExchangeEvent::TokenWithdrawn(TokenWithdrawn {
            account_id: caller,
            asset,
            quantity,
        });

        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Escrow balance for a (holder, asset) pair. Zero for absent entries.
    pub fn get_balance(&self, holder: &AccountId, asset: &AssetId) -> Decimal {
        self.balances
            .get(holder)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Active listing for a (seller, asset) pair, if any.
    pub fn get_listing(&self, seller: &AccountId, asset: &AssetId) -> Option<&Listing> {
        self.listings
            .get(seller)
            .and_then(|assets| assets.get(asset))
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internals ─────────────────────────

    fn set_balance(&mut self, holder: AccountId, asset: AssetId, quantity: Decimal) {
        self.balances
            .entry(holder)
            .or_default()
            .insert(asset, quantity);
    }

    fn check_reentrancy(&mut self) -> Result<(), ExchangeError> {
        if !self.reentrancy_guard.acquire() {
            return Err(ExchangeError::Reentrancy);
        }
        Ok(())
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
