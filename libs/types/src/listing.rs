//! Fixed-price sale listing type
//!
//! A listing is a seller's intent to sell a quantity of escrowed tokens at a
//! fixed unit price. It holds no lock over the seller's balance: the escrowed
//! quantity stays independently withdrawable, and the effective offer is
//! always capped by the seller's live balance at settlement time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-price sale listing for one (seller, asset) pair.
///
/// At most one listing is active per pair; re-listing overwrites the prior
/// entry. The listing is an intent record, not a reservation — settlement
/// re-validates against the seller's current balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Quantity offered for sale
    pub quantity: Decimal,
    /// Price per unit in native currency
    pub unit_price: Decimal,
}

impl Listing {
    /// Create a new listing
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// Total payment required to buy the full listed quantity.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn total_price(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}
