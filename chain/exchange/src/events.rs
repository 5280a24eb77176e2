//! Ledger events
//!
//! Events are immutable records emitted by successful ledger operations, one
//! per state transition. The append-only event log is the contract layer's
//! observability surface.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{AccountId, AssetId};

/// Tokens pulled from a holder's external account into escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeposited {
    pub account_id: AccountId,
    pub asset: AssetId,
    pub quantity: Decimal,
}

/// A fixed-price sale listing recorded (or overwritten) for a seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensListed {
    pub seller: AccountId,
    pub asset: AssetId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// A purchase settled: escrow reassigned seller→buyer, payment forwarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSettled {
    pub buyer: AccountId,
    pub seller: AccountId,
    pub asset: AssetId,
    pub quantity: Decimal,
    pub payment: Decimal,
}

/// Tokens pushed from escrow back to the holder's external account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWithdrawn {
    pub account_id: AccountId,
    pub asset: AssetId,
    pub quantity: Decimal,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    TokenDeposited(TokenDeposited),
    TokensListed(TokensListed),
    TradeSettled(TradeSettled),
    TokenWithdrawn(TokenWithdrawn),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_deposited_serialization() {
        let event = TokenDeposited {
            account_id: AccountId::new(),
            asset: AssetId::new("ERC"),
            quantity: Decimal::from(100),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: TokenDeposited = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_trade_settled_serialization() {
        let event = TradeSettled {
            buyer: AccountId::new(),
            seller: AccountId::new(),
            asset: AssetId::new("ERC"),
            quantity: Decimal::from(100),
            payment: Decimal::from(200),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: TradeSettled = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_exchange_event_enum_variant() {
        let event = ExchangeEvent::TokensListed(TokensListed {
            seller: AccountId::new(),
            asset: AssetId::new("GLD"),
            quantity: Decimal::from(50),
            unit_price: Decimal::from(3),
        });
        assert!(matches!(event, ExchangeEvent::TokensListed(_)));
    }
}
