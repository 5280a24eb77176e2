//! Ledger-specific error types
//!
//! Two error kinds with identical observable effect (the whole call is
//! rejected and no state changes): precondition violations raised by the
//! ledger itself, and transfer failures raised by external collaborators.

use thiserror::Error;

/// Errors raised by the external fungible-token contract (or the native
/// currency ledger) when a transfer cannot be performed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Insufficient token balance: required {required}, available {available}")]
    InsufficientBalance { required: String, available: String },

    #[error("Insufficient allowance for spender: required {required}, approved {approved}")]
    InsufficientAllowance { required: String, approved: String },

    #[error("Arithmetic overflow in token balance calculation")]
    Overflow,
}

/// Exchange-ledger errors.
///
/// All variants except `Token` are precondition violations; `Token` wraps an
/// external transfer failure. Both reject the whole call with no state change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Insufficient escrow balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: String,
        available: String,
    },

    #[error("No listing found for seller {seller}, asset {asset}")]
    ListingNotFound { seller: String, asset: String },

    #[error("Quantity mismatch: listed {listed}, requested {requested}")]
    QuantityMismatch { listed: String, requested: String },

    #[error("Payment mismatch: expected {expected}, attached {attached}")]
    PaymentMismatch { expected: String, attached: String },

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("External transfer failed: {0}")]
    Token(#[from] TokenError),
}
