//! Custodial Exchange Ledger
//!
//! This crate implements the contract layer for the token exchange: escrow
//! accounting, fixed-price sale listings, atomic buy-settlement, and
//! withdrawal back to the external token contract.
//!
//! # Modules
//! - `errors`: Ledger error taxonomy (precondition vs. external transfer)
//! - `events`: Ledger events, one per successful state transition
//! - `security`: Shared security primitives (reentrancy guard)
//! - `token`: External fungible-token seam and reference implementation
//! - `coin`: Native-currency ledger for attached payments
//! - `exchange`: The exchange state machine
//!
//! # Version
//! v0.1.0 — Spec-compliant initial implementation

pub mod coin;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod security;
pub mod token;

/// Ledger ABI version — frozen after release
pub const LEDGER_ABI_VERSION: &str = "1.0.0";
