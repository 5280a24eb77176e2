//! Types library for the custodial token exchange
//!
//! This library provides the core type definitions shared across the exchange
//! system, ensuring type safety, deterministic behavior, and backward
//! compatibility.
//!
//! # Version
//! v1.0.0 - Frozen specification compliant
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, AssetId)
//! - `listing`: Fixed-price sale listing type

// Public modules
pub mod ids;
pub mod listing;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::listing::*;
}
