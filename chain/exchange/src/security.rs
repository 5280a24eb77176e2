//! Security primitives for the exchange ledger
//!
//! The original execution environment serializes calls and rolls back failed
//! transactions wholesale. Outside that environment the re-entrancy rule is
//! made structural: every state-changing operation wraps itself in an
//! explicit guard and commits internal state before any external call-out.

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A ledger operation acquires the guard before executing state-changing
/// logic and releases it on every exit path. Any nested call attempt fails.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}
