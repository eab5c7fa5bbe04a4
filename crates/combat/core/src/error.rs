//! Common error infrastructure for combat-core.
//!
//! Domain errors (`StartError`, `ActionError`, ...) live next to the engine
//! operations that produce them. This module holds the classification shared
//! by all of them.
//!
//! Nothing in the combat core is fatal: every failure degrades to a no-op
//! (plus, for precondition failures, an informational log entry) and leaves
//! the combat state untouched.

/// Severity level of an error, used by callers to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same turn can be retried with a different action.
    ///
    /// Examples: skill on cooldown, not enough mana
    Recoverable,

    /// Invalid input, rejected without any state change.
    ///
    /// Examples: unknown target, starting an encounter with no opponents
    Validation,

    /// The caller drove the state machine out of order.
    ///
    /// Examples: acting when it is not the player's turn, stale continuation
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatFailure: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for asserting on errors in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
