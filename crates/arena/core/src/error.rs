//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g. `StatError`, `TimelineError`, `SetupError`) are
//! defined next to the components that produce them. This module provides the
//! shared classification every one of them implements.
//!
//! # Propagation Policy
//!
//! - **Configuration-shape errors** (unknown stat, missing resource, actor
//!   without skills) abort construction loudly.
//! - **Gameplay edge cases** (no valid target, fizzled heal) are not errors at
//!   all: they degrade to a logged no-op.
//! - Once [`crate::Battle::run`] begins, the only error that escapes is a fatal
//!   no-action condition raised by the decision policy.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed with an alternative
/// - **Validation**: Invalid input or configuration that should be rejected
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can retry with the same or an alternative action.
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown stat name, skill cost naming a missing resource
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: empty timeline while both teams still stand
    Internal,

    /// Unrecoverable for the current battle.
    ///
    /// Examples: an actor has no available skill when asked to act
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable, snake_case `error_code` for every variant
pub trait ArenaError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
