//! Stat system: immutable base attributes plus a mutable derived view.
//!
//! # Layers
//!
//! ```text
//! [ BaseStats ]  fixed when the actor is built
//!      ↓  + bonus (additive, reversible: buffs, debuffs)
//! [ derived ]    what every formula reads
//!      ↑  override (transformations; replaced on the next refresh)
//! ```
//!
//! Resistances are keyed by damage type rather than by [`Stat`], so content
//! can introduce new damage types at runtime.

mod kind;
mod model;

pub use kind::{DEFAULT_DAMAGE_TYPES, PHYSICAL, Stat, TRUE_DAMAGE, uses_attack_stat};
pub use model::{BaseStats, StatModel, combine_resistances};

use crate::error::{ArenaError, ErrorSeverity};

/// Errors raised by the stat model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    /// Name outside the recognised stat vocabulary.
    #[error("unknown stat `{0}`")]
    InvalidStat(String),
}

impl ArenaError for StatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStat(_) => "invalid_stat",
        }
    }
}
