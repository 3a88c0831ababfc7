//! Combat participants and the roster that owns them.
//!
//! Actors never point at each other. The [`Roster`] owns every actor of a
//! battle and hands out [`ActorId`]s; an actor only remembers which [`Side`]
//! it fights for.

mod combatant;
mod roster;
mod snapshot;
mod team;

use std::fmt;

pub use combatant::{Actor, SkillSlot};
pub use roster::{Roster, SetupError};
pub use snapshot::ActorSnapshot;
pub use team::{Side, Team, TeamSpec};

/// Index of an actor inside its battle's [`Roster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
