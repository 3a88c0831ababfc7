//! Data-driven battle content and loaders.
//!
//! This crate provides:
//! - Actor templates and roster documents ([`RosterFile`])
//! - RON roster and TOML configuration loaders (feature `loaders`)
//! - A bundled demo roster: two knights and two mages
//!
//! Everything here produces plain `arena-core` values; the engine never sees
//! a file.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{ActorTemplate, MemberSpec, RosterError, RosterFile, TeamFile};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, RosterLoader};

/// RON source of the bundled demo roster.
pub const DEMO_ROSTER: &str = include_str!("../data/demo_roster.ron");

/// Parse the bundled demo roster.
#[cfg(feature = "loaders")]
pub fn demo_roster() -> LoadResult<RosterFile> {
    RosterLoader::parse(DEMO_ROSTER)
}

/// Both demo teams, ready for [`arena_core::Battle::new`].
#[cfg(feature = "loaders")]
pub fn demo_teams() -> LoadResult<(arena_core::TeamSpec, arena_core::TeamSpec)> {
    Ok(demo_roster()?.build_teams()?)
}
