//! Roster loader.

use std::path::Path;

use arena_core::TeamSpec;

use crate::loaders::{LoadResult, read_file};
use crate::roster::RosterFile;

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and parse a roster file without instantiating it.
    pub fn load(path: &Path) -> LoadResult<RosterFile> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RosterFile> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))
    }

    /// Load a roster file and build both teams from it.
    pub fn load_teams(path: &Path) -> LoadResult<(TeamSpec, TeamSpec)> {
        let roster = Self::load(path)?;
        Ok(roster.build_teams()?)
    }
}
