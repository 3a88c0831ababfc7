//! Battle configuration loader.

use std::path::Path;

use arena_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            seed = 42

            [heuristic]
            heal_threshold = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.max_turns, BattleConfig::DEFAULT_MAX_TURNS);
        assert_eq!(config.heuristic.heal_threshold, 0.5);
        assert_eq!(config.heuristic.buff_turns, 3);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ConfigLoader::parse("max_turns = \"many\"").is_err());
    }
}
