//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use arena_content::ConfigLoader;
use arena_core::BattleConfig;

/// Everything the driver needs before it can build a battle.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// RON roster to load instead of the bundled demo roster.
    pub roster_path: Option<PathBuf>,
    /// TOML battle configuration.
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub max_turns: Option<u32>,
    /// Also write logs to `<dir>/arena.log`.
    pub log_dir: Option<PathBuf>,
    /// Write the final [`arena_core::BattleSummary`] here as JSON.
    pub summary_path: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_ROSTER` - RON roster file (default: bundled demo roster)
    /// - `ARENA_CONFIG` - TOML battle configuration (default: built-in defaults)
    /// - `ARENA_SEED` - RNG seed, overrides the configuration file
    /// - `ARENA_MAX_TURNS` - Turn cap, overrides the configuration file
    /// - `ARENA_LOG_DIR` - Directory for a log file (default: stderr only)
    /// - `ARENA_SUMMARY_JSON` - Path for a JSON battle summary (default: none)
    pub fn from_env() -> Self {
        Self {
            roster_path: read_path("ARENA_ROSTER"),
            config_path: read_path("ARENA_CONFIG"),
            seed: read_env("ARENA_SEED"),
            max_turns: read_env("ARENA_MAX_TURNS"),
            log_dir: read_path("ARENA_LOG_DIR"),
            summary_path: read_path("ARENA_SUMMARY_JSON"),
        }
    }

    /// The battle configuration: file (or defaults), then environment
    /// overrides.
    pub fn battle_config(&self) -> Result<BattleConfig> {
        let base = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => BattleConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: BattleConfig) -> BattleConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        config
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
