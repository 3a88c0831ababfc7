//! Battle driver entry point.
mod config;
mod format;
mod logging;

use anyhow::{Context, Result};
use arena_content::{RosterLoader, demo_teams};
use arena_core::Battle;
use config::CliConfig;
use format::{format_log, format_stats_window};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let battle_config = config.battle_config()?;
    let (team_a, team_b) = match &config.roster_path {
        Some(path) => RosterLoader::load_teams(path)?,
        None => demo_teams()?,
    };
    let roster_label = config
        .roster_path
        .as_deref()
        .map_or_else(|| "demo".to_owned(), |path| path.display().to_string());
    tracing::info!(
        roster = %roster_label,
        seed = battle_config.seed,
        max_turns = battle_config.max_turns,
        "starting battle"
    );

    let mut battle = Battle::new(team_a, team_b, battle_config)?;
    battle.run_default()?;

    println!("=== Battle log ===");
    println!("{}", format_log(battle.log().lines()));
    println!("\n=== Final state ===");
    for snapshot in battle.snapshot() {
        println!("{}\n", format_stats_window(&snapshot));
    }

    let summary = battle.summary();
    match summary.winner {
        Some(side) => println!("Winner: team {side} after {} turns", summary.turns),
        None => println!("No winner after {} turns", summary.turns),
    }

    if let Some(path) = &config.summary_path {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    battle.teardown();
    Ok(())
}
