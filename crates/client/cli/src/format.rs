//! Plain-text rendering of battle state.
use std::fmt::Write;

use arena_core::ActorSnapshot;

/// One actor's stats window: health, derived stats, effects, resources and
/// cooldowns.
pub fn format_stats_window(snapshot: &ActorSnapshot) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== {} ===", snapshot.name);
    let _ = writeln!(out, "HP: {:.0}/{:.0}", snapshot.hp, snapshot.max_hp);

    out.push_str("-- Stats --\n");
    for (name, value) in &snapshot.stats {
        let _ = writeln!(out, "{name}: {value:.2}");
    }

    out.push_str("-- Effects --\n");
    if snapshot.effects.is_empty() {
        out.push_str("None\n");
    }
    for effect in &snapshot.effects {
        let _ = writeln!(
            out,
            "{} (dur {} st {})",
            effect.name, effect.duration, effect.stacks
        );
    }

    out.push_str("-- Resources --\n");
    for (name, value) in &snapshot.resources {
        let _ = writeln!(out, "{name}: {value:.1}");
    }

    out.push_str("-- Cooldowns --");
    for (name, turns) in &snapshot.cooldowns {
        let _ = write!(out, "\n{name}: {turns}");
    }
    out
}

pub fn format_log<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}
