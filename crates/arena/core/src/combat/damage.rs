use crate::actor::Actor;
use crate::config::BattleConfig;
use crate::stats::{PHYSICAL, Stat, uses_attack_stat};

/// Outcome of a damage computation, before the defender's resistances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub amount: f64,
    pub is_critical: bool,
}

/// Multiplicative reduction from a defense stat: `max(0.1, 100 / (100 + defense))`.
pub fn mitigation(defense: f64) -> f64 {
    (100.0 / (100.0 + defense)).max(BattleConfig::MIN_MITIGATION)
}

/// Shift from the defender's `<tag>_weak` / `<tag>_resist` tags.
pub fn tag_modifier(defender: &Actor, tags: &[String]) -> f64 {
    tags.iter()
        .map(|tag| {
            let mut shift = 0.0;
            if defender.has_tag(&format!("{tag}_weak")) {
                shift += BattleConfig::TAG_AFFINITY;
            }
            if defender.has_tag(&format!("{tag}_resist")) {
                shift -= BattleConfig::TAG_AFFINITY;
            }
            shift
        })
        .sum()
}

/// Raw damage of one hit.
///
/// ```text
/// offense  = atk (physical, true) | mag (others)
/// defense  = defense (physical)   | resistance (others)
/// damage   = offense × power × mitigation(defense)
///          × (1 + field_modifier + tag_modifier)
///          × crit_damage            if crit_roll < crit_chance
/// ```
pub fn compute_damage(
    attacker: &Actor,
    defender: &Actor,
    power: f64,
    damage_type: &str,
    tags: &[String],
    field_modifier: f64,
    crit_roll: f64,
) -> DamageRoll {
    let offense = if uses_attack_stat(damage_type) {
        attacker.stat(Stat::Atk)
    } else {
        attacker.stat(Stat::Mag)
    };
    let defense = if damage_type == PHYSICAL {
        defender.stat(Stat::Defense)
    } else {
        defender.stat(Stat::Resistance)
    };

    let modifier = 1.0 + field_modifier + tag_modifier(defender, tags);
    let mut amount = offense * power * mitigation(defense) * modifier;

    let is_critical = crit_roll < attacker.stat(Stat::CritChance);
    if is_critical {
        amount *= attacker.stat(Stat::CritDamage);
    }

    DamageRoll {
        amount,
        is_critical,
    }
}
