use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use super::instance::{EffectHook, EffectInstance};
use crate::stats::{Stat, StatModel};

/// Something the controller did that the battle should announce or act on.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectEvent {
    /// New or merged; `stacks` is the total after merging.
    Applied { name: String, stacks: u32 },
    /// Per-tick hook to run on the holder.
    Ticked { name: String, hook: EffectHook },
    /// Duration ran out. `hook` is the expiry hook (possibly
    /// [`EffectHook::None`]) to run before the effect is removed.
    Expired { name: String, hook: EffectHook },
    Removed { name: String },
}

/// Read-only view of one active effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSummary {
    pub name: String,
    pub duration: i32,
    pub stacks: u32,
    pub tags: Vec<String>,
    pub modifiers: BTreeMap<Stat, f64>,
}

/// One active effect plus the stat bonus it has actually added so far.
#[derive(Clone, Debug, PartialEq)]
struct ActiveEffect {
    effect: EffectInstance,
    applied: BTreeMap<Stat, f64>,
}

/// Active effects of one actor, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectController {
    effects: BTreeMap<String, ActiveEffect>,
}

impl EffectController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `effect`, or merge it into the active effect of the same name
    /// (stacks add up, duration becomes the larger of the two). The incoming
    /// modifiers are applied to `stats` scaled by the incoming stack count.
    pub fn apply(&mut self, effect: EffectInstance, stats: &mut StatModel) -> EffectEvent {
        let name = effect.name.clone();
        let active = match self.effects.entry(name.clone()) {
            Entry::Occupied(entry) => {
                let active = entry.into_mut();
                active.effect.stacks += effect.stacks;
                active.effect.duration = active.effect.duration.max(effect.duration);
                for (stat, amount) in &effect.modifiers {
                    active.effect.modifiers.entry(*stat).or_insert(*amount);
                }
                active
            }
            Entry::Vacant(entry) => entry.insert(ActiveEffect {
                effect: effect.clone(),
                applied: BTreeMap::new(),
            }),
        };

        for stat in effect.modifiers.keys() {
            let amount = effect.contribution(*stat);
            stats.add_bonus(*stat, amount);
            *active.applied.entry(*stat).or_insert(0.0) += amount;
        }

        let stacks = active.effect.stacks;
        debug!(target: "arena::effects", effect = %name, stacks, "applied");
        EffectEvent::Applied { name, stacks }
    }

    /// Reverse everything `name` added to `stats` and drop it.
    /// Returns `None` if no such effect is active.
    pub fn remove_effect(&mut self, name: &str, stats: &mut StatModel) -> Option<EffectEvent> {
        let active = self.effects.remove(name)?;
        for (stat, amount) in &active.applied {
            stats.add_bonus(*stat, -amount);
        }

        debug!(target: "arena::effects", effect = name, "removed");
        Some(EffectEvent::Removed {
            name: active.effect.name,
        })
    }

    /// Tick one effect: report its tick hook, decrement its duration, and on
    /// expiry report the expire hook. An expired effect stays active until
    /// the caller has run its hooks and calls
    /// [`remove_effect`](Self::remove_effect).
    pub fn tick_effect(&mut self, name: &str) -> Vec<EffectEvent> {
        let Some(active) = self.effects.get_mut(name) else {
            return Vec::new();
        };
        let effect = &mut active.effect;

        let mut events = Vec::new();
        if !effect.on_tick.is_none() {
            events.push(EffectEvent::Ticked {
                name: name.to_owned(),
                hook: effect.on_tick.clone(),
            });
        }

        effect.duration -= 1;
        if effect.duration <= 0 {
            events.push(EffectEvent::Expired {
                name: name.to_owned(),
                hook: effect.on_expire.clone(),
            });
        }
        events
    }

    /// Tick every active effect, iterating a snapshot of names, and remove
    /// the ones that expired. Hooks are reported, not run.
    pub fn tick_all(&mut self, stats: &mut StatModel) -> Vec<EffectEvent> {
        let mut events = Vec::new();
        for name in self.names() {
            let ticked = self.tick_effect(&name);
            let expired = ticked
                .iter()
                .any(|event| matches!(event, EffectEvent::Expired { .. }));
            events.extend(ticked);
            if expired {
                events.extend(self.remove_effect(&name, stats));
            }
        }
        events
    }

    /// Bonus `name` currently adds to `stat`, across all merges.
    pub fn applied(&self, name: &str, stat: Stat) -> f64 {
        self.effects
            .get(name)
            .and_then(|active| active.applied.get(&stat))
            .copied()
            .unwrap_or(0.0)
    }

    /// Active effect names in iteration order.
    pub fn names(&self) -> Vec<String> {
        self.effects.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&EffectInstance> {
        self.effects.get(name).map(|active| &active.effect)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn summary(&self) -> Vec<EffectSummary> {
        self.effects
            .values()
            .map(|ActiveEffect { effect, .. }| EffectSummary {
                name: effect.name.clone(),
                duration: effect.duration,
                stacks: effect.stacks,
                tags: effect.tags.clone(),
                modifiers: effect.modifiers.clone(),
            })
            .collect()
    }
}
