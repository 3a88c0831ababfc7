use std::collections::BTreeMap;

use crate::stats::Stat;

/// What an effect does to its holder when it ticks or expires.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectHook {
    #[default]
    None,
    /// Damage the holder through the normal damage path, with no attacker.
    Damage { amount: f64, damage_type: String },
    Heal { amount: f64 },
    /// Flat gain (negative for drain) on one of the holder's resources.
    Resource { resource: String, amount: f64 },
}

impl EffectHook {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// An active named modifier. Each `(stat, amount)` entry is applied once per stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub name: String,
    /// Remaining ticks; the effect expires when this reaches zero.
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default = "one_stack"))]
    pub stacks: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: BTreeMap<Stat, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_tick: EffectHook,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_expire: EffectHook,
}

#[cfg(feature = "serde")]
fn one_stack() -> u32 {
    1
}

impl EffectInstance {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            stacks: 1,
            tags: Vec::new(),
            modifiers: BTreeMap::new(),
            on_tick: EffectHook::None,
            on_expire: EffectHook::None,
        }
    }

    #[must_use]
    pub fn with_modifier(mut self, stat: Stat, amount: f64) -> Self {
        self.modifiers.insert(stat, amount);
        self
    }

    #[must_use]
    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn on_tick(mut self, hook: EffectHook) -> Self {
        self.on_tick = hook;
        self
    }

    #[must_use]
    pub fn on_expire(mut self, hook: EffectHook) -> Self {
        self.on_expire = hook;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }

    /// Total contribution of this effect to `stat` at its current stack count.
    pub fn contribution(&self, stat: Stat) -> f64 {
        self.modifiers.get(&stat).copied().unwrap_or(0.0) * f64::from(self.stacks)
    }
}
