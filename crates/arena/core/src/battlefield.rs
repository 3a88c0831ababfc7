//! Battle-wide, duration-limited modifiers.
//!
//! Field effects shift the damage multiplier of matching damage types. They
//! are ordered by descending priority for apply/tick/expire notifications;
//! priority never changes the modifier sum.

use std::collections::BTreeMap;

use tracing::debug;

use crate::actor::Side;

/// Which attackers a field effect boosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FieldScope {
    #[default]
    Global,
    /// Only damage dealt by this side.
    Side(Side),
}

impl FieldScope {
    pub fn covers(self, side: Option<Side>) -> bool {
        match self {
            Self::Global => true,
            Self::Side(scoped) => side == Some(scoped),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEffect {
    pub name: String,
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Damage-type tag → additive multiplier contribution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scope: FieldScope,
}

impl FieldEffect {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            tags: Vec::new(),
            modifiers: BTreeMap::new(),
            priority: 0,
            scope: FieldScope::Global,
        }
    }

    #[must_use]
    pub fn with_modifier(mut self, tag: impl Into<String>, amount: f64) -> Self {
        self.modifiers.insert(tag.into(), amount);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn scoped_to(mut self, side: Side) -> Self {
        self.scope = FieldScope::Side(side);
        self
    }

    fn modifier(&self, tag: &str) -> f64 {
        self.modifiers.get(tag).copied().unwrap_or(0.0)
    }
}

/// Lifecycle notification for the battle to broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    Applied(String),
    Ticked(String),
    Expired(String),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEffectSnapshot {
    pub name: String,
    pub duration: i32,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Battlefield {
    effects: Vec<FieldEffect>,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert and keep the list sorted by descending priority. Equal
    /// priorities keep insertion order.
    pub fn add_effect(&mut self, effect: FieldEffect) -> FieldEvent {
        debug!(
            target: "arena::battlefield",
            effect = %effect.name,
            duration = effect.duration,
            priority = effect.priority,
            "field effect added"
        );
        let name = effect.name.clone();
        self.effects.push(effect);
        self.effects.sort_by(|a, b| b.priority.cmp(&a.priority));
        FieldEvent::Applied(name)
    }

    /// Tick every effect in priority order; expired effects are removed.
    pub fn tick(&mut self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        for effect in &mut self.effects {
            events.push(FieldEvent::Ticked(effect.name.clone()));
            effect.duration -= 1;
            if effect.duration <= 0 {
                events.push(FieldEvent::Expired(effect.name.clone()));
            }
        }
        self.effects.retain(|effect| effect.duration > 0);
        events
    }

    /// Sum of every active effect's modifier for `tag`, regardless of scope.
    pub fn query_modifier(&self, tag: &str) -> f64 {
        self.effects.iter().map(|effect| effect.modifier(tag)).sum()
    }

    /// Sum over global effects and those scoped to `side`.
    pub fn query_modifier_for(&self, tag: &str, side: Option<Side>) -> f64 {
        self.effects
            .iter()
            .filter(|effect| effect.scope.covers(side))
            .map(|effect| effect.modifier(tag))
            .sum()
    }

    pub fn effects(&self) -> &[FieldEffect] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn snapshot(&self) -> Vec<FieldEffectSnapshot> {
        self.effects
            .iter()
            .map(|effect| FieldEffectSnapshot {
                name: effect.name.clone(),
                duration: effect.duration,
                tags: effect.tags.clone(),
            })
            .collect()
    }
}
