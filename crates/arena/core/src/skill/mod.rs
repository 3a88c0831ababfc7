//! Skill definitions.
//!
//! A [`Skill`] is pure data: identity, cooldown, cost and a closed
//! [`SkillKind`] describing what it does. Resolution (target selection,
//! payment, effects, events) lives in [`crate::battle`].

mod kind;

pub use kind::SkillKind;

use crate::effect::EffectInstance;
use crate::resource::ResourceCost;
use crate::stats::Stat;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    /// Turns the skill stays unavailable after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Damage tags matched against `<tag>_weak` / `<tag>_resist` on defenders.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs: ResourceCost,
    pub kind: SkillKind,
}

impl Skill {
    pub fn new(name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            cooldown: 0,
            tags: Vec::new(),
            costs: ResourceCost::new(),
            kind,
        }
    }

    pub fn attack(name: impl Into<String>, power: f64, damage_type: impl Into<String>) -> Self {
        Self::new(
            name,
            SkillKind::SingleTargetAttack {
                power,
                damage_type: damage_type.into(),
            },
        )
    }

    pub fn heal(name: impl Into<String>, amount: f64) -> Self {
        Self::new(name, SkillKind::Heal { amount })
    }

    pub fn buff(name: impl Into<String>, stat: Stat, amount: f64, duration: i32) -> Self {
        Self::new(
            name,
            SkillKind::Buff {
                stat,
                amount,
                duration,
            },
        )
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_cost(mut self, resource: impl Into<String>, amount: f64) -> Self {
        self.costs.insert(resource.into(), amount);
        self
    }

    /// Damage multiplier, for skills that deal damage.
    pub fn power(&self) -> Option<f64> {
        match self.kind {
            SkillKind::SingleTargetAttack { power, .. } => Some(power),
            SkillKind::Heal { .. } | SkillKind::Buff { .. } => None,
        }
    }

    pub fn is_heal(&self) -> bool {
        matches!(self.kind, SkillKind::Heal { .. })
    }

    pub fn is_buff(&self) -> bool {
        matches!(self.kind, SkillKind::Buff { .. })
    }

    /// The effect a buff skill grants its user.
    pub fn buff_effect(&self) -> Option<EffectInstance> {
        match &self.kind {
            SkillKind::Buff {
                stat,
                amount,
                duration,
            } => Some(
                EffectInstance::new(format!("buff_{stat}"), *duration)
                    .with_modifier(*stat, *amount)
                    .with_tag("buff"),
            ),
            _ => None,
        }
    }
}
