use super::snapshot::ActorSnapshot;
use super::team::Side;
use super::ActorId;
use crate::effect::{EffectController, EffectEvent, EffectInstance};
use crate::resource::{Resource, ResourceCost, ResourcePool};
use crate::skill::Skill;
use crate::stats::{BaseStats, Stat, StatModel};

/// A known skill and its remaining cooldown.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillSlot {
    pub skill: Skill,
    /// Turns until the skill can be used again; zero means ready.
    pub cooldown: u32,
}

/// A combat participant.
///
/// # Invariants
///
/// - `alive` flips to false exactly once, through [`mark_defeated`](Self::mark_defeated)
/// - health changes only through [`take_damage`](Self::take_damage) and
///   [`restore`](Self::restore), both no-ops once defeated
/// - stat bonuses from effects go through the [`EffectController`] so they
///   can be reversed exactly
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    name: String,
    tags: Vec<String>,
    hp: f64,
    stats: StatModel,
    skills: Vec<SkillSlot>,
    resources: ResourcePool,
    effects: EffectController,
    alive: bool,
    side: Option<Side>,
}

impl Actor {
    /// Build an actor at full health.
    pub fn new(
        name: impl Into<String>,
        base: BaseStats,
        skills: impl IntoIterator<Item = Skill>,
    ) -> Self {
        let stats = StatModel::new(base);
        Self {
            name: name.into(),
            tags: Vec::new(),
            hp: stats.get(Stat::Hp),
            stats,
            skills: skills
                .into_iter()
                .map(|skill| SkillSlot { skill, cooldown: 0 })
                .collect(),
            resources: ResourcePool::default(),
            effects: EffectController::new(),
            alive: true,
            side: None,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources = ResourcePool::new(self.resources.iter().cloned().chain(resources));
        self
    }

    /// Start the fight at `hp` instead of full health, capped at the maximum.
    #[must_use]
    pub fn with_health(mut self, hp: f64) -> Self {
        self.hp = hp.min(self.max_hp());
        self
    }

    // ===== identity =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub(crate) fn enlist(&mut self, side: Side) {
        self.side = Some(side);
    }

    // ===== health =====

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn max_hp(&self) -> f64 {
        self.stats.get(Stat::Hp)
    }

    /// Current health over maximum health (maximum floored at 1).
    pub fn health_fraction(&self) -> f64 {
        self.hp / self.max_hp().max(1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Reduce health by `amount` after this actor's resistance to
    /// `damage_type`. Returns the health actually removed (zero if defeated).
    pub fn take_damage(&mut self, amount: f64, damage_type: &str) -> f64 {
        if !self.alive {
            return 0.0;
        }
        let mitigated = (amount * (1.0 - self.stats.get_resistance(damage_type))).max(0.0);
        self.hp -= mitigated;
        mitigated
    }

    /// True once health has dropped to zero or below.
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0.0
    }

    /// Flip to defeated. Returns false if already defeated.
    pub fn mark_defeated(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Heal up to the missing health. Returns the amount healed.
    pub fn restore(&mut self, amount: f64) -> f64 {
        if !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let healed = amount.min((self.max_hp() - self.hp).max(0.0));
        self.hp += healed;
        healed
    }

    // ===== skills =====

    pub fn skills(&self) -> &[SkillSlot] {
        &self.skills
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index).map(|slot| &slot.skill)
    }

    /// Whether the skill at `index` is off cooldown and affordable.
    pub fn is_available(&self, index: usize) -> bool {
        self.skills
            .get(index)
            .is_some_and(|slot| slot.cooldown == 0 && self.resources.can_pay(&slot.skill.costs))
    }

    /// Index and skill of every currently available skill, in skill order.
    pub fn available_skills(&self) -> Vec<(usize, &Skill)> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_available(*index))
            .map(|(index, slot)| (index, &slot.skill))
            .collect()
    }

    pub fn start_cooldown(&mut self, index: usize) {
        if let Some(slot) = self.skills.get_mut(index) {
            slot.cooldown = slot.skill.cooldown;
        }
    }

    pub fn reduce_cooldowns(&mut self) {
        for slot in &mut self.skills {
            slot.cooldown = slot.cooldown.saturating_sub(1);
        }
    }

    // ===== stats, resources, effects =====

    pub fn stats(&self) -> &StatModel {
        &self.stats
    }

    /// Direct access for transformations (overrides, scaling).
    pub fn stats_mut(&mut self) -> &mut StatModel {
        &mut self.stats
    }

    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourcePool {
        &mut self.resources
    }

    pub fn can_pay(&self, cost: &ResourceCost) -> bool {
        self.resources.can_pay(cost)
    }

    pub fn effects(&self) -> &EffectController {
        &self.effects
    }

    pub fn apply_effect(&mut self, effect: EffectInstance) -> EffectEvent {
        self.effects.apply(effect, &mut self.stats)
    }

    pub fn remove_effect(&mut self, name: &str) -> Option<EffectEvent> {
        self.effects.remove_effect(name, &mut self.stats)
    }

    pub fn tick_effect(&mut self, name: &str) -> Vec<EffectEvent> {
        self.effects.tick_effect(name)
    }

    pub fn snapshot(&self, id: ActorId) -> ActorSnapshot {
        ActorSnapshot {
            id,
            name: self.name.clone(),
            side: self.side,
            tags: self.tags.clone(),
            alive: self.alive,
            hp: self.hp,
            max_hp: self.max_hp(),
            stats: self.stats.as_map(),
            effects: self.effects.summary(),
            resources: self.resources.summary(),
            cooldowns: self
                .skills
                .iter()
                .map(|slot| (slot.skill.name.clone(), slot.cooldown))
                .collect(),
        }
    }
}
