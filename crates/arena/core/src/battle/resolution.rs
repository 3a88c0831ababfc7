//! Skill resolution: select targets, announce, pay, perform, cool down.

use tracing::{debug, warn};

use super::{Battle, BattleError};
use crate::actor::ActorId;
use crate::event::{EventContext, keys, names};
use crate::skill::{Skill, SkillKind};

impl Battle {
    /// Resolve skill `index` of `user`.
    ///
    /// Trusts the caller: availability (cooldown and cost) must have been
    /// checked beforehand. A defeated user does nothing.
    ///
    /// # Errors
    ///
    /// [`BattleError::UnknownActor`] or [`BattleError::UnavailableSkill`] if
    /// the user or the skill index does not exist.
    pub fn execute_skill(&mut self, user: ActorId, index: usize) -> Result<(), BattleError> {
        let actor = self
            .roster
            .actor(user)
            .ok_or(BattleError::UnknownActor(user))?;
        if !actor.is_alive() {
            return Ok(());
        }
        let skill = actor
            .skill(index)
            .cloned()
            .ok_or(BattleError::UnavailableSkill { actor: user, skill: index })?;

        self.log.push(format!("{} uses {}", actor.name(), skill.name));
        debug!(
            target: "arena::skill",
            actor = %user,
            skill = %skill.name,
            kind = skill.kind.label(),
            turn = self.turn_number,
            "executing"
        );

        let targets = self.select_targets(user, &skill);
        self.emit(
            EventContext::new(names::ON_USE_SKILL)
                .with_source(user)
                .with_targets(targets.iter().copied())
                .with(keys::SKILL, skill.name.as_str()),
        );
        if let Some(actor) = self.roster.actor_mut(user) {
            actor.resources_mut().pay(&skill.costs);
        }

        if targets.is_empty() {
            warn!(
                target: "arena::skill",
                actor = %user,
                skill = %skill.name,
                "no valid target, skill fizzled"
            );
        }
        self.perform(user, &skill, &targets);

        if let Some(actor) = self.roster.actor_mut(user) {
            actor.start_cooldown(index);
        }
        Ok(())
    }

    /// Targets in the order the skill will affect them. Empty when no valid
    /// target exists.
    pub(super) fn select_targets(&mut self, user: ActorId, skill: &Skill) -> Vec<ActorId> {
        match skill.kind {
            SkillKind::SingleTargetAttack { .. } => {
                self.view().pick_enemy_target(user).into_iter().collect()
            }
            SkillKind::Heal { .. } => self.view().pick_ally_to_heal(user).into_iter().collect(),
            SkillKind::Buff { .. } => vec![user],
        }
    }

    fn perform(&mut self, user: ActorId, skill: &Skill, targets: &[ActorId]) {
        let user_name = self
            .roster
            .actor(user)
            .map(|actor| actor.name().to_owned())
            .unwrap_or_default();

        for &target in targets {
            let Some(target_name) = self.roster.actor(target).map(|actor| actor.name().to_owned())
            else {
                continue;
            };

            match &skill.kind {
                SkillKind::SingleTargetAttack { power, damage_type } => {
                    let Some(roll) =
                        self.view()
                            .compute_damage(user, target, *power, damage_type, &skill.tags)
                    else {
                        continue;
                    };
                    let dealt = self.apply_damage(
                        target,
                        roll.amount,
                        damage_type,
                        Some(user),
                        roll.is_critical,
                    );
                    self.log.push(if roll.is_critical {
                        format!("Critical! {target_name} takes {dealt:.0} {damage_type} damage")
                    } else {
                        format!("{target_name} takes {dealt:.0} {damage_type} damage")
                    });
                    self.emit(
                        EventContext::new(names::ON_ATTACK)
                            .with_source(user)
                            .with_targets([target])
                            .with(keys::AMOUNT, roll.amount)
                            .with(keys::DAMAGE_TYPE, damage_type.as_str()),
                    );
                }
                SkillKind::Heal { amount } => {
                    let healed = self.heal(target, *amount, Some(user));
                    self.log
                        .push(format!("{user_name} heals {target_name} for {healed:.0} HP"));
                }
                SkillKind::Buff { stat, .. } => {
                    if let Some(effect) = skill.buff_effect() {
                        self.apply_effect(target, effect);
                        self.log
                            .push(format!("{user_name} boosts {stat} of {target_name}"));
                    }
                }
            }
        }
    }
}
