//! State changes that the rest of the battle must hear about.

use tracing::{debug, info};

use super::Battle;
use crate::actor::ActorId;
use crate::battlefield::{FieldEffect, FieldEvent};
use crate::effect::{EffectEvent, EffectHook, EffectInstance};
use crate::event::{EventContext, keys, names};

impl Battle {
    // ===== health =====

    /// Deliver `amount` raw damage to `target`. Returns the health removed
    /// after resistances (zero for a defeated or unknown target).
    pub fn apply_damage(
        &mut self,
        target: ActorId,
        amount: f64,
        damage_type: &str,
        attacker: Option<ActorId>,
        is_critical: bool,
    ) -> f64 {
        let Some(actor) = self.roster.actor_mut(target) else {
            return 0.0;
        };
        if !actor.is_alive() {
            return 0.0;
        }
        let dealt = actor.take_damage(amount, damage_type);
        let depleted = actor.is_depleted();

        let attacker_name = attacker
            .and_then(|id| self.roster.actor(id))
            .map(|actor| actor.name().to_owned());
        self.emit(
            EventContext::new(names::ON_RECEIVE_DAMAGE)
                .with_source(target)
                .with(keys::AMOUNT, dealt)
                .with(keys::DAMAGE_TYPE, damage_type)
                .with(keys::IS_CRITICAL, is_critical)
                .with(keys::ATTACKER, attacker_name),
        );

        if depleted {
            self.defeat(target);
        }
        dealt
    }

    /// Heal `target` by up to `amount`. Returns the health restored.
    pub fn heal(&mut self, target: ActorId, amount: f64, healer: Option<ActorId>) -> f64 {
        let Some(actor) = self.roster.actor_mut(target) else {
            return 0.0;
        };
        if !actor.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let healed = actor.restore(amount);

        let healer_name = healer
            .and_then(|id| self.roster.actor(id))
            .map(|actor| actor.name().to_owned());
        self.emit(
            EventContext::new(names::ON_HEALED)
                .with_source(target)
                .with(keys::AMOUNT, healed)
                .with(keys::HEALER, healer_name),
        );
        healed
    }

    /// Mark `target` defeated. Only the first call has any effect: it
    /// broadcasts `on_exit_battle`, then `on_ally_death` once per living
    /// teammate.
    pub fn defeat(&mut self, target: ActorId) {
        let Some(actor) = self.roster.actor_mut(target) else {
            return;
        };
        if !actor.mark_defeated() {
            return;
        }
        let name = actor.name().to_owned();
        let side = actor.side();

        info!(
            target: "arena::battle",
            actor = %target,
            name = %name,
            turn = self.turn_number,
            "defeated"
        );
        self.log.push(format!("{name} is defeated"));
        self.emit(EventContext::new(names::ON_EXIT_BATTLE).with_source(target));

        if let Some(side) = side {
            for ally in self.roster.alive_members(side) {
                self.emit(
                    EventContext::new(names::ON_ALLY_DEATH)
                        .with_source(target)
                        .with_targets([ally]),
                );
            }
        }
    }

    // ===== effects =====

    pub fn apply_effect(&mut self, target: ActorId, effect: EffectInstance) {
        let Some(actor) = self.roster.actor_mut(target) else {
            return;
        };
        let event = actor.apply_effect(effect);
        self.handle_effect_event(target, event);
    }

    pub fn remove_effect(&mut self, target: ActorId, name: &str) {
        let Some(actor) = self.roster.actor_mut(target) else {
            return;
        };
        if let Some(event) = actor.remove_effect(name) {
            self.handle_effect_event(target, event);
        }
    }

    /// Tick every effect of `holder`, running hooks as each one ticks. An
    /// expired effect runs its expiry hook before its stat bonus is reversed.
    pub(super) fn tick_effects(&mut self, holder: ActorId) {
        let Some(effect_names) = self.roster.actor(holder).map(|actor| actor.effects().names())
        else {
            return;
        };
        for name in effect_names {
            let Some(actor) = self.roster.actor_mut(holder) else {
                return;
            };
            for event in actor.tick_effect(&name) {
                self.handle_effect_event(holder, event);
            }
        }
    }

    fn handle_effect_event(&mut self, holder: ActorId, event: EffectEvent) {
        match event {
            EffectEvent::Applied { name, stacks } => {
                self.emit(
                    EventContext::new(names::ON_APPLY_EFFECT)
                        .with_source(holder)
                        .with(keys::EFFECT, name)
                        .with(keys::STACKS, stacks),
                );
            }
            EffectEvent::Removed { name } => {
                self.emit(
                    EventContext::new(names::ON_REMOVE_EFFECT)
                        .with_source(holder)
                        .with(keys::EFFECT, name),
                );
            }
            EffectEvent::Ticked { name, hook } => {
                debug!(target: "arena::effects", actor = %holder, effect = %name, ?hook, "tick");
                self.run_hook(holder, hook);
            }
            EffectEvent::Expired { name, hook } => {
                debug!(target: "arena::effects", actor = %holder, effect = %name, ?hook, "expired");
                self.run_hook(holder, hook);
                self.remove_effect(holder, &name);
            }
        }
    }

    fn run_hook(&mut self, holder: ActorId, hook: EffectHook) {
        match hook {
            EffectHook::None => {}
            EffectHook::Damage {
                amount,
                damage_type,
            } => {
                self.apply_damage(holder, amount, &damage_type, None, false);
            }
            EffectHook::Heal { amount } => {
                self.heal(holder, amount, None);
            }
            EffectHook::Resource { resource, amount } => {
                if let Some(actor) = self.roster.actor_mut(holder) {
                    actor.resources_mut().add(&resource, amount);
                }
            }
        }
    }

    // ===== battlefield =====

    pub fn add_field_effect(&mut self, effect: FieldEffect) {
        let event = self.battlefield.add_effect(effect);
        self.handle_field_event(event);
    }

    pub(super) fn tick_battlefield(&mut self) {
        for event in self.battlefield.tick() {
            self.handle_field_event(event);
        }
    }

    fn handle_field_event(&mut self, event: FieldEvent) {
        let (event_name, effect) = match event {
            FieldEvent::Applied(effect) => (names::ON_FIELD_APPLY, effect),
            FieldEvent::Ticked(effect) => (names::ON_FIELD_TICK, effect),
            FieldEvent::Expired(effect) => (names::ON_FIELD_EXPIRE, effect),
        };
        self.emit(EventContext::new(event_name).with(keys::EFFECT, effect));
    }
}
