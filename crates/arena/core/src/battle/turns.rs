use tracing::{debug, info, warn};

use super::{Battle, BattleError, BattleView};
use crate::actor::{ActorId, Side};
use crate::event::{EventContext, keys, names};
use crate::policy::ChosenAction;
use crate::stats::Stat;

impl Battle {
    /// Run with the configured turn cap.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_default(&mut self) -> Result<(), BattleError> {
        self.run(self.config.max_turns)
    }

    /// Play turns until one team is defeated or `max_turns` turns have been
    /// played, then broadcast `battle_end`.
    ///
    /// # Errors
    ///
    /// Returns the decision policy's error when an actor has no action, or
    /// [`BattleError::UnavailableSkill`] when the policy picks a skill the
    /// actor cannot use. No `battle_end` is broadcast in that case.
    pub fn run(&mut self, max_turns: u32) -> Result<(), BattleError> {
        info!(target: "arena::battle", max_turns, "battle started");

        while self.turn_number < max_turns && !self.is_finished() {
            let entry = match self.timeline.pop_next() {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        target: "arena::battle",
                        turn = self.turn_number,
                        %err,
                        "stopping early"
                    );
                    break;
                }
            };
            let actor = entry.actor;
            if !self.roster.is_alive(actor) {
                debug!(target: "arena::battle", actor = %actor, "discarding defeated actor");
                continue;
            }

            self.clock = entry.ready_at.into_inner();
            self.turn_number += 1;
            debug!(
                target: "arena::battle",
                turn = self.turn_number,
                actor = %actor,
                clock = self.clock,
                "turn"
            );

            self.start_turn(actor);
            if self.roster.is_alive(actor) {
                let action = self.choose_action(actor)?;
                self.execute_skill(action.actor, action.skill)?;
                self.end_turn(actor);
                self.reschedule(actor);
                self.broadcast_side_action(actor);
            }
            self.tick_battlefield();
        }

        self.emit(EventContext::new(names::BATTLE_END).with(keys::TURNS, self.turn_number));
        info!(
            target: "arena::battle",
            turns = self.turn_number,
            winner = ?self.winner(),
            "battle finished"
        );
        Ok(())
    }

    /// Cooldowns, effect ticks, resource regeneration, then `on_turn_start`.
    pub(super) fn start_turn(&mut self, actor: ActorId) {
        if let Some(combatant) = self.roster.actor_mut(actor) {
            combatant.reduce_cooldowns();
        }
        self.tick_effects(actor);
        if let Some(combatant) = self.roster.actor_mut(actor) {
            combatant.resources_mut().on_turn_start();
        }
        self.emit(EventContext::new(names::ON_TURN_START).with_source(actor));
    }

    pub(super) fn end_turn(&mut self, actor: ActorId) {
        if let Some(combatant) = self.roster.actor_mut(actor) {
            combatant.resources_mut().on_turn_end();
        }
        self.emit(EventContext::new(names::ON_TURN_END).with_source(actor));
    }

    /// Ask the policy, then check that the answer is usable.
    fn choose_action(&mut self, actor: ActorId) -> Result<ChosenAction, BattleError> {
        let mut view = BattleView::new(
            &self.roster,
            &self.battlefield,
            &mut self.rng,
            &mut self.log,
            self.turn_number,
        );
        let action = self.policy.choose_action(actor, &mut view)?;

        let usable = action.actor == actor
            && self
                .roster
                .actor(actor)
                .is_some_and(|combatant| combatant.is_available(action.skill));
        if !usable {
            return Err(BattleError::UnavailableSkill {
                actor: action.actor,
                skill: action.skill,
            });
        }
        Ok(action)
    }

    fn reschedule(&mut self, actor: ActorId) {
        let Some(speed) = self.roster.actor(actor).map(|combatant| combatant.stat(Stat::Speed))
        else {
            return;
        };
        self.timeline.schedule_next(actor, speed, self.clock);
    }

    fn broadcast_side_action(&mut self, actor: ActorId) {
        let event_name = match self.roster.side_of(actor) {
            Some(Side::A) => names::ON_ALLY_ACTION,
            Some(Side::B) => names::ON_ENEMY_ACTION,
            None => return,
        };
        self.emit(EventContext::new(event_name).with_source(actor));
    }
}
