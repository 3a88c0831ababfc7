use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::log::BattleLog;
use crate::actor::{Actor, ActorId, Roster};
use crate::battlefield::Battlefield;
use crate::combat::{self, DamageRoll};

/// What policies and skill resolution may see and do mid-battle.
///
/// Actor state is read-only. The view can draw from the battle RNG and append
/// narration; nothing else.
pub struct BattleView<'a> {
    roster: &'a Roster,
    battlefield: &'a Battlefield,
    rng: &'a mut ChaCha8Rng,
    log: &'a mut BattleLog,
    turn_number: u32,
}

impl<'a> BattleView<'a> {
    pub fn new(
        roster: &'a Roster,
        battlefield: &'a Battlefield,
        rng: &'a mut ChaCha8Rng,
        log: &'a mut BattleLog,
        turn_number: u32,
    ) -> Self {
        Self {
            roster,
            battlefield,
            rng,
            log,
            turn_number,
        }
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn actor(&self, id: ActorId) -> Option<&'a Actor> {
        self.roster.actor(id)
    }

    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    pub fn battlefield(&self) -> &'a Battlefield {
        self.battlefield
    }

    pub fn allies_of(&self, id: ActorId) -> Vec<ActorId> {
        self.roster.allies_of(id)
    }

    pub fn enemies_of(&self, id: ActorId) -> Vec<ActorId> {
        self.roster.enemies_of(id)
    }

    /// A living enemy chosen uniformly at random, if any remain.
    pub fn pick_enemy_target(&mut self, id: ActorId) -> Option<ActorId> {
        let alive: Vec<ActorId> = self
            .enemies_of(id)
            .into_iter()
            .filter(|enemy| self.roster.is_alive(*enemy))
            .collect();
        alive.choose(&mut *self.rng).copied()
    }

    /// The ally with the lowest health fraction; the first one wins ties.
    pub fn pick_ally_to_heal(&self, id: ActorId) -> Option<ActorId> {
        self.allies_of(id)
            .into_iter()
            .filter_map(|ally| self.actor(ally).map(|actor| (ally, actor.health_fraction())))
            .fold(None, |best: Option<(ActorId, f64)>, (ally, fraction)| match best {
                Some((_, lowest)) if lowest <= fraction => best,
                _ => Some((ally, fraction)),
            })
            .map(|(ally, _)| ally)
    }

    /// Damage `attacker` would deal to `defender`, rolling for a critical hit.
    /// `None` if either actor is unknown.
    pub fn compute_damage(
        &mut self,
        attacker: ActorId,
        defender: ActorId,
        power: f64,
        damage_type: &str,
        tags: &[String],
    ) -> Option<DamageRoll> {
        let attacking = self.roster.actor(attacker)?;
        let defending = self.roster.actor(defender)?;
        let field_modifier = self
            .battlefield
            .query_modifier_for(damage_type, attacking.side());
        let crit_roll = self.rng.gen_range(0.0..1.0);
        Some(combat::compute_damage(
            attacking,
            defending,
            power,
            damage_type,
            tags,
            field_modifier,
            crit_roll,
        ))
    }

    pub fn log_event(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }
}
