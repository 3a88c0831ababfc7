//! Battle orchestration.
//!
//! A [`Battle`] owns one self-contained fight: the [`Roster`], its
//! [`EventBus`], [`Timeline`], [`Battlefield`], narration log and RNG.
//! Components stay pure; every mutation that should be heard goes through the
//! battle so it can broadcast the matching event and apply listener
//! reactions.
//!
//! # Turn loop
//!
//! ```text
//! pop next ready actor ─ defeated? ─ yes ─▶ discard
//!        │ no
//!        ▼
//! advance clock, turn += 1
//! start_turn (cooldowns, effect ticks, resource regen, on_turn_start)
//! policy chooses ─▶ execute skill
//! end_turn (resource clamp, on_turn_end)
//! reschedule, on_ally_action | on_enemy_action, battlefield tick
//! ```

mod actions;
mod dispatch;
mod error;
mod log;
mod resolution;
mod summary;
mod turns;
mod view;

pub use error::BattleError;
pub use log::BattleLog;
pub use summary::BattleSummary;
pub use view::BattleView;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::actor::{Actor, ActorId, ActorSnapshot, Roster, Side, TeamSpec};
use crate::battlefield::Battlefield;
use crate::config::BattleConfig;
use crate::event::{EventBus, EventContext, names};
use crate::policy::{DecisionPolicy, HeuristicPolicy};
use crate::stats::Stat;
use crate::timeline::Timeline;

pub struct Battle {
    roster: Roster,
    bus: EventBus,
    battlefield: Battlefield,
    timeline: Timeline,
    log: BattleLog,
    rng: ChaCha8Rng,
    policy: Box<dyn DecisionPolicy>,
    config: BattleConfig,
    turn_number: u32,
    clock: f64,
}

impl Battle {
    /// Build a battle with a fresh event bus.
    ///
    /// # Errors
    ///
    /// [`BattleError::Setup`] if either team fails roster validation.
    pub fn new(
        team_a: TeamSpec,
        team_b: TeamSpec,
        config: BattleConfig,
    ) -> Result<Self, BattleError> {
        Self::with_bus(team_a, team_b, config, EventBus::new())
    }

    /// Build a battle on a bus that may already carry listeners, so they
    /// hear the `on_enter_battle` broadcasts.
    ///
    /// Every actor's resource gain listeners are registered, every actor is
    /// scheduled from time 0 and announced in roster order.
    ///
    /// # Errors
    ///
    /// [`BattleError::Setup`] if either team fails roster validation.
    pub fn with_bus(
        team_a: TeamSpec,
        team_b: TeamSpec,
        config: BattleConfig,
        bus: EventBus,
    ) -> Result<Self, BattleError> {
        let roster = Roster::new(team_a, team_b)?;
        let mut battle = Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            policy: Box::new(HeuristicPolicy::new(config.heuristic.clone())),
            roster,
            bus,
            battlefield: Battlefield::new(),
            timeline: Timeline::new(),
            log: BattleLog::new(),
            config,
            turn_number: 0,
            clock: 0.0,
        };
        battle.enter_all();
        Ok(battle)
    }

    fn enter_all(&mut self) {
        let ids: Vec<ActorId> = self.roster.ids().collect();
        for id in ids {
            let Some(actor) = self.roster.actor(id).filter(|actor| actor.is_alive()) else {
                continue;
            };
            for (event, listener) in actor.resources().gain_listeners(id) {
                self.bus.register(event, listener, 0);
            }
            self.timeline.add(id, actor.stat(Stat::Speed), 0.0);
            self.emit(EventContext::new(names::ON_ENTER_BATTLE).with_source(id));
        }

        info!(
            target: "arena::battle",
            team_a = %self.roster.team(Side::A).name,
            team_b = %self.roster.team(Side::B).name,
            actors = self.roster.len(),
            seed = self.config.seed,
            "battle prepared"
        );
    }

    /// Replace the decision policy (the default is [`HeuristicPolicy`]).
    #[must_use]
    pub fn with_policy(mut self, policy: impl DecisionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // ===== queries =====

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.actor(id)
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Register or unregister listeners mid-battle.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Readiness time of the turn currently (or last) being played.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn is_finished(&self) -> bool {
        self.roster.is_defeated(Side::A) || self.roster.is_defeated(Side::B)
    }

    /// The side still standing once the other is defeated.
    pub fn winner(&self) -> Option<Side> {
        match (self.roster.is_defeated(Side::A), self.roster.is_defeated(Side::B)) {
            (false, true) => Some(Side::A),
            (true, false) => Some(Side::B),
            _ => None,
        }
    }

    /// Read-only view for policies and tools outside the turn loop.
    pub fn view(&mut self) -> BattleView<'_> {
        BattleView::new(
            &self.roster,
            &self.battlefield,
            &mut self.rng,
            &mut self.log,
            self.turn_number,
        )
    }

    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.roster.snapshot()
    }

    pub fn summary(&self) -> BattleSummary {
        let alive_names = |side: Side| -> Vec<String> {
            self.roster
                .alive_members(side)
                .into_iter()
                .filter_map(|id| self.roster.actor(id))
                .map(|actor| actor.name().to_owned())
                .collect()
        };
        BattleSummary {
            turns: self.turn_number,
            team_a_alive: alive_names(Side::A),
            team_b_alive: alive_names(Side::B),
            winner: self.winner(),
            log: self.log.lines().to_vec(),
            battlefield: self.battlefield.snapshot(),
        }
    }

    /// Drop every listener so nothing from this fight outlives it.
    pub fn teardown(&mut self) {
        self.bus.clear();
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("turn_number", &self.turn_number)
            .field("clock", &self.clock)
            .field("roster", &self.roster)
            .field("battlefield", &self.battlefield)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
