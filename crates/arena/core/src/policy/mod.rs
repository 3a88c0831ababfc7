//! Decision policies: who does what on their turn.
//!
//! The battle asks a [`DecisionPolicy`] for exactly one [`ChosenAction`] per
//! turn. Policies see the fight through a [`BattleView`] and may only pick a
//! skill from the actor's available set.

mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::actor::ActorId;
use crate::battle::BattleView;
use crate::error::{ArenaError, ErrorSeverity};

/// An actor paired with the index of the skill it will use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChosenAction {
    pub actor: ActorId,
    pub skill: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Every actor must keep at least one usable skill; hitting this is a
    /// roster configuration error.
    #[error("{actor} has no available skill")]
    NoActionAvailable { actor: String },

    #[error("unknown actor {0}")]
    UnknownActor(ActorId),
}

impl ArenaError for PolicyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActionAvailable { .. } => ErrorSeverity::Fatal,
            Self::UnknownActor(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActionAvailable { .. } => "policy_no_action",
            Self::UnknownActor(_) => "policy_unknown_actor",
        }
    }
}

/// Turns battle state into one action for `actor`.
pub trait DecisionPolicy: Send + Sync {
    /// # Errors
    ///
    /// [`PolicyError::NoActionAvailable`] if `actor` has no available skill.
    fn choose_action(
        &self,
        actor: ActorId,
        view: &mut BattleView<'_>,
    ) -> Result<ChosenAction, PolicyError>;
}

/// Always uses the first available skill. Useful for scripted fights.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailablePolicy;

impl DecisionPolicy for FirstAvailablePolicy {
    fn choose_action(
        &self,
        actor: ActorId,
        view: &mut BattleView<'_>,
    ) -> Result<ChosenAction, PolicyError> {
        let combatant = view.actor(actor).ok_or(PolicyError::UnknownActor(actor))?;
        combatant
            .available_skills()
            .first()
            .map(|(skill, _)| ChosenAction {
                actor,
                skill: *skill,
            })
            .ok_or_else(|| PolicyError::NoActionAvailable {
                actor: combatant.name().to_owned(),
            })
    }
}
