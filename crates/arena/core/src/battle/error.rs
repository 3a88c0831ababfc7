use crate::actor::{ActorId, SetupError};
use crate::error::{ArenaError, ErrorSeverity};
use crate::policy::PolicyError;

/// Errors that can stop a battle from being built or from finishing its run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("actor {0} is not part of this battle")]
    UnknownActor(ActorId),

    /// The policy picked a skill outside the actor's available set.
    #[error("actor {actor} cannot use skill {skill} this turn")]
    UnavailableSkill { actor: ActorId, skill: usize },
}

impl ArenaError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(err) => err.severity(),
            Self::Policy(err) => err.severity(),
            Self::UnknownActor(_) | Self::UnavailableSkill { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(err) => err.error_code(),
            Self::Policy(err) => err.error_code(),
            Self::UnknownActor(_) => "battle_unknown_actor",
            Self::UnavailableSkill { .. } => "battle_unavailable_skill",
        }
    }
}
