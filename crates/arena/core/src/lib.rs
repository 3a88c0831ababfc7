//! Deterministic turn-based battle engine.
//!
//! `arena-core` simulates combat between two teams of autonomous actors.
//! Actors accrue initiative on a [`Timeline`], act through a
//! [`DecisionPolicy`], and every side effect of their skills flows through a
//! priority-ordered [`EventBus`]. All state mutation for a fight goes through
//! [`Battle`]; the remaining modules are the components it binds together.
pub mod actor;
pub mod battle;
pub mod battlefield;
pub mod combat;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod policy;
pub mod resource;
pub mod skill;
pub mod stats;
pub mod timeline;

pub use actor::{Actor, ActorId, ActorSnapshot, Roster, SetupError, Side, SkillSlot, Team, TeamSpec};
pub use battle::{Battle, BattleError, BattleLog, BattleSummary, BattleView};
pub use battlefield::{Battlefield, FieldEffect, FieldEffectSnapshot, FieldEvent, FieldScope};
pub use combat::{DamageRoll, compute_damage, mitigation};
pub use config::{BattleConfig, HeuristicConfig};
pub use effect::{EffectController, EffectEvent, EffectHook, EffectInstance, EffectSummary};
pub use error::{ArenaError, ErrorSeverity};
pub use event::{
    Dispatch, EventBus, EventContext, EventListener, ListenerHandle, Payload, PayloadValue,
    Reaction,
};
pub use policy::{
    ChosenAction, DecisionPolicy, FirstAvailablePolicy, HeuristicPolicy, PolicyError,
};
pub use resource::{Resource, ResourceCost, ResourceGainListener, ResourcePool};
pub use skill::{Skill, SkillKind};
pub use stats::{BaseStats, Stat, StatError, StatModel, combine_resistances};
pub use timeline::{Timeline, TimelineEntry, TimelineError};
