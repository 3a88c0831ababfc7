use std::collections::BTreeMap;

use super::ActorId;
use super::team::Side;
use crate::effect::EffectSummary;

/// Read-only copy of one actor's state. This is all a presentation layer sees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub name: String,
    pub side: Option<Side>,
    pub tags: Vec<String>,
    pub alive: bool,
    pub hp: f64,
    pub max_hp: f64,
    /// Every derived stat, then `res_<type>` per known damage type.
    pub stats: Vec<(String, f64)>,
    pub effects: Vec<EffectSummary>,
    pub resources: BTreeMap<String, f64>,
    /// Skill name → remaining cooldown, in skill order.
    pub cooldowns: Vec<(String, u32)>,
}
