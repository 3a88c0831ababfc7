use crate::actor::Side;
use crate::battlefield::FieldEffectSnapshot;

/// Read-only outcome of a battle, valid at any point of its lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub turns: u32,
    pub team_a_alive: Vec<String>,
    pub team_b_alive: Vec<String>,
    /// `None` while both sides stand (or if both fell).
    pub winner: Option<Side>,
    pub log: Vec<String>,
    pub battlefield: Vec<FieldEffectSnapshot>,
}
