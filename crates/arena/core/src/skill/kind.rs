use crate::stats::Stat;

/// The closed set of skill behaviours.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkillKind {
    /// Damage one living enemy chosen at random.
    SingleTargetAttack { power: f64, damage_type: String },
    /// Restore a flat amount to the ally with the lowest health fraction.
    Heal { amount: f64 },
    /// Grant the user a timed flat bonus to one stat.
    Buff { stat: Stat, amount: f64, duration: i32 },
}

impl SkillKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleTargetAttack { .. } => "attack",
            Self::Heal { .. } => "heal",
            Self::Buff { .. } => "buff",
        }
    }
}
