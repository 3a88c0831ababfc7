/// Recognised stat names.
///
/// Parsing is case-insensitive snake_case (`"crit_chance"`), which is how
/// skills, effects and content files refer to stats.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    /// Maximum health.
    Hp,
    /// Offense for physical and true damage.
    Atk,
    /// Offense for every other damage type.
    Mag,
    /// Mitigates physical damage.
    Defense,
    /// Mitigates non-physical damage.
    Resistance,
    /// Probability in [0, 1) of a critical hit.
    CritChance,
    /// Damage multiplier on a critical hit.
    CritDamage,
    /// Initiative; higher acts more often.
    Speed,
    Accuracy,
    Evasion,
}

impl Stat {
    pub const COUNT: usize = 10;

    pub const ALL: [Stat; Self::COUNT] = [
        Stat::Hp,
        Stat::Atk,
        Stat::Mag,
        Stat::Defense,
        Stat::Resistance,
        Stat::CritChance,
        Stat::CritDamage,
        Stat::Speed,
        Stat::Accuracy,
        Stat::Evasion,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

pub const PHYSICAL: &str = "physical";
pub const TRUE_DAMAGE: &str = "true";

/// Damage types every stat model knows from the start.
pub const DEFAULT_DAMAGE_TYPES: [&str; 7] = [
    PHYSICAL,
    "magical",
    "fire",
    "ice",
    "electric",
    "arcane",
    TRUE_DAMAGE,
];

/// Physical and true damage scale with `atk`; everything else with `mag`.
pub fn uses_attack_stat(damage_type: &str) -> bool {
    damage_type == PHYSICAL || damage_type == TRUE_DAMAGE
}
