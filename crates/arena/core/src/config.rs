/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    /// Turn cap for [`crate::Battle::run`] when the driver does not pass its own.
    pub max_turns: u32,
    /// Seed for the battle RNG (target picks, critical rolls).
    pub seed: u64,
    /// Thresholds used by the default decision policy.
    pub heuristic: HeuristicConfig,
}

impl BattleConfig {
    // ===== formula constants =====
    /// Speed-units consumed per action; readiness delay is `BASE_CADENCE / speed`.
    pub const BASE_CADENCE: f64 = 100.0;
    /// Shortest possible gap between two actions of the same actor.
    pub const MIN_ACTION_INTERVAL: f64 = 1.0;
    /// Speed is floored to this before dividing.
    pub const MIN_SPEED: f64 = 1.0;
    /// Lower bound of the defense mitigation factor.
    pub const MIN_MITIGATION: f64 = 0.1;
    /// Modifier shift per matching `<tag>_weak` / `<tag>_resist` tag.
    pub const TAG_AFFINITY: f64 = 0.25;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 100;
    pub const DEFAULT_SEED: u64 = 0;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            seed: Self::DEFAULT_SEED,
            heuristic: HeuristicConfig::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tuning for [`crate::HeuristicPolicy`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeuristicConfig {
    /// Heal when the neediest ally is below this health fraction.
    pub heal_threshold: f64,
    /// Prefer buff skills while the turn number is below this value.
    pub buff_turns: u32,
}

impl HeuristicConfig {
    pub const DEFAULT_HEAL_THRESHOLD: f64 = 0.4;
    pub const DEFAULT_BUFF_TURNS: u32 = 3;
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            heal_threshold: Self::DEFAULT_HEAL_THRESHOLD,
            buff_turns: Self::DEFAULT_BUFF_TURNS,
        }
    }
}
