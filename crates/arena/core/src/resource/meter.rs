use std::collections::BTreeMap;

/// A single named meter.
///
/// Invariant: `0 <= value <= maximum` after every mutation unless
/// `allow_overcap` is set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub name: String,
    pub maximum: f64,
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_per_turn: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decay_per_turn: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_overcap: bool,
    /// Event name → flat gain whenever that event fires for the owner.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gain_on_events: BTreeMap<String, f64>,
}

impl Resource {
    pub fn new(name: impl Into<String>, maximum: f64, value: f64) -> Self {
        let mut resource = Self {
            name: name.into(),
            maximum,
            value,
            regen_per_turn: 0.0,
            decay_per_turn: 0.0,
            allow_overcap: false,
            gain_on_events: BTreeMap::new(),
        };
        resource.clamp();
        resource
    }

    #[must_use]
    pub fn with_regen(mut self, per_turn: f64) -> Self {
        self.regen_per_turn = per_turn;
        self
    }

    #[must_use]
    pub fn with_decay(mut self, per_turn: f64) -> Self {
        self.decay_per_turn = per_turn;
        self
    }

    #[must_use]
    pub fn with_overcap(mut self) -> Self {
        self.allow_overcap = true;
        self
    }

    #[must_use]
    pub fn with_gain_on(mut self, event_name: impl Into<String>, amount: f64) -> Self {
        self.gain_on_events.insert(event_name.into(), amount);
        self
    }

    pub fn clamp(&mut self) {
        if !self.allow_overcap {
            self.value = self.value.min(self.maximum).max(0.0);
        }
    }

    /// Flat gain (or loss, for negative `amount`), then clamp.
    pub fn add(&mut self, amount: f64) {
        self.value += amount;
        self.clamp();
    }

    /// Regen, then decay, then clamp.
    pub fn turn_start(&mut self) {
        self.value += self.regen_per_turn;
        self.value -= self.decay_per_turn;
        self.clamp();
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.maximum
    }
}
