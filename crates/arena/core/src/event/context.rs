use std::collections::BTreeMap;

use crate::actor::ActorId;

/// A single payload entry carried by an [`EventContext`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayloadValue {
    Number(f64),
    Flag(bool),
    Text(String),
    /// Explicitly absent (e.g. damage with no attacker).
    Missing,
}

impl PayloadValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for PayloadValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Free-form event payload, keyed by the names in [`super::names::keys`].
pub type Payload = BTreeMap<String, PayloadValue>;

/// Describes one broadcast: what happened, who caused it, who it touched.
///
/// Listeners only ever see a shared reference. To rebroadcast a related event,
/// [`derive`](Self::derive) a copy and adjust it with the builder methods.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventContext {
    name: String,
    source: Option<ActorId>,
    targets: Vec<ActorId>,
    payload: Payload,
}

impl EventContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            targets: Vec::new(),
            payload: Payload::new(),
        }
    }

    /// Copy of this context, for listeners that rebroadcast with changes.
    #[must_use]
    pub fn derive(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<Option<ActorId>>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ActorId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<PayloadValue>) -> Self {
        self.payload.insert(key.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload.extend(payload);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<ActorId> {
        self.source
    }

    pub fn targets(&self) -> &[ActorId] {
        &self.targets
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.payload.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PayloadValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PayloadValue::as_flag)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PayloadValue::as_text)
    }

    /// True if `actor` is the source or one of the targets.
    pub fn involves(&self, actor: ActorId) -> bool {
        self.source == Some(actor) || self.targets.contains(&actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_leaves_original_untouched() {
        let original = EventContext::new("on_attack")
            .with_source(ActorId(1))
            .with_targets([ActorId(2)])
            .with("amount", 12.5);

        let derived = original
            .derive()
            .renamed("on_counter")
            .with_targets([ActorId(1)])
            .with("amount", 3.0);

        assert_eq!(original.name(), "on_attack");
        assert_eq!(original.targets(), &[ActorId(2)]);
        assert_eq!(original.number("amount"), Some(12.5));
        assert_eq!(derived.name(), "on_counter");
        assert_eq!(derived.source(), Some(ActorId(1)));
        assert_eq!(derived.number("amount"), Some(3.0));
    }

    #[test]
    fn optional_payload_becomes_missing() {
        let ctx = EventContext::new("on_receive_damage").with("attacker", None::<String>);
        assert_eq!(ctx.get("attacker"), Some(&PayloadValue::Missing));
        assert_eq!(ctx.text("attacker"), None);
    }

    #[test]
    fn involves_checks_source_and_targets() {
        let ctx = EventContext::new("x")
            .with_source(ActorId(0))
            .with_targets([ActorId(3)]);
        assert!(ctx.involves(ActorId(0)));
        assert!(ctx.involves(ActorId(3)));
        assert!(!ctx.involves(ActorId(1)));
    }
}
