//! Initiative queue ordering actors by readiness time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::actor::ActorId;
use crate::config::BattleConfig;
use crate::error::{ArenaError, ErrorSeverity};

/// Errors that can occur during timeline operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    #[error("no actors are scheduled")]
    Empty,
}

impl ArenaError for TimelineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "timeline_empty",
        }
    }
}

/// One scheduled action. Ordered by `(ready_at, counter)`; `counter` is unique
/// per timeline, so `actor` never decides the order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimelineEntry {
    pub ready_at: OrderedFloat<f64>,
    pub counter: u64,
    pub actor: ActorId,
}

/// Min-heap of [`TimelineEntry`] with first-scheduled-first-served tie-breaking.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    queue: BinaryHeap<Reverse<TimelineEntry>>,
    counter: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time between two actions of an actor with `speed`.
    pub fn readiness_delay(speed: f64) -> f64 {
        (BattleConfig::BASE_CADENCE / speed.max(BattleConfig::MIN_SPEED))
            .max(BattleConfig::MIN_ACTION_INTERVAL)
    }

    /// Schedule `actor` at `current_time + readiness_delay(speed)`.
    pub fn add(&mut self, actor: ActorId, speed: f64, current_time: f64) -> TimelineEntry {
        let entry = TimelineEntry {
            ready_at: OrderedFloat(current_time + Self::readiness_delay(speed)),
            counter: self.counter,
            actor,
        };
        self.counter += 1;
        self.queue.push(Reverse(entry));
        entry
    }

    /// Requeue an actor after its turn. Same as [`add`](Self::add).
    pub fn schedule_next(
        &mut self,
        actor: ActorId,
        speed: f64,
        current_time: f64,
    ) -> TimelineEntry {
        self.add(actor, speed, current_time)
    }

    /// Remove the entry with the smallest `(ready_at, counter)`.
    pub fn pop_next(&mut self) -> Result<TimelineEntry, TimelineError> {
        self.queue
            .pop()
            .map(|Reverse(entry)| entry)
            .ok_or(TimelineError::Empty)
    }

    pub fn peek(&self) -> Option<&TimelineEntry> {
        self.queue.peek().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faster_actor_is_ready_first() {
        let mut timeline = Timeline::new();
        let slow = timeline.add(ActorId(0), 50.0, 0.0);
        let fast = timeline.add(ActorId(1), 100.0, 0.0);

        assert_eq!(slow.ready_at.0, 2.0);
        assert_eq!(fast.ready_at.0, 1.0);
        assert_eq!(timeline.pop_next().map(|e| e.actor), Ok(ActorId(1)));
        assert_eq!(timeline.pop_next().map(|e| e.actor), Ok(ActorId(0)));
    }

    #[test]
    fn ties_go_to_the_earlier_insertion() {
        let mut timeline = Timeline::new();
        timeline.add(ActorId(7), 100.0, 0.0);
        timeline.add(ActorId(3), 100.0, 0.0);

        let first = timeline.pop_next().unwrap();
        let second = timeline.pop_next().unwrap();
        assert_eq!((first.actor, first.ready_at.0), (ActorId(7), 1.0));
        assert_eq!((second.actor, second.ready_at.0), (ActorId(3), 1.0));
    }

    #[test]
    fn delay_is_floored() {
        assert_eq!(Timeline::readiness_delay(0.0), 100.0);
        assert_eq!(Timeline::readiness_delay(-20.0), 100.0);
        assert_eq!(Timeline::readiness_delay(1000.0), 1.0);
    }

    #[test]
    fn counter_keeps_growing_across_pops() {
        let mut timeline = Timeline::new();
        timeline.add(ActorId(0), 100.0, 0.0);
        timeline.pop_next().unwrap();
        let entry = timeline.schedule_next(ActorId(0), 100.0, 1.0);
        assert_eq!(entry.counter, 1);
        assert_eq!(entry.ready_at.0, 2.0);
    }

    #[test]
    fn popping_empty_timeline_fails() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.pop_next(), Err(TimelineError::Empty));
    }
}
