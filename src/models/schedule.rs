//! Schedule container.
//!
//! A schedule is an owner plus an ordered sequence of slots. It serves
//! both as input (the pre-existing mandatory commitments) and as output
//! (mandatory commitments plus the selected exercise sessions). An empty
//! slot list in a solver result is the explicit "no solution" value.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Slot, Subject};

/// One person's timetable.
///
/// The output ordering contract is chronological: slots sorted by
/// (day ascending, start time ascending). Consumers render the sequence
/// directly as a timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Identity of the timetable owner.
    pub owner_id: i64,
    /// The placed slots.
    pub slots: Vec<Slot>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(owner_id: i64) -> Self {
        Self {
            owner_id,
            slots: Vec::new(),
        }
    }

    /// Creates a schedule from a slot list.
    pub fn from_slots(owner_id: i64, slots: Vec<Slot>) -> Self {
        Self { owner_id, slots }
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Sorts slots by (day, start time).
    ///
    /// The sort is stable, so same-minute slots keep their relative order.
    pub fn sort_chronologically(&mut self) {
        self.slots.sort_by_key(|s| (s.day, s.start_minutes()));
    }

    /// Distinct subjects referenced by any slot, in first-appearance order.
    pub fn subjects(&self) -> Vec<&Subject> {
        let mut seen = HashSet::new();
        self.slots
            .iter()
            .filter_map(|slot| slot.subject.as_ref())
            .filter(|subject| seen.insert(subject.subject_id))
            .collect()
    }

    /// Whether the schedule has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
