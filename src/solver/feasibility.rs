//! Constraint evaluator.
//!
//! A pure predicate over a set of placed slots: excluded days, the global
//! time-of-day window, and blocked break intervals must all hold. The
//! predicate is re-evaluated over the full set wherever it is needed; slot
//! sets are a handful of entries, so there is no incremental caching.

use crate::models::{BreakInterval, Requirements, Slot, TimeOfDay};

/// Whether every slot satisfies all hard requirements.
///
/// Checks, all of which must hold:
/// 1. No slot falls on an excluded day.
/// 2. Every slot lies within the global time window, when bounds are set.
/// 3. No slot overlaps a blocked break on the same day (touching at an
///    endpoint is allowed).
pub fn satisfies(slots: &[&Slot], requirements: &Requirements) -> bool {
    clear_of_free_days(slots, &requirements.free_days)
        && within_window(slots, requirements.start, requirements.end)
        && clear_of_breaks(slots, &requirements.breaks)
}

fn clear_of_free_days(slots: &[&Slot], free_days: &[u8]) -> bool {
    slots.iter().all(|slot| !free_days.contains(&slot.day))
}

fn within_window(slots: &[&Slot], start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> bool {
    if let Some(start) = start {
        let bound = start.total_minutes();
        if slots.iter().any(|slot| slot.start_minutes() < bound) {
            return false;
        }
    }
    if let Some(end) = end {
        let bound = end.total_minutes();
        if slots.iter().any(|slot| slot.end_minutes() > bound) {
            return false;
        }
    }
    true
}

fn clear_of_breaks(slots: &[&Slot], breaks: &[BreakInterval]) -> bool {
    breaks.iter().all(|break_interval| {
        slots.iter().all(|slot| {
            slot.day != break_interval.day
                || slot.end_minutes() <= break_interval.start_minutes()
                || break_interval.end_minutes() <= slot.start_minutes()
        })
    })
}
