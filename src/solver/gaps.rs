//! Idle-gap objective.
//!
//! The scalar minimized when gap minimization is requested: total idle
//! minutes between consecutive occupied intervals, summed over all days.
//! Also provides the nearest-gap distance used to order candidates during
//! the search.

use std::collections::BTreeMap;

use crate::models::Slot;

/// Total idle minutes across all days.
///
/// Per day: intervals are sorted by start and swept with a running
/// furthest end; each positive distance from that end to the next start is
/// idle time. Overlapping or touching intervals contribute nothing, and an
/// interval contained in an earlier one cannot open a false gap because
/// the furthest end never moves backwards. The result is independent of
/// the input order.
pub fn total_gap_minutes(slots: &[&Slot]) -> u32 {
    let mut by_day: BTreeMap<u8, Vec<(u32, u32)>> = BTreeMap::new();
    for slot in slots {
        by_day
            .entry(slot.day)
            .or_default()
            .push((slot.start_minutes(), slot.end_minutes()));
    }

    let mut total = 0;
    for intervals in by_day.values_mut() {
        if intervals.len() < 2 {
            continue;
        }
        intervals.sort_unstable();
        let mut furthest_end = intervals[0].1;
        for &(start, end) in &intervals[1..] {
            if start > furthest_end {
                total += start - furthest_end;
            }
            furthest_end = furthest_end.max(end);
        }
    }
    total
}

/// Minute distance from `candidate` to the closest placed interval on the
/// same day.
///
/// Returns 0 when nothing is placed on that day, and 0 when the candidate
/// overlaps a placed interval: overlapping candidates are rejected later
/// anyway, and the zero keeps them from dominating the ordering.
pub fn nearest_gap_minutes(candidate: &Slot, placed: &[&Slot]) -> u32 {
    let start = candidate.start_minutes();
    let end = candidate.end_minutes();

    let mut nearest: Option<u32> = None;
    for other in placed.iter().filter(|p| p.day == candidate.day) {
        let distance = if end <= other.start_minutes() {
            other.start_minutes() - end
        } else if other.end_minutes() <= start {
            start - other.end_minutes()
        } else {
            0
        };
        nearest = Some(nearest.map_or(distance, |n| n.min(distance)));
    }
    nearest.unwrap_or(0)
}
