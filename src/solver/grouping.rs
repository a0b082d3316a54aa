//! Candidate grouping.
//!
//! Splits the fixed commitments out of an existing schedule, completes the
//! request list against the subjects it mentions, and builds one filtered
//! candidate group per request from the offered pool. Groups come out
//! sorted smallest-first: deciding the tightest domain early keeps the
//! branching factor of the search down.

use std::collections::HashSet;

use crate::models::{Requirements, Schedule, SessionRequest, Slot};

/// Extracts the mandatory commitments from an existing schedule.
///
/// A slot is mandatory when it carries an activity or its kind is not an
/// exercise kind (see [`Slot::is_mandatory`]). Exercise slots already in
/// the schedule are dropped: placing exercises is the solver's job.
pub fn mandatory_slots(schedule: &Schedule) -> Vec<Slot> {
    schedule
        .slots
        .iter()
        .filter(|slot| slot.is_mandatory())
        .cloned()
        .collect()
}

/// Whether any two slots in the set overlap pairwise.
pub fn any_overlap(slots: &[Slot]) -> bool {
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            if a.overlaps(b) {
                return true;
            }
        }
    }
    false
}

/// Completes the request list against the subjects present in the schedule.
///
/// Synthesizes one any-day, unwindowed request per subject that appears in
/// the schedule but not in the list, then keeps at most one request per
/// subject, first occurrence winning. Pure: the input is untouched and a
/// new `Requirements` is returned.
pub fn complete_requests(requirements: &Requirements, schedule: &Schedule) -> Requirements {
    let mut seen = HashSet::new();
    let mut requests: Vec<SessionRequest> = Vec::new();

    for request in &requirements.requests {
        if seen.insert(request.subject.subject_id) {
            requests.push(request.clone());
        }
    }
    for subject in schedule.subjects() {
        if seen.insert(subject.subject_id) {
            requests.push(SessionRequest::new(subject.clone()));
        }
    }

    Requirements {
        requests,
        ..requirements.clone()
    }
}

/// Builds the per-request candidate groups from the offered pool.
///
/// Each group holds the pool slots eligible for one request; an empty
/// group means that request can never be satisfied. Groups are sorted
/// ascending by candidate count (stable, so ties keep request order).
pub fn build_groups(pool: &[Slot], requirements: &Requirements) -> Vec<Vec<Slot>> {
    let mut groups: Vec<Vec<Slot>> = requirements
        .requests
        .iter()
        .map(|request| eligible_candidates(pool, request, requirements))
        .collect();
    groups.sort_by_key(Vec::len);
    groups
}

/// Filters the pool down to the slots eligible for one request.
fn eligible_candidates(
    pool: &[Slot],
    request: &SessionRequest,
    requirements: &Requirements,
) -> Vec<Slot> {
    pool.iter()
        .filter(|slot| {
            slot.is_exercise_candidate()
                && slot.subject_id() == Some(request.subject.subject_id)
                && !requirements.free_days.contains(&slot.day)
                && requirements
                    .start
                    .is_none_or(|bound| slot.start_minutes() >= bound.total_minutes())
                && requirements
                    .end
                    .is_none_or(|bound| slot.end_minutes() <= bound.total_minutes())
                && request.day.admits(slot.day)
                && request
                    .start
                    .is_none_or(|bound| slot.start_minutes() >= bound.total_minutes())
                && request
                    .end
                    .is_none_or(|bound| slot.end_minutes() <= bound.total_minutes())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, RequestedDay, SlotKind, Subject, TimeOfDay};

    fn subject(id: i64) -> Subject {
        Subject::new(id, format!("S{id}"), format!("Subject {id}"))
    }

    fn lecture(day: u8, hour: u8, subject_id: i64) -> Slot {
        Slot::new(TimeOfDay::new(hour, 0), 90, day).with_subject(subject(subject_id))
    }

    fn lab(day: u8, hour: u8, subject_id: i64) -> Slot {
        Slot::new(TimeOfDay::new(hour, 0), 90, day)
            .with_kind(SlotKind::LabExercise)
            .with_subject(subject(subject_id))
    }

    #[test]
    fn test_mandatory_split() {
        let schedule = Schedule::new(1)
            .with_slot(lecture(1, 9, 1))
            .with_slot(lab(1, 11, 1)) // exercise, not kept
            .with_slot(
                Slot::new(TimeOfDay::new(18, 0), 120, 3)
                    .with_kind(SlotKind::TutorialExercise)
                    .with_activity(Activity::new("TD", "Tech Days")),
            );

        let mandatory = mandatory_slots(&schedule);
        assert_eq!(mandatory.len(), 2);
        assert!(mandatory.iter().all(Slot::is_mandatory));
    }

    #[test]
    fn test_split_is_idempotent() {
        let schedule = Schedule::new(1)
            .with_slot(lecture(1, 9, 1))
            .with_slot(lab(2, 10, 2));

        let first = mandatory_slots(&schedule);
        let second = mandatory_slots(&Schedule::from_slots(1, first.clone()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_overlap() {
        assert!(!any_overlap(&[]));
        assert!(!any_overlap(&[lecture(1, 9, 1), lecture(1, 11, 2)]));
        assert!(any_overlap(&[
            lecture(1, 9, 1),
            lecture(2, 9, 2),
            lecture(1, 10, 3), // 10:00 crosses the 09:00+90min slot
        ]));
    }

    #[test]
    fn test_complete_requests_synthesizes_missing_subjects() {
        let schedule = Schedule::new(1)
            .with_slot(lecture(1, 9, 1))
            .with_slot(lecture(2, 9, 2));
        let requirements =
            Requirements::new().with_request(SessionRequest::new(subject(2)).on_day(4));

        let completed = complete_requests(&requirements, &schedule);
        assert_eq!(completed.requests.len(), 2);
        // The explicit request for subject 2 survives with its day pin.
        assert_eq!(completed.requests[0].day, RequestedDay::On(4));
        // Subject 1 is synthesized: any day, no sub-window.
        assert_eq!(completed.requests[1].subject.subject_id, 1);
        assert_eq!(completed.requests[1].day, RequestedDay::Any);
        assert_eq!(completed.requests[1].start, None);

        // Pure: the input list is untouched.
        assert_eq!(requirements.requests.len(), 1);
    }

    #[test]
    fn test_complete_requests_deduplicates_first_wins() {
        let requirements = Requirements::new()
            .with_request(SessionRequest::new(subject(1)).on_day(2))
            .with_request(SessionRequest::new(subject(1)).on_day(3));

        let completed = complete_requests(&requirements, &Schedule::new(1));
        assert_eq!(completed.requests.len(), 1);
        assert_eq!(completed.requests[0].day, RequestedDay::On(2));
    }

    #[test]
    fn test_complete_requests_idempotent() {
        let schedule = Schedule::new(1).with_slot(lecture(1, 9, 1));
        let requirements = Requirements::new();

        let once = complete_requests(&requirements, &schedule);
        let twice = complete_requests(&once, &schedule);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_group_filter_criteria() {
        let requirements = Requirements::new()
            .with_free_day(4)
            .with_start(TimeOfDay::new(9, 0))
            .with_end(TimeOfDay::new(17, 0))
            .with_request(SessionRequest::new(subject(1)).on_day(2));

        let pool = vec![
            lab(2, 10, 1),                               // eligible
            lab(2, 10, 2),                               // wrong subject
            lab(3, 10, 1),                               // wrong day
            lab(4, 10, 1),                               // excluded day
            lab(2, 8, 1),                                // before global start
            lab(2, 16, 1),                               // ends 17:30, past global end
            lecture(2, 10, 1),                           // not an exercise kind
            lab(2, 11, 1),                               // eligible
        ];

        let groups = build_groups(&pool, &requirements);
        assert_eq!(groups.len(), 1);
        let starts: Vec<u32> = groups[0].iter().map(Slot::start_minutes).collect();
        assert_eq!(starts, vec![600, 660]);
    }

    #[test]
    fn test_group_request_sub_window() {
        let requirements = Requirements::new().with_request(
            SessionRequest::new(subject(1))
                .on_day(2)
                .with_earliest_start(TimeOfDay::new(10, 0))
                .with_latest_end(TimeOfDay::new(14, 0)),
        );

        let pool = vec![
            lab(2, 9, 1),  // starts before the sub-window
            lab(2, 10, 1), // eligible
            lab(2, 13, 1), // ends 14:30, past the sub-window end
        ];

        let groups = build_groups(&pool, &requirements);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0][0].start_minutes(), 600);
    }

    #[test]
    fn test_groups_sorted_smallest_first() {
        let requirements = Requirements::new()
            .with_request(SessionRequest::new(subject(1)))
            .with_request(SessionRequest::new(subject(2)));

        let pool = vec![lab(1, 9, 1), lab(2, 9, 1), lab(1, 11, 2)];
        let groups = build_groups(&pool, &requirements);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[0][0].subject_id(), Some(2));
    }

    #[test]
    fn test_empty_group_for_unsatisfiable_request() {
        let requirements = Requirements::new().with_request(SessionRequest::new(subject(9)));
        let groups = build_groups(&[lab(1, 9, 1)], &requirements);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_empty());
    }
}
