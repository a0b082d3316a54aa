//! Backtracking slot selection.
//!
//! Depth-first search over the candidate groups, selecting one slot per
//! group. Placements are rejected on pairwise overlap, the full
//! requirement predicate is re-validated after every tentative add, and
//! when gap minimization is requested the search prunes branches whose
//! partial idle total already reaches the best finished total: the total
//! never decreases as a day fills up, so such branches cannot improve on
//! the best (branch-and-bound).
//!
//! In first-feasible mode the first complete assignment stops the whole
//! search. The best-so-far state lives inside the [`Search`] value; one
//! search invocation owns it exclusively and discards it on completion.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6: Constraint Satisfaction Problems

use tracing::{debug, trace};

use crate::models::{Requirements, Slot};

use super::{feasibility, gaps};

/// Diagnostics from one search run.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Candidate placements considered.
    pub nodes_visited: u64,
    /// Complete feasible assignments encountered.
    pub solutions_found: u64,
    /// Whether the node budget stopped the search early.
    pub budget_exhausted: bool,
    /// Idle-minute total of the returned selection, when gap minimization
    /// was requested and a solution was found.
    pub best_gap_minutes: Option<u32>,
}

/// Whether to keep exploring siblings or unwind the whole search.
enum Flow {
    Continue,
    Stop,
}

/// One backtracking run over a fixed set of groups.
struct Search<'a> {
    mandatory: &'a [Slot],
    requirements: &'a Requirements,
    groups: &'a [Vec<Slot>],
    node_budget: Option<u64>,
    selection: Vec<Slot>,
    best: Option<Vec<Slot>>,
    best_gap: Option<u32>,
    stats: SearchStats,
}

/// Runs the backtracking selection.
///
/// Returns the selected slots (one per group) and the run diagnostics, or
/// `None` when no feasible assignment exists within the budget.
pub(super) fn run(
    mandatory: &[Slot],
    requirements: &Requirements,
    groups: &[Vec<Slot>],
    node_budget: Option<u64>,
) -> (Option<Vec<Slot>>, SearchStats) {
    let mut search = Search {
        mandatory,
        requirements,
        groups,
        node_budget,
        selection: Vec::with_capacity(groups.len()),
        best: None,
        best_gap: None,
        stats: SearchStats::default(),
    };
    search.descend(0);

    let Search {
        best,
        best_gap,
        mut stats,
        ..
    } = search;
    stats.best_gap_minutes = best_gap;
    debug!(
        nodes = stats.nodes_visited,
        solutions = stats.solutions_found,
        found = best.is_some(),
        "search finished"
    );
    (best, stats)
}

impl Search<'_> {
    fn descend(&mut self, depth: usize) -> Flow {
        if depth == self.groups.len() {
            return self.record_leaf();
        }

        for candidate in self.candidate_order(depth) {
            if self.over_budget() {
                trace!(depth, "node budget exhausted");
                self.stats.budget_exhausted = true;
                return Flow::Stop;
            }
            self.stats.nodes_visited += 1;

            if self.conflicts_with_placed(&candidate) {
                continue;
            }

            self.selection.push(candidate);
            if self.placed_are_feasible() && self.worth_descending() {
                if let Flow::Stop = self.descend(depth + 1) {
                    self.selection.pop();
                    return Flow::Stop;
                }
            }
            self.selection.pop();
        }
        Flow::Continue
    }

    /// Candidates of one group, in exploration order.
    ///
    /// With gap minimization active and anything already placed, closest-
    /// to-placed first; otherwise (day, start) for determinism. Computed
    /// once per node, against the selection state at entry.
    fn candidate_order(&self, depth: usize) -> Vec<Slot> {
        let mut order = self.groups[depth].clone();
        if self.requirements.minimize_gaps
            && (!self.mandatory.is_empty() || !self.selection.is_empty())
        {
            let placed = self.placed();
            order.sort_by_key(|candidate| gaps::nearest_gap_minutes(candidate, &placed));
        } else {
            order.sort_by_key(|candidate| (candidate.day, candidate.start_minutes()));
        }
        order
    }

    fn placed(&self) -> Vec<&Slot> {
        self.mandatory.iter().chain(self.selection.iter()).collect()
    }

    fn over_budget(&self) -> bool {
        self.node_budget
            .is_some_and(|budget| self.stats.nodes_visited >= budget)
    }

    fn conflicts_with_placed(&self, candidate: &Slot) -> bool {
        self.mandatory
            .iter()
            .chain(self.selection.iter())
            .any(|placed| placed.overlaps(candidate))
    }

    fn placed_are_feasible(&self) -> bool {
        feasibility::satisfies(&self.placed(), self.requirements)
    }

    /// Branch-and-bound gate below a recorded best.
    ///
    /// Strict: a branch whose partial idle total already equals the best
    /// can only rediscover an equal solution, which the strictly-better
    /// update rule would discard anyway.
    fn worth_descending(&self) -> bool {
        if !self.requirements.minimize_gaps {
            return true;
        }
        match self.best_gap {
            Some(best) => gaps::total_gap_minutes(&self.placed()) < best,
            None => true,
        }
    }

    fn record_leaf(&mut self) -> Flow {
        // Defensive re-check over the complete assignment.
        if !self.placed_are_feasible() {
            return Flow::Continue;
        }
        self.stats.solutions_found += 1;

        if self.requirements.minimize_gaps {
            let total = gaps::total_gap_minutes(&self.placed());
            if self.best_gap.is_none_or(|best| total < best) {
                trace!(total, "new best selection");
                self.best = Some(self.selection.clone());
                self.best_gap = Some(total);
            }
            Flow::Continue
        } else {
            // First feasible assignment wins; stop the whole search.
            self.best = Some(self.selection.clone());
            Flow::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotKind, Subject, TimeOfDay};

    fn subject(id: i64) -> Subject {
        Subject::new(id, format!("S{id}"), format!("Subject {id}"))
    }

    fn lab(day: u8, hour: u8, subject_id: i64) -> Slot {
        Slot::new(TimeOfDay::new(hour, 0), 90, day)
            .with_kind(SlotKind::LabExercise)
            .with_subject(subject(subject_id))
    }

    #[test]
    fn test_zero_groups_is_trivially_solved() {
        let (selection, stats) = run(&[], &Requirements::new(), &[], None);
        assert_eq!(selection, Some(vec![]));
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_one_candidate_per_group() {
        let groups = vec![vec![lab(1, 9, 1)], vec![lab(2, 9, 2)]];
        let (selection, stats) = run(&[], &Requirements::new(), &groups, None);

        let selected = selection.unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(stats.solutions_found, 1);
        assert!(!stats.budget_exhausted);
    }

    #[test]
    fn test_overlapping_only_candidates_fail() {
        // Both groups offer only the same 09:00 interval on day 1.
        let groups = vec![vec![lab(1, 9, 1)], vec![lab(1, 9, 2)]];
        let (selection, stats) = run(&[], &Requirements::new(), &groups, None);
        assert!(selection.is_none());
        assert_eq!(stats.solutions_found, 0);
    }

    #[test]
    fn test_backtracks_to_compatible_combination() {
        // Group 1 prefers 09:00 on day 1 (deterministic order), which
        // collides with group 2's only option; the search must back up.
        let groups = vec![
            vec![lab(1, 9, 1), lab(2, 9, 1)],
            vec![lab(1, 9, 2)],
        ];
        let (selection, _) = run(&[], &Requirements::new(), &groups, None);
        let selected = selection.unwrap();
        assert_eq!(selected.len(), 2);
        assert!(!selected[0].overlaps(&selected[1]));
    }

    #[test]
    fn test_mandatory_conflicts_reject_candidates() {
        let mandatory = vec![Slot::new(TimeOfDay::new(9, 0), 90, 1)];
        let groups = vec![vec![lab(1, 9, 1), lab(1, 11, 1)]];
        let (selection, _) = run(&mandatory, &Requirements::new(), &groups, None);

        let selected = selection.unwrap();
        assert_eq!(selected[0].start_minutes(), 660);
    }

    #[test]
    fn test_first_feasible_stops_early() {
        let groups = vec![vec![lab(1, 9, 1), lab(1, 11, 1), lab(1, 13, 1)]];
        let (selection, stats) = run(&[], &Requirements::new(), &groups, None);

        // Deterministic order: earliest candidate wins, one leaf visited.
        assert_eq!(selection.unwrap()[0].start_minutes(), 540);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.nodes_visited, 1);
    }

    #[test]
    fn test_gap_minimization_picks_adjacent_candidate() {
        // A fixed 12:00 session; 10:00 neighbors it, 16:00 leaves 150 idle
        // minutes. The optimizer must keep searching past the first leaf.
        let mandatory = vec![lab(2, 12, 9)];
        let requirements = Requirements::new().minimizing_gaps();
        let groups = vec![vec![lab(2, 16, 1), lab(2, 10, 1)]];

        let (selection, stats) = run(&mandatory, &requirements, &groups, None);
        assert_eq!(selection.unwrap()[0].start_minutes(), 600);
        assert_eq!(stats.best_gap_minutes, Some(30));
    }

    #[test]
    fn test_gap_minimization_explores_all_solutions() {
        let requirements = Requirements::new().minimizing_gaps();
        let groups = vec![vec![lab(1, 9, 1), lab(1, 13, 1)], vec![lab(1, 11, 2)]];

        let (selection, stats) = run(&[], &requirements, &groups, None);
        // Both 09:00 and 13:00 pair with 11:00 at 30 idle minutes; the
        // first one found is kept and the equal branch is pruned before
        // its leaf.
        assert!(stats.solutions_found >= 1);
        assert_eq!(stats.best_gap_minutes, Some(30));
        assert_eq!(selection.unwrap().len(), 2);
    }

    #[test]
    fn test_requirements_checked_on_partial_selections() {
        // The 08:00 candidate violates the global window and must be
        // undone mid-search, not only at the leaf.
        let requirements = Requirements::new().with_start(TimeOfDay::new(9, 0));
        let groups = vec![vec![lab(1, 8, 1), lab(1, 10, 1)]];

        let (selection, _) = run(&[], &requirements, &groups, None);
        assert_eq!(selection.unwrap()[0].start_minutes(), 600);
    }

    #[test]
    fn test_zero_budget_reports_exhaustion() {
        let groups = vec![vec![lab(1, 9, 1)]];
        let (selection, stats) = run(&[], &Requirements::new(), &groups, Some(0));
        assert!(selection.is_none());
        assert!(stats.budget_exhausted);
        assert_eq!(stats.nodes_visited, 0);
    }

    #[test]
    fn test_budget_keeps_best_effort_solution() {
        // Generous enough to find the first solution in gap mode, then cut
        // off; the recorded best must survive.
        let requirements = Requirements::new().minimizing_gaps();
        let groups = vec![vec![lab(1, 9, 1), lab(1, 13, 1)], vec![lab(1, 11, 2)]];

        let (unbounded, _) = run(&[], &requirements, &groups, None);
        let (bounded, stats) = run(&[], &requirements, &groups, Some(3));
        assert!(bounded.is_some());
        assert!(stats.nodes_visited <= 3);
        // A large budget matches the unbounded result.
        let (generous, _) = run(&[], &requirements, &groups, Some(10_000));
        assert_eq!(generous, unbounded);
    }
}
