//! Timetable solving engine.
//!
//! Orchestrates the pipeline: classify fixed commitments, reject instances
//! whose commitments already conflict, complete and group the session
//! requests, then run the backtracking selection — first feasible, or
//! minimal total idle time when requested.
//!
//! Infeasibility is not an error. The solver always returns a schedule,
//! and an empty slot list is the explicit "no solution" value; policy
//! (status codes, messages) belongs to the boundary that calls it.
//!
//! # Example
//!
//! ```
//! use timetable_solver::models::{Requirements, Schedule, SessionRequest, Slot, SlotKind, Subject, TimeOfDay};
//! use timetable_solver::solver::{SolveRequest, TimetableSolver};
//!
//! let subject = Subject::new(1, "OSA", "Operating Systems");
//! let pool = vec![Slot::new(TimeOfDay::new(10, 0), 90, 2)
//!     .with_kind(SlotKind::LabExercise)
//!     .with_subject(subject.clone())];
//! let requirements = Requirements::new().with_request(SessionRequest::new(subject));
//!
//! let request = SolveRequest::new(1, Schedule::new(1), requirements).with_pool(pool);
//! let schedule = TimetableSolver::new().solve(&request);
//! assert_eq!(schedule.slot_count(), 1);
//! ```

mod feasibility;
mod gaps;
mod grouping;
mod search;

pub use feasibility::satisfies;
pub use gaps::{nearest_gap_minutes, total_gap_minutes};
pub use grouping::{any_overlap, build_groups, complete_requests, mandatory_slots};
pub use search::SearchStats;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Requirements, Schedule, Slot};

/// The full input of one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Identity of the timetable owner.
    pub owner_id: i64,
    /// Pre-existing commitments, already placed.
    pub schedule: Schedule,
    /// The requirement rule-set.
    pub requirements: Requirements,
    /// Offered candidate slots, distinct from the existing schedule.
    #[serde(default)]
    pub pool: Vec<Slot>,
}

impl SolveRequest {
    /// Creates a solve request with an empty candidate pool.
    pub fn new(owner_id: i64, schedule: Schedule, requirements: Requirements) -> Self {
        Self {
            owner_id,
            schedule,
            requirements,
            pool: Vec::new(),
        }
    }

    /// Sets the candidate pool.
    pub fn with_pool(mut self, pool: Vec<Slot>) -> Self {
        self.pool = pool;
        self
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum search nodes to visit before giving up with the best
    /// solution found so far. `None` = unbounded.
    pub node_budget: Option<u64>,
}

/// The timetable solver.
///
/// Stateless between invocations: each call owns its own search state, so
/// concurrent solves of different requests need no coordination.
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SolverConfig,
}

impl TimetableSolver {
    /// Creates a solver with the default (unbounded) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver from a configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Caps the number of search nodes visited per solve.
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.config.node_budget = Some(node_budget);
        self
    }

    /// Solves a request.
    ///
    /// Returns the mandatory commitments plus one selected candidate per
    /// session request, sorted by (day, start time). An empty slot list
    /// means no feasible assignment exists.
    pub fn solve(&self, request: &SolveRequest) -> Schedule {
        self.solve_with_stats(request).0
    }

    /// Solves a request and reports search diagnostics.
    pub fn solve_with_stats(&self, request: &SolveRequest) -> (Schedule, SearchStats) {
        let mandatory = grouping::mandatory_slots(&request.schedule);

        if grouping::any_overlap(&mandatory) {
            debug!("mandatory slots overlap; no solution");
            return (Schedule::new(request.owner_id), SearchStats::default());
        }

        let mandatory_refs: Vec<&Slot> = mandatory.iter().collect();
        if !feasibility::satisfies(&mandatory_refs, &request.requirements) {
            debug!("mandatory slots violate requirements; no solution");
            return (Schedule::new(request.owner_id), SearchStats::default());
        }

        let requirements = grouping::complete_requests(&request.requirements, &request.schedule);
        if requirements.requests.is_empty() {
            // Nothing to place; the commitments alone are the timetable.
            let mut schedule = Schedule::from_slots(request.owner_id, mandatory);
            schedule.sort_chronologically();
            return (schedule, SearchStats::default());
        }

        let groups = grouping::build_groups(&request.pool, &requirements);
        if groups.iter().any(Vec::is_empty) {
            debug!("a session request has no eligible candidates; no solution");
            return (Schedule::new(request.owner_id), SearchStats::default());
        }

        debug!(
            groups = groups.len(),
            minimize_gaps = requirements.minimize_gaps,
            "starting backtracking search"
        );
        let (selection, stats) = search::run(
            &mandatory,
            &requirements,
            &groups,
            self.config.node_budget,
        );

        match selection {
            Some(selected) => {
                let mut slots = mandatory;
                slots.extend(selected);
                let mut schedule = Schedule::from_slots(request.owner_id, slots);
                schedule.sort_chronologically();
                (schedule, stats)
            }
            None => (Schedule::new(request.owner_id), stats),
        }
    }
}
