//! Personal course-timetable solver.
//!
//! Assigns one concrete time-slot per required exercise session in a single
//! person's timetable, honoring hard constraints (pairwise non-overlap,
//! excluded days, a global time-of-day window, blocked break intervals)
//! and, on request, minimizing total idle time between sessions.
//!
//! # Modules
//!
//! - **`models`**: domain types — `Subject`, `Activity`, `Slot`,
//!   `Requirements`, `SessionRequest`, `Schedule`
//! - **`validation`**: input-shape checks (owner consistency, durations,
//!   duplicate slot IDs)
//! - **`solver`**: constraint evaluation, candidate grouping, and the
//!   backtracking selector — [`solver::TimetableSolver`]
//!
//! # Design
//!
//! The engine is a pure function over request-scoped value data: it is
//! invoked once per request, runs synchronously to completion, and shares
//! no state across invocations. Infeasibility is an ordinary result — an
//! empty schedule — never an error.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6: CSPs
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod models;
pub mod solver;
pub mod validation;
