//! Timetable domain models.
//!
//! Provides the core data types for one person's timetable: reference
//! data, placed and offered slots, the requirement rule-set, and the
//! schedule container. All entities are request-scoped value data with
//! no persistence.
//!
//! # Time Model
//!
//! Clock times are minute-granular within a day; days are small integers
//! whose meaning is domain-defined (typically 0 = Monday .. 6 = Sunday).
//! Slots occupy half-open intervals `[start, start + duration)`.

mod requirements;
mod schedule;
mod slot;
mod subject;

pub use requirements::{BreakInterval, RequestedDay, Requirements, SessionRequest};
pub use schedule::Schedule;
pub use slot::{Slot, SlotKind, TimeOfDay, TimeParseError};
pub use subject::{Activity, Subject};
