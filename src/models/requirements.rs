//! Requirement rule-set models.
//!
//! A [`Requirements`] value captures everything the owner demands of the
//! final timetable: days that must stay free, a global time-of-day window,
//! blocked break intervals, the list of exercise sessions to place, and
//! whether total idle time should be minimized instead of returning the
//! first feasible assignment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Subject, TimeOfDay};

/// A blocked break interval on one day.
///
/// No output slot on the same day may overlap it; touching at an endpoint
/// is allowed, matching slot overlap semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// Break start clock time.
    pub start: TimeOfDay,
    /// Break length in minutes (> 0).
    pub duration_minutes: u32,
    /// Day the break applies to.
    pub day: u8,
}

impl BreakInterval {
    /// Creates a new break interval.
    pub fn new(start: TimeOfDay, duration_minutes: u32, day: u8) -> Self {
        Self {
            start,
            duration_minutes,
            day,
        }
    }

    /// Start of the blocked interval, in minutes since midnight.
    #[inline]
    pub fn start_minutes(&self) -> u32 {
        self.start.total_minutes()
    }

    /// End of the blocked interval (exclusive), in minutes since midnight.
    #[inline]
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }
}

/// Day constraint of a session request.
///
/// The wire form keeps the feed's integer encoding: `-1` means any day,
/// a non-negative value names the required day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestedDay {
    /// Any day is acceptable.
    #[default]
    Any,
    /// The session must fall on this day.
    On(u8),
}

impl RequestedDay {
    /// Whether a slot on `day` satisfies this constraint.
    #[inline]
    pub fn admits(&self, day: u8) -> bool {
        match self {
            Self::Any => true,
            Self::On(required) => *required == day,
        }
    }
}

impl Serialize for RequestedDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: i16 = match self {
            Self::Any => -1,
            Self::On(day) => i16::from(*day),
        };
        serializer.serialize_i16(encoded)
    }
}

impl<'de> Deserialize<'de> for RequestedDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i16::deserialize(deserializer)?;
        if raw < 0 {
            Ok(Self::Any)
        } else {
            u8::try_from(raw)
                .map(Self::On)
                .map_err(|_| serde::de::Error::custom(format!("day index {raw} out of range")))
        }
    }
}

/// A request for one exercise session of a subject.
///
/// Optionally narrowed to a day and a start/end sub-window within the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Subject the session belongs to.
    pub subject: Subject,
    /// Candidate slots must not start before this time.
    #[serde(default)]
    pub start: Option<TimeOfDay>,
    /// Candidate slots must end at or before this time.
    #[serde(default)]
    pub end: Option<TimeOfDay>,
    /// Day constraint.
    #[serde(default)]
    pub day: RequestedDay,
}

impl SessionRequest {
    /// Creates an any-day request with no sub-window.
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            start: None,
            end: None,
            day: RequestedDay::Any,
        }
    }

    /// Pins the request to a day.
    pub fn on_day(mut self, day: u8) -> Self {
        self.day = RequestedDay::On(day);
        self
    }

    /// Sets the earliest acceptable session start.
    pub fn with_earliest_start(mut self, start: TimeOfDay) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the latest acceptable session end.
    pub fn with_latest_end(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }
}

/// The full requirement rule-set for one solve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Requirements {
    /// Days that must stay completely free.
    #[serde(default)]
    pub free_days: Vec<u8>,
    /// Global bound: no slot may start before this time.
    #[serde(default)]
    pub start: Option<TimeOfDay>,
    /// Global bound: no slot may end after this time.
    #[serde(default)]
    pub end: Option<TimeOfDay>,
    /// Blocked break intervals.
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    /// Exercise sessions to place.
    #[serde(default)]
    pub requests: Vec<SessionRequest>,
    /// Minimize total idle minutes instead of stopping at the first
    /// feasible assignment.
    #[serde(default)]
    pub minimize_gaps: bool,
}

impl Requirements {
    /// Creates an empty rule-set (everything allowed, nothing requested).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a day that must stay free.
    pub fn with_free_day(mut self, day: u8) -> Self {
        self.free_days.push(day);
        self
    }

    /// Sets the global earliest start.
    pub fn with_start(mut self, start: TimeOfDay) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the global latest end.
    pub fn with_end(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }

    /// Adds a blocked break interval.
    pub fn with_break(mut self, break_interval: BreakInterval) -> Self {
        self.breaks.push(break_interval);
        self
    }

    /// Adds a session request.
    pub fn with_request(mut self, request: SessionRequest) -> Self {
        self.requests.push(request);
        self
    }

    /// Requests gap minimization.
    pub fn minimizing_gaps(mut self) -> Self {
        self.minimize_gaps = true;
        self
    }
}
