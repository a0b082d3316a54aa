//! Slot model and interval arithmetic.
//!
//! A slot is one occupancy of the timetable: a placed commitment (lecture,
//! event) or an offered exercise candidate. Interval math is minute-granular
//! on half-open intervals `[start, start + duration)` within a single day;
//! slots on different days never overlap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::{Activity, Subject};

/// Minute-granular clock time.
///
/// Seconds are carried for wire fidelity but ignored by interval
/// arithmetic. Serialized as `"HH:MM:SS"`; `"HH:MM"` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub minute: u8,
    /// Second of minute (0-59). Not used in comparisons of intervals.
    pub second: u8,
}

/// Error parsing a clock-time string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Input is not of the form `"HH:MM"` or `"HH:MM:SS"`.
    #[error("expected \"HH:MM\" or \"HH:MM:SS\", got {0:?}")]
    Malformed(String),
    /// A clock field is outside its valid range.
    #[error("clock field out of range in {0:?}")]
    OutOfRange(String),
}

impl TimeOfDay {
    /// Creates a clock time on the minute.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            second: 0,
        }
    }

    /// Minutes since midnight. Seconds are discarded.
    #[inline]
    pub fn total_minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = [0u8; 3];
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(TimeParseError::Malformed(s.to_string()));
        }
        for (i, part) in parts.iter().enumerate() {
            fields[i] = part
                .parse()
                .map_err(|_| TimeParseError::Malformed(s.to_string()))?;
        }
        let [hour, minute, second] = fields;
        if hour > 23 || minute > 59 || second > 59 {
            return Err(TimeParseError::OutOfRange(s.to_string()));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Classification tag of a slot.
///
/// The wire form is the short code used by timetable feeds: `"P"` for a
/// lecture (the empty string is accepted as an alias on input), `"LV"` for
/// a lab exercise, `"AV"` for a tutorial exercise. Any other tag is
/// preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    /// Frontal lecture (`"P"`, or empty on input).
    Lecture,
    /// Lab exercise session (`"LV"`).
    LabExercise,
    /// Tutorial exercise session (`"AV"`).
    TutorialExercise,
    /// Any other tag, kept as-is.
    Other(String),
}

impl SlotKind {
    /// Parses the short wire code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" | "" => Self::Lecture,
            "LV" => Self::LabExercise,
            "AV" => Self::TutorialExercise,
            other => Self::Other(other.to_string()),
        }
    }

    /// The canonical short code.
    pub fn as_code(&self) -> &str {
        match self {
            Self::Lecture => "P",
            Self::LabExercise => "LV",
            Self::TutorialExercise => "AV",
            Self::Other(code) => code,
        }
    }

    /// Whether this is an exercise kind (lab or tutorial).
    #[inline]
    pub fn is_exercise(&self) -> bool {
        matches!(self, Self::LabExercise | Self::TutorialExercise)
    }
}

impl Serialize for SlotKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for SlotKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}

/// One occupancy of the timetable: a placed commitment or an offered
/// candidate.
///
/// # Classification
///
/// A slot is a **mandatory** commitment when it carries an [`Activity`] or
/// its kind is not an exercise kind; it is an **exercise candidate** when
/// its kind is an exercise kind and it references a [`Subject`]. An
/// exercise slot with neither activity nor subject satisfies no request
/// and is ignored by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier of a placed slot. Offered candidates may omit it.
    #[serde(default)]
    pub slot_id: Option<i64>,
    /// Start-of-day clock time.
    pub start: TimeOfDay,
    /// Duration in minutes (> 0).
    pub duration_minutes: u32,
    /// Day index (domain-defined, typically 0-6).
    pub day: u8,
    /// Room or venue label.
    pub location: String,
    /// Classification tag.
    pub kind: SlotKind,
    /// Course subject, when the slot belongs to a course.
    #[serde(default)]
    pub subject: Option<Subject>,
    /// Non-course occupant, when the slot is an event.
    #[serde(default)]
    pub activity: Option<Activity>,
}

impl Slot {
    /// Creates a lecture slot with no subject, activity, or location.
    pub fn new(start: TimeOfDay, duration_minutes: u32, day: u8) -> Self {
        Self {
            slot_id: None,
            start,
            duration_minutes,
            day,
            location: String::new(),
            kind: SlotKind::Lecture,
            subject: None,
            activity: None,
        }
    }

    /// Sets the slot identifier.
    pub fn with_id(mut self, slot_id: i64) -> Self {
        self.slot_id = Some(slot_id);
        self
    }

    /// Sets the location label.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the kind tag.
    pub fn with_kind(mut self, kind: SlotKind) -> Self {
        self.kind = kind;
        self
    }

    /// Associates a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Associates a non-course activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Start of the occupied interval, in minutes since midnight.
    #[inline]
    pub fn start_minutes(&self) -> u32 {
        self.start.total_minutes()
    }

    /// End of the occupied interval (exclusive), in minutes since midnight.
    #[inline]
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }

    /// Whether two slots occupy intersecting intervals on the same day.
    ///
    /// Intervals are half-open: slots that merely touch at an endpoint
    /// (`end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.day == other.day
            && self.start_minutes() < other.end_minutes()
            && other.start_minutes() < self.end_minutes()
    }

    /// Whether this slot is a fixed commitment that must appear unchanged
    /// in the output.
    #[inline]
    pub fn is_mandatory(&self) -> bool {
        self.activity.is_some() || !self.kind.is_exercise()
    }

    /// Whether this slot can satisfy a session request.
    #[inline]
    pub fn is_exercise_candidate(&self) -> bool {
        self.kind.is_exercise() && self.subject.is_some()
    }

    /// Identifier of the associated subject, if any.
    pub fn subject_id(&self) -> Option<i64> {
        self.subject.as_ref().map(|s| s.subject_id)
    }
}
