//! Subject and activity reference data.
//!
//! A subject identifies a course; an activity identifies a non-course
//! occupant of a slot (a one-off event, a reserved block). Both are
//! immutable reference data carried by [`Slot`](super::Slot).

use serde::{Deserialize, Serialize};

/// A course subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub subject_id: i64,
    /// Short display code (e.g. "PRPO").
    pub code: String,
    /// Full display name.
    pub name: String,
}

impl Subject {
    /// Creates a new subject.
    pub fn new(subject_id: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            subject_id,
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A non-course occupant of a slot.
///
/// A slot carrying an activity is a fixed commitment regardless of its
/// kind tag; see [`Slot::is_mandatory`](super::Slot::is_mandatory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier, when known.
    #[serde(default)]
    pub activity_id: Option<i64>,
    /// Short display code.
    pub code: String,
    /// Full display name.
    pub name: String,
}

impl Activity {
    /// Creates a new activity without an identifier.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            activity_id: None,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Sets the activity identifier.
    pub fn with_id(mut self, activity_id: i64) -> Self {
        self.activity_id = Some(activity_id);
        self
    }
}
