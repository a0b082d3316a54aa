//! Input validation for solve requests.
//!
//! Checks the shape of an inbound request before the solver runs:
//! - Owner identity consistent between the request and its schedule
//! - Strictly positive slot and break durations
//! - No duplicate slot IDs within the schedule or within the pool
//!
//! The solver itself assumes validated input; infeasibility is its normal
//! output, never a validation error.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Slot;
use crate::solver::SolveRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The request and its schedule name different owners.
    OwnerMismatch,
    /// A slot or break has a zero duration.
    ZeroDuration,
    /// Two slots in the same collection share an ID.
    DuplicateSlotId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the shape of a solve request.
///
/// All detected issues are collected; `Ok(())` means the request is safe
/// to hand to the solver.
pub fn validate_request(request: &SolveRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.owner_id != request.schedule.owner_id {
        errors.push(ValidationError::new(
            ValidationErrorKind::OwnerMismatch,
            format!(
                "request owner {} does not match schedule owner {}",
                request.owner_id, request.schedule.owner_id
            ),
        ));
    }

    check_durations(&request.schedule.slots, "schedule", &mut errors);
    check_durations(&request.pool, "pool", &mut errors);
    for break_interval in &request.requirements.breaks {
        if break_interval.duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!(
                    "break on day {} at {} has zero duration",
                    break_interval.day, break_interval.start
                ),
            ));
        }
    }

    check_duplicate_ids(&request.schedule.slots, "schedule", &mut errors);
    check_duplicate_ids(&request.pool, "pool", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_durations(slots: &[Slot], collection: &str, errors: &mut Vec<ValidationError>) {
    for slot in slots {
        if slot.duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!(
                    "{collection} slot on day {} at {} has zero duration",
                    slot.day, slot.start
                ),
            ));
        }
    }
}

fn check_duplicate_ids(slots: &[Slot], collection: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for slot in slots {
        if let Some(id) = slot.slot_id {
            if !seen.insert(id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSlotId,
                    format!("duplicate slot ID {id} in {collection}"),
                ));
            }
        }
    }
}
