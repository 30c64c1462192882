//! Typed in-memory records produced by the normalizer.
//!
//! These are the shapes the filter engine and calendar builder operate on.
//! They are always fully populated: the normalizer substitutes safe
//! defaults for anything a stored document is missing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A single to-do item with a due moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    /// Separate time-of-day stamp kept alongside `deadline`; the calendar
    /// day view prints this rather than the deadline clock time.
    pub time: NaiveDateTime,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

/// A weekly recurring class. `day` is a weekday, not a specific date:
/// the entry is active on every calendar date with that weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEntry {
    pub id: String,
    pub name: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub instructor: String,
}

/// A graded piece of course work with its own status lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub course: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub priority: AssignmentPriority,
    pub status: AssignmentStatus,
    pub created_at: NaiveDateTime,
}
