//! Enumerations and field types for the three record kinds.
//!
//! This module defines the structured data types used to categorise tasks,
//! class-schedule entries and assignments, along with the list filter modes.
//! Task and assignment priorities are deliberately kept as two separate
//! enumerations with their original stored casings (`"high"` vs `"High"`);
//! the stored documents treat them as separate domains.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for tasks. Stored lowercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Priority classification for assignments. Stored capitalised.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum AssignmentPriority {
    Low,
    Medium,
    High,
}

/// Assignment completion status. Stored with the original spaced labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum AssignmentStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

/// Recurring weekday for class-schedule entries. Stored as the full
/// English weekday name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Days after Sunday, matching the weekday indexing of the stored data.
    pub fn num_days_from_sunday(self) -> i64 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    pub fn from_chrono(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

/// List filter modes for the tasks screen.
///
/// `Upcoming` and `Uncompleted` split the not-yet-done records by whether
/// their deadline day is still ahead of (or on) the reference day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    All,
    Today,
    Upcoming,
    Completed,
    Uncompleted,
    Classes,
    Assignments,
}

/// Record kinds addressable by point mutations (e.g. `delete`).
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RecordKind {
    Task,
    Class,
    Assignment,
}

/// Stored label for a task priority. The same strings serve as the
/// display form in tables.
pub fn priority_label(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

/// Stored label for an assignment priority.
pub fn assignment_priority_label(p: AssignmentPriority) -> &'static str {
    match p {
        AssignmentPriority::Low => "Low",
        AssignmentPriority::Medium => "Medium",
        AssignmentPriority::High => "High",
    }
}

/// Stored label for an assignment status.
pub fn assignment_status_label(s: AssignmentStatus) -> &'static str {
    match s {
        AssignmentStatus::NotStarted => "Not Started",
        AssignmentStatus::InProgress => "In Progress",
        AssignmentStatus::Completed => "Completed",
    }
}

/// Stored label for a weekday.
pub fn weekday_label(d: Weekday) -> &'static str {
    match d {
        Weekday::Sunday => "Sunday",
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
    }
}

/// Lowercase noun for a record kind, for user-facing messages.
pub fn kind_label(k: RecordKind) -> &'static str {
    match k {
        RecordKind::Task => "task",
        RecordKind::Class => "class",
        RecordKind::Assignment => "assignment",
    }
}
