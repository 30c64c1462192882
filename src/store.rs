//! Document store and raw document shapes.
//!
//! This module provides the file-backed `Store` holding the raw document
//! collections for one account, along with creation-time validation and the
//! point mutations (create/update/delete) the screens delegate to. Raw
//! documents mirror what the remote collections hold: every field except
//! `id` is optional and timestamps are serialized strings. Turning them into
//! reliable typed records is the normalizer's job, not the store's.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Serialized timestamp layout used when this store writes documents.
/// Reading is more lenient; see `normalize::parse_timestamp`.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// A stored task document. Field names match the remote collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDoc {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub time: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    pub created_at: Option<String>,
}

/// A stored class-schedule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassDoc {
    pub id: String,
    pub name: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub instructor: Option<String>,
}

/// A stored assignment document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentDoc {
    pub id: String,
    pub title: Option<String>,
    pub course: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// One account's document collections, persisted as a single JSON file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub tasks: Vec<TaskDoc>,
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
    #[serde(default)]
    pub assignments: Vec<AssignmentDoc>,
}

impl Store {
    /// Load a store from a JSON file, starting fresh if the file doesn't
    /// exist or can't be parsed. A damaged store file must not make the
    /// whole CLI unusable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Store::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(store) => store,
                Err(e) => {
                    eprintln!("Error parsing store, starting fresh: {e}");
                    Store::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading store, starting fresh: {e}");
                Store::default()
            }
        }
    }

    /// Save the store to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Create a task document. Rejects an empty title and a deadline
    /// strictly before `now`; already-stored tasks are never re-validated.
    pub fn create_task(
        &mut self,
        title: &str,
        description: &str,
        due: chrono::NaiveDate,
        time: NaiveTime,
        priority: Priority,
        now: NaiveDateTime,
    ) -> Result<String, String> {
        let title = title.trim();
        if title.is_empty() {
            return Err("Please enter a task title".to_string());
        }
        let deadline = due.and_time(time);
        if deadline < now {
            return Err("Task deadline cannot be in the past".to_string());
        }
        let id = next_doc_id('t', self.tasks.iter().map(|d| d.id.as_str()));
        self.tasks.push(TaskDoc {
            id: id.clone(),
            title: Some(title.to_string()),
            description: Some(description.trim().to_string()),
            deadline: Some(format_timestamp(deadline)),
            time: Some(format_timestamp(deadline)),
            priority: Some(priority_label(priority).to_string()),
            completed: Some(false),
            created_at: Some(format_timestamp(now)),
        });
        Ok(id)
    }

    /// Create a class-schedule document. All fields are required.
    pub fn create_class(
        &mut self,
        name: &str,
        day: Weekday,
        start_time: &str,
        end_time: &str,
        location: &str,
        instructor: &str,
    ) -> Result<String, String> {
        let fields = [name, start_time, end_time, location, instructor];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err("Please fill in all fields".to_string());
        }
        let id = next_doc_id('c', self.classes.iter().map(|d| d.id.as_str()));
        self.classes.push(ClassDoc {
            id: id.clone(),
            name: Some(name.trim().to_string()),
            day: Some(weekday_label(day).to_string()),
            start_time: Some(start_time.trim().to_string()),
            end_time: Some(end_time.trim().to_string()),
            location: Some(location.trim().to_string()),
            instructor: Some(instructor.trim().to_string()),
        });
        Ok(id)
    }

    /// Create an assignment document. Title and course are required;
    /// unlike tasks, a past deadline is accepted.
    pub fn create_assignment(
        &mut self,
        title: &str,
        course: &str,
        description: &str,
        due: chrono::NaiveDate,
        priority: AssignmentPriority,
        status: AssignmentStatus,
        now: NaiveDateTime,
    ) -> Result<String, String> {
        let title = title.trim();
        let course = course.trim();
        if title.is_empty() || course.is_empty() {
            return Err("Please fill in all required fields".to_string());
        }
        let id = next_doc_id('a', self.assignments.iter().map(|d| d.id.as_str()));
        self.assignments.push(AssignmentDoc {
            id: id.clone(),
            title: Some(title.to_string()),
            course: Some(course.to_string()),
            description: Some(description.trim().to_string()),
            deadline: Some(format_timestamp(due.and_time(end_of_day()))),
            priority: Some(assignment_priority_label(priority).to_string()),
            status: Some(assignment_status_label(status).to_string()),
            created_at: Some(format_timestamp(now)),
        });
        Ok(id)
    }

    /// Set a task's completion flag.
    pub fn set_task_completed(&mut self, id: &str, completed: bool) -> Result<(), String> {
        match self.tasks.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.completed = Some(completed);
                Ok(())
            }
            None => Err(format!("Task with ID {id} not found")),
        }
    }

    /// Toggle an assignment between `Completed` and `Not Started`, returning
    /// the new status. The toggle never produces `In Progress`; that status
    /// is only reachable at creation time.
    pub fn toggle_assignment_status(&mut self, id: &str) -> Result<AssignmentStatus, String> {
        match self.assignments.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                let new = if doc.status.as_deref() == Some("Completed") {
                    AssignmentStatus::NotStarted
                } else {
                    AssignmentStatus::Completed
                };
                doc.status = Some(assignment_status_label(new).to_string());
                Ok(new)
            }
            None => Err(format!("Assignment with ID {id} not found")),
        }
    }

    /// Delete one document of the given kind.
    pub fn delete(&mut self, kind: RecordKind, id: &str) -> Result<(), String> {
        let removed = match kind {
            RecordKind::Task => {
                let before = self.tasks.len();
                self.tasks.retain(|d| d.id != id);
                self.tasks.len() < before
            }
            RecordKind::Class => {
                let before = self.classes.len();
                self.classes.retain(|d| d.id != id);
                self.classes.len() < before
            }
            RecordKind::Assignment => {
                let before = self.assignments.len();
                self.assignments.retain(|d| d.id != id);
                self.assignments.len() < before
            }
        };
        if removed {
            Ok(())
        } else {
            Err(format!("No {} with ID {id}", kind_label(kind)))
        }
    }
}

/// Generate the next opaque document id with the given kind prefix
/// ("t1", "c4", ...). Ids are opaque to everything outside this module.
fn next_doc_id<'a>(prefix: char, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", max + 1)
}

/// Format a timestamp for storage.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FMT).to_string()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap()
}
