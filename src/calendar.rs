//! Calendar dot-markers derived from the task and class sets.
//!
//! A month view asks one question per day: is anything on, and what colour
//! is the dot. Tasks mark the day of their deadline with their priority
//! colour; classes mark the next date their weekday comes around. Within a
//! day the first writer wins: a later task (or any class) never overwrites
//! an existing marker, so a day with several tasks keeps the colour of the
//! first one in input order. That is the stored behaviour, kept as-is.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::fields::{Priority, Weekday};
use crate::record::{ClassEntry, Task};

/// Dot colour for high-priority tasks.
pub const HIGH_DOT: &str = "#ef4444";
/// Dot colour for medium-priority tasks.
pub const MEDIUM_DOT: &str = "#eab308";
/// Dot colour for low-priority tasks.
pub const LOW_DOT: &str = "#22c55e";
/// Dot colour for class occurrences and the selected-day highlight.
pub const CLASS_DOT: &str = "#3b82f6";
pub const SELECTED_COLOR: &str = "#3b82f6";
/// Task-only calendar: dot colour for completed / still-open tasks.
pub const COMPLETED_DOT: &str = "green";
pub const OPEN_DOT: &str = "blue";

/// A single day's annotation on the month view. Selection is overlaid on
/// top of a mark; both facts stay representable at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayMarker {
    pub marked: bool,
    pub dot_color: Option<&'static str>,
    pub selected: bool,
    pub selected_color: Option<&'static str>,
}

impl DayMarker {
    fn dot(color: &'static str) -> Self {
        DayMarker {
            marked: true,
            dot_color: Some(color),
            ..DayMarker::default()
        }
    }
}

/// Dot colour for a task priority.
pub fn priority_dot(p: Priority) -> &'static str {
    match p {
        Priority::High => HIGH_DOT,
        Priority::Medium => MEDIUM_DOT,
        Priority::Low => LOW_DOT,
    }
}

/// The next calendar date on or after `today` falling on the given
/// weekday; today's own weekday maps to today.
pub fn next_occurrence(day: Weekday, today: NaiveDate) -> NaiveDate {
    let today_idx = Weekday::from_chrono(today.weekday()).num_days_from_sunday();
    let ahead = (day.num_days_from_sunday() - today_idx + 7) % 7;
    today + Duration::days(ahead)
}

/// Build the home-calendar marker map from the task and class sets, with
/// an optional selected date overlaid.
///
/// Deterministic for a fixed `{tasks, classes, today}`, but the class
/// markers move as `today` crosses a weekday boundary; callers pass the
/// reference date explicitly and recompute per render.
pub fn marked_dates(
    tasks: &[Task],
    classes: &[ClassEntry],
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, DayMarker> {
    let mut marked: BTreeMap<NaiveDate, DayMarker> = BTreeMap::new();

    for task in tasks {
        let date = task.deadline.date();
        if !marked.contains_key(&date) {
            marked.insert(date, DayMarker::dot(priority_dot(task.priority)));
        }
    }

    for class in classes {
        let date = next_occurrence(class.day, today);
        if !marked.contains_key(&date) {
            marked.insert(date, DayMarker::dot(CLASS_DOT));
        }
    }

    if let Some(date) = selected {
        let entry = marked.entry(date).or_default();
        entry.selected = true;
        entry.selected_color = Some(SELECTED_COLOR);
    }

    marked
}

/// Task-only calendar variant: dot coloured by the completion state of
/// the first task on each day, same first-writer-wins policy.
pub fn task_marked_dates(tasks: &[Task]) -> BTreeMap<NaiveDate, DayMarker> {
    let mut marked: BTreeMap<NaiveDate, DayMarker> = BTreeMap::new();
    for task in tasks {
        let date = task.deadline.date();
        if !marked.contains_key(&date) {
            let color = if task.completed { COMPLETED_DOT } else { OPEN_DOT };
            marked.insert(date, DayMarker::dot(color));
        }
    }
    marked
}
