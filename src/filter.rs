//! The filter engine: record sets plus a selection into visible subsets.
//!
//! Everything here is a pure, stable filter: input order is preserved, no
//! re-sorting happens, and the reference moment is an explicit parameter so
//! two calls with the same inputs give the same answer. Date comparisons
//! are by calendar day, not instant; a task due at 23:59 still counts as
//! "today" for the whole of that day.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::fields::*;
use crate::record::{Assignment, ClassEntry, Task};

/// What a screen asks to see: either one of the fixed filter modes, or an
/// explicit calendar date from one of the calendar screens. The two forms
/// are mutually exclusive per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Mode(FilterMode),
    Date(NaiveDate),
}

impl Selection {
    /// Parse a selection from its string surface: a `YYYY-MM-DD` date, or a
    /// mode name. Unrecognized input fails soft to `all` rather than
    /// erroring; a bad filter parameter must not blank the screen.
    pub fn parse(raw: &str) -> Selection {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Selection::Date(date);
        }
        Selection::Mode(parse_mode_lenient(raw))
    }
}

/// Parse a filter mode name, treating anything unrecognized as `all`.
pub fn parse_mode_lenient(raw: &str) -> FilterMode {
    let raw = raw.trim();
    let modes = [
        ("all", FilterMode::All),
        ("today", FilterMode::Today),
        ("upcoming", FilterMode::Upcoming),
        ("completed", FilterMode::Completed),
        ("uncompleted", FilterMode::Uncompleted),
        ("classes", FilterMode::Classes),
        ("assignments", FilterMode::Assignments),
    ];
    for (name, mode) in modes {
        if raw.eq_ignore_ascii_case(name) {
            return mode;
        }
    }
    FilterMode::All
}

/// The three filtered sequences a list screen renders.
#[derive(Debug, Clone, Default)]
pub struct FilteredData {
    pub tasks: Vec<Task>,
    pub classes: Vec<ClassEntry>,
    pub assignments: Vec<Assignment>,
}

/// Apply a selection to the full record sets. `None` behaves as `all`.
///
/// An explicit date keeps tasks due on that day and classes recurring on
/// that weekday; assignments are not shown on the calendar screens.
pub fn filter_records(
    tasks: &[Task],
    classes: &[ClassEntry],
    assignments: &[Assignment],
    selection: Option<&Selection>,
    now: NaiveDateTime,
) -> FilteredData {
    let today = now.date();
    let weekday_today = Weekday::from_chrono(today.weekday());

    let mode = match selection {
        None => FilterMode::All,
        Some(Selection::Mode(m)) => *m,
        Some(Selection::Date(date)) => {
            let weekday = Weekday::from_chrono(date.weekday());
            return FilteredData {
                tasks: tasks
                    .iter()
                    .filter(|t| t.deadline.date() == *date)
                    .cloned()
                    .collect(),
                classes: classes.iter().filter(|c| c.day == weekday).cloned().collect(),
                assignments: Vec::new(),
            };
        }
    };

    match mode {
        FilterMode::All => FilteredData {
            tasks: tasks.to_vec(),
            classes: classes.to_vec(),
            assignments: assignments.to_vec(),
        },
        FilterMode::Today => FilteredData {
            tasks: tasks
                .iter()
                .filter(|t| t.deadline.date() == today)
                .cloned()
                .collect(),
            classes: classes
                .iter()
                .filter(|c| c.day == weekday_today)
                .cloned()
                .collect(),
            assignments: assignments
                .iter()
                .filter(|a| a.deadline.date() == today)
                .cloned()
                .collect(),
        },
        FilterMode::Upcoming => FilteredData {
            tasks: tasks
                .iter()
                .filter(|t| !t.completed && t.deadline.date() >= today)
                .cloned()
                .collect(),
            classes: Vec::new(),
            assignments: assignments
                .iter()
                .filter(|a| a.status != AssignmentStatus::Completed && a.deadline.date() >= today)
                .cloned()
                .collect(),
        },
        FilterMode::Completed => FilteredData {
            tasks: tasks.iter().filter(|t| t.completed).cloned().collect(),
            classes: Vec::new(),
            assignments: assignments
                .iter()
                .filter(|a| a.status == AssignmentStatus::Completed)
                .cloned()
                .collect(),
        },
        FilterMode::Uncompleted => FilteredData {
            tasks: tasks
                .iter()
                .filter(|t| !t.completed && t.deadline.date() < today)
                .cloned()
                .collect(),
            classes: Vec::new(),
            assignments: assignments
                .iter()
                .filter(|a| a.status != AssignmentStatus::Completed && a.deadline.date() < today)
                .cloned()
                .collect(),
        },
        FilterMode::Classes => FilteredData {
            tasks: Vec::new(),
            classes: classes.to_vec(),
            assignments: Vec::new(),
        },
        FilterMode::Assignments => FilteredData {
            tasks: Vec::new(),
            classes: Vec::new(),
            assignments: assignments.to_vec(),
        },
    }
}

/// One entry in the merged day-planner list. The variant is produced by the
/// merge itself; consumers must never have to guess an item's kind from
/// its fields.
#[derive(Debug, Clone)]
pub enum PlannerItem {
    Class(ClassEntry),
    Task(Task),
}

/// Build the merged day-planner list for the home calendar: with a
/// selected date, the classes recurring on that weekday followed by the
/// tasks due that day; with no selection, every task and no classes.
/// Assignments never appear on the planner.
pub fn day_planner(
    tasks: &[Task],
    classes: &[ClassEntry],
    selected: Option<NaiveDate>,
) -> Vec<PlannerItem> {
    let Some(date) = selected else {
        return tasks.iter().cloned().map(PlannerItem::Task).collect();
    };
    let weekday = Weekday::from_chrono(date.weekday());
    let mut items: Vec<PlannerItem> = classes
        .iter()
        .filter(|c| c.day == weekday)
        .cloned()
        .map(PlannerItem::Class)
        .collect();
    items.extend(
        tasks
            .iter()
            .filter(|t| t.deadline.date() == date)
            .cloned()
            .map(PlannerItem::Task),
    );
    items
}

/// The home screen's quick stats.
#[derive(Debug, Clone, Default)]
pub struct HomeSummary {
    pub today_tasks: usize,
    pub upcoming_tasks: usize,
    pub today_classes: usize,
    pub pending_assignments: usize,
    /// Up to three high/medium tasks due today, highest priority first,
    /// then earliest deadline.
    pub priority_tasks: Vec<Task>,
}

/// Compute the home screen counters and the short priority list.
pub fn home_summary(
    tasks: &[Task],
    classes: &[ClassEntry],
    assignments: &[Assignment],
    now: NaiveDateTime,
) -> HomeSummary {
    let today = now.date();
    let weekday_today = Weekday::from_chrono(today.weekday());

    let today_tasks = tasks.iter().filter(|t| t.deadline.date() == today).count();
    let upcoming_tasks = tasks.iter().filter(|t| t.deadline.date() > today).count();
    let today_classes = classes.iter().filter(|c| c.day == weekday_today).count();
    let pending_assignments = assignments
        .iter()
        .filter(|a| a.status != AssignmentStatus::Completed && a.deadline.date() >= today)
        .count();

    let mut priority_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.deadline.date() == today && t.priority != Priority::Low)
        .cloned()
        .collect();
    priority_tasks.sort_by_key(|t| (priority_rank(t.priority), t.deadline));
    priority_tasks.truncate(3);

    HomeSummary {
        today_tasks,
        upcoming_tasks,
        today_classes,
        pending_assignments,
        priority_tasks,
    }
}

fn priority_rank(p: Priority) -> u8 {
    match p {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        // Wednesday 2024-05-15, mid-morning.
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn task(id: &str, deadline: NaiveDateTime, priority: Priority, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            deadline,
            time: deadline,
            priority,
            completed,
            created_at: now(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn class(id: &str, day: Weekday) -> ClassEntry {
        ClassEntry {
            id: id.to_string(),
            name: format!("class {id}"),
            day,
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
            location: "B2".to_string(),
            instructor: "Dr Low".to_string(),
        }
    }

    fn assignment(id: &str, deadline: NaiveDateTime, status: AssignmentStatus) -> Assignment {
        Assignment {
            id: id.to_string(),
            title: format!("assignment {id}"),
            course: "COMP101".to_string(),
            description: String::new(),
            deadline,
            priority: AssignmentPriority::Medium,
            status,
            created_at: now(),
        }
    }

    #[test]
    fn test_all_mode_is_identity() {
        let tasks = vec![
            task("t1", at(2024, 5, 15, 9, 0), Priority::High, false),
            task("t2", at(2023, 1, 1, 9, 0), Priority::Low, true),
        ];
        let classes = vec![class("c1", Weekday::Monday)];
        let assignments = vec![assignment(
            "a1",
            at(2024, 6, 1, 9, 0),
            AssignmentStatus::NotStarted,
        )];
        let out = filter_records(
            &tasks,
            &classes,
            &assignments,
            Some(&Selection::Mode(FilterMode::All)),
            now(),
        );
        let ids: Vec<&str> = out.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.assignments.len(), 1);
    }

    #[test]
    fn test_missing_selection_behaves_as_all() {
        let tasks = vec![task("t1", at(2023, 1, 1, 9, 0), Priority::Low, false)];
        let out = filter_records(&tasks, &[], &[], None, now());
        assert_eq!(out.tasks.len(), 1);
    }

    #[test]
    fn test_today_holds_across_midnight_boundary() {
        let late = task("late", at(2024, 5, 15, 23, 59), Priority::Medium, false);
        let past_midnight = task("next", at(2024, 5, 16, 0, 1), Priority::Medium, false);
        let out = filter_records(
            &[late.clone(), past_midnight],
            &[],
            &[],
            Some(&Selection::Mode(FilterMode::Today)),
            now(),
        );
        let ids: Vec<&str> = out.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["late"]);
    }

    #[test]
    fn test_today_matches_classes_by_weekday() {
        let classes = vec![class("wed", Weekday::Wednesday), class("fri", Weekday::Friday)];
        let out = filter_records(
            &[],
            &classes,
            &[],
            Some(&Selection::Mode(FilterMode::Today)),
            now(),
        );
        let ids: Vec<&str> = out.classes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["wed"]);
    }

    #[test]
    fn test_upcoming_excludes_past_incomplete_task() {
        let yesterday = task("y", at(2024, 5, 14, 12, 0), Priority::Medium, false);
        let today_task = task("t", at(2024, 5, 15, 23, 0), Priority::Medium, false);
        let done_future = task("d", at(2024, 5, 20, 12, 0), Priority::Medium, true);
        let out = filter_records(
            &[yesterday, today_task, done_future],
            &[],
            &[],
            Some(&Selection::Mode(FilterMode::Upcoming)),
            now(),
        );
        let ids: Vec<&str> = out.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t"]);
        assert!(out.classes.is_empty());
    }

    #[test]
    fn test_completed_and_uncompleted_partition_tasks() {
        let tasks = vec![
            task("done-past", at(2024, 5, 1, 9, 0), Priority::Low, true),
            task("done-future", at(2024, 5, 20, 9, 0), Priority::Low, true),
            task("open-past", at(2024, 5, 1, 9, 0), Priority::Low, false),
            task("open-future", at(2024, 5, 20, 9, 0), Priority::Low, false),
        ];
        let completed = filter_records(
            &tasks,
            &[],
            &[],
            Some(&Selection::Mode(FilterMode::Completed)),
            now(),
        );
        let uncompleted = filter_records(
            &tasks,
            &[],
            &[],
            Some(&Selection::Mode(FilterMode::Uncompleted)),
            now(),
        );
        let upcoming = filter_records(
            &tasks,
            &[],
            &[],
            Some(&Selection::Mode(FilterMode::Upcoming)),
            now(),
        );
        let completed_ids: Vec<&str> = completed.tasks.iter().map(|t| t.id.as_str()).collect();
        let uncompleted_ids: Vec<&str> = uncompleted.tasks.iter().map(|t| t.id.as_str()).collect();
        let upcoming_ids: Vec<&str> = upcoming.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(completed_ids, vec!["done-past", "done-future"]);
        assert_eq!(uncompleted_ids, vec!["open-past"]);
        assert_eq!(upcoming_ids, vec!["open-future"]);
        // Every task lands in exactly one bucket.
        assert_eq!(
            completed_ids.len() + uncompleted_ids.len() + upcoming_ids.len(),
            tasks.len()
        );
    }

    #[test]
    fn test_uncompleted_assignments_are_overdue_only() {
        let assignments = vec![
            assignment("past-open", at(2024, 5, 1, 9, 0), AssignmentStatus::InProgress),
            assignment("past-done", at(2024, 5, 1, 9, 0), AssignmentStatus::Completed),
            assignment("future-open", at(2024, 6, 1, 9, 0), AssignmentStatus::NotStarted),
        ];
        let out = filter_records(
            &[],
            &[],
            &assignments,
            Some(&Selection::Mode(FilterMode::Uncompleted)),
            now(),
        );
        let ids: Vec<&str> = out.assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["past-open"]);
    }

    #[test]
    fn test_classes_and_assignments_modes_are_exclusive() {
        let tasks = vec![task("t", at(2024, 5, 15, 9, 0), Priority::High, false)];
        let classes = vec![class("c", Weekday::Monday)];
        let assignments = vec![assignment(
            "a",
            at(2024, 6, 1, 9, 0),
            AssignmentStatus::NotStarted,
        )];
        let only_classes = filter_records(
            &tasks,
            &classes,
            &assignments,
            Some(&Selection::Mode(FilterMode::Classes)),
            now(),
        );
        assert!(only_classes.tasks.is_empty());
        assert_eq!(only_classes.classes.len(), 1);
        assert!(only_classes.assignments.is_empty());

        let only_assignments = filter_records(
            &tasks,
            &classes,
            &assignments,
            Some(&Selection::Mode(FilterMode::Assignments)),
            now(),
        );
        assert!(only_assignments.tasks.is_empty());
        assert!(only_assignments.classes.is_empty());
        assert_eq!(only_assignments.assignments.len(), 1);
    }

    #[test]
    fn test_explicit_date_selection() {
        let tasks = vec![
            task("hit", at(2024, 5, 1, 9, 0), Priority::Low, false),
            task("miss", at(2024, 5, 2, 9, 0), Priority::Low, false),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(); // a Wednesday
        let classes = vec![class("wed", Weekday::Wednesday), class("thu", Weekday::Thursday)];
        let assignments = vec![assignment(
            "a",
            at(2024, 5, 1, 9, 0),
            AssignmentStatus::NotStarted,
        )];
        let out = filter_records(
            &tasks,
            &classes,
            &assignments,
            Some(&Selection::Date(date)),
            now(),
        );
        let ids: Vec<&str> = out.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["hit"]);
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].id, "wed");
        assert!(out.assignments.is_empty());

        let miss = filter_records(
            &tasks,
            &[],
            &[],
            Some(&Selection::Date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())),
            now(),
        );
        let ids: Vec<&str> = miss.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["miss"]);
    }

    #[test]
    fn test_selection_parse_is_fail_soft() {
        assert_eq!(
            Selection::parse("2024-05-01"),
            Selection::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(
            Selection::parse("Completed"),
            Selection::Mode(FilterMode::Completed)
        );
        assert_eq!(Selection::parse("bogus"), Selection::Mode(FilterMode::All));
        assert_eq!(Selection::parse("05/01/2024"), Selection::Mode(FilterMode::All));
    }

    #[test]
    fn test_day_planner_merges_classes_before_tasks() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(); // Wednesday
        let tasks = vec![
            task("t1", at(2024, 5, 15, 9, 0), Priority::Low, false),
            task("t2", at(2024, 5, 16, 9, 0), Priority::Low, false),
        ];
        let classes = vec![class("wed", Weekday::Wednesday), class("mon", Weekday::Monday)];
        let items = day_planner(&tasks, &classes, Some(date));
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], PlannerItem::Class(c) if c.id == "wed"));
        assert!(matches!(&items[1], PlannerItem::Task(t) if t.id == "t1"));
    }

    #[test]
    fn test_day_planner_without_selection_lists_all_tasks_only() {
        let tasks = vec![
            task("t1", at(2024, 5, 15, 9, 0), Priority::Low, false),
            task("t2", at(2024, 5, 16, 9, 0), Priority::Low, false),
        ];
        let classes = vec![class("wed", Weekday::Wednesday)];
        let items = day_planner(&tasks, &classes, None);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| matches!(i, PlannerItem::Task(_))));
    }

    #[test]
    fn test_home_summary_counts_and_priority_list() {
        let tasks = vec![
            task("low-today", at(2024, 5, 15, 8, 0), Priority::Low, false),
            task("med-today", at(2024, 5, 15, 14, 0), Priority::Medium, false),
            task("high-today", at(2024, 5, 15, 18, 0), Priority::High, false),
            task("tomorrow", at(2024, 5, 16, 9, 0), Priority::High, false),
        ];
        let classes = vec![class("wed", Weekday::Wednesday), class("thu", Weekday::Thursday)];
        let assignments = vec![
            assignment("open", at(2024, 6, 1, 9, 0), AssignmentStatus::NotStarted),
            assignment("done", at(2024, 6, 1, 9, 0), AssignmentStatus::Completed),
            assignment("overdue", at(2024, 5, 1, 9, 0), AssignmentStatus::InProgress),
        ];
        let summary = home_summary(&tasks, &classes, &assignments, now());
        assert_eq!(summary.today_tasks, 3);
        assert_eq!(summary.upcoming_tasks, 1);
        assert_eq!(summary.today_classes, 1);
        assert_eq!(summary.pending_assignments, 1);
        let ids: Vec<&str> = summary.priority_tasks.iter().map(|t| t.id.as_str()).collect();
        // High first despite its later deadline; low excluded.
        assert_eq!(ids, vec!["high-today", "med-today"]);
    }
}
