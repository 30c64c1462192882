//! Record normalization: raw stored documents into typed records.
//!
//! Stored documents can be missing fields or carry unparsable timestamps;
//! none of that is allowed to block rendering the rest of a list. Every
//! function here recovers with a safe default instead of failing: absent
//! timestamps become the reference moment, absent flags become `false`,
//! absent priorities become medium. The reference moment is an explicit
//! parameter; nothing in this module reads the system clock.

use chrono::{DateTime, Datelike, NaiveDateTime};

use crate::fields::*;
use crate::record::{Assignment, ClassEntry, Task};
use crate::store::{AssignmentDoc, ClassDoc, TaskDoc, TIMESTAMP_FMT};

/// Parse a serialized timestamp, substituting `now` when the field is
/// absent or unparsable. Accepts this store's own layout and RFC 3339.
pub fn parse_timestamp(raw: Option<&str>, now: NaiveDateTime) -> NaiveDateTime {
    let Some(s) = raw else { return now };
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT) {
        return dt;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.naive_local();
    }
    now
}

/// Parse a stored task priority, defaulting to medium.
pub fn parse_priority(raw: Option<&str>) -> Priority {
    match raw.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("low") => Priority::Low,
        Some(s) if s.eq_ignore_ascii_case("high") => Priority::High,
        _ => Priority::Medium,
    }
}

/// Parse a stored assignment priority, defaulting to Medium.
pub fn parse_assignment_priority(raw: Option<&str>) -> AssignmentPriority {
    match raw.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("low") => AssignmentPriority::Low,
        Some(s) if s.eq_ignore_ascii_case("high") => AssignmentPriority::High,
        _ => AssignmentPriority::Medium,
    }
}

/// Parse a stored assignment status, defaulting to Not Started.
pub fn parse_assignment_status(raw: Option<&str>) -> AssignmentStatus {
    match raw.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("completed") => AssignmentStatus::Completed,
        Some(s) if s.eq_ignore_ascii_case("in progress") => AssignmentStatus::InProgress,
        _ => AssignmentStatus::NotStarted,
    }
}

/// Parse a stored weekday name, falling back to the given weekday when the
/// field is absent or unrecognized.
pub fn parse_weekday(raw: Option<&str>, fallback: Weekday) -> Weekday {
    let Some(s) = raw else { return fallback };
    let s = s.trim();
    let names = [
        ("Sunday", Weekday::Sunday),
        ("Monday", Weekday::Monday),
        ("Tuesday", Weekday::Tuesday),
        ("Wednesday", Weekday::Wednesday),
        ("Thursday", Weekday::Thursday),
        ("Friday", Weekday::Friday),
        ("Saturday", Weekday::Saturday),
    ];
    for (name, day) in names {
        if s.eq_ignore_ascii_case(name) {
            return day;
        }
    }
    fallback
}

/// Normalize a batch of task documents. Pure; preserves input order and
/// never deduplicates (unique ids are the store's guarantee).
pub fn normalize_tasks(docs: &[TaskDoc], now: NaiveDateTime) -> Vec<Task> {
    docs.iter()
        .map(|doc| Task {
            id: doc.id.clone(),
            title: doc.title.clone().unwrap_or_default(),
            description: doc.description.clone().unwrap_or_default(),
            deadline: parse_timestamp(doc.deadline.as_deref(), now),
            time: parse_timestamp(doc.time.as_deref(), now),
            priority: parse_priority(doc.priority.as_deref()),
            completed: doc.completed.unwrap_or(false),
            created_at: parse_timestamp(doc.created_at.as_deref(), now),
        })
        .collect()
}

/// Normalize a batch of class documents.
pub fn normalize_classes(docs: &[ClassDoc], now: NaiveDateTime) -> Vec<ClassEntry> {
    let fallback_day = Weekday::from_chrono(now.weekday());
    docs.iter()
        .map(|doc| ClassEntry {
            id: doc.id.clone(),
            name: doc.name.clone().unwrap_or_default(),
            day: parse_weekday(doc.day.as_deref(), fallback_day),
            start_time: doc.start_time.clone().unwrap_or_default(),
            end_time: doc.end_time.clone().unwrap_or_default(),
            location: doc.location.clone().unwrap_or_default(),
            instructor: doc.instructor.clone().unwrap_or_default(),
        })
        .collect()
}

/// Normalize a batch of assignment documents.
pub fn normalize_assignments(docs: &[AssignmentDoc], now: NaiveDateTime) -> Vec<Assignment> {
    docs.iter()
        .map(|doc| Assignment {
            id: doc.id.clone(),
            title: doc.title.clone().unwrap_or_default(),
            course: doc.course.clone().unwrap_or_default(),
            description: doc.description.clone().unwrap_or_default(),
            deadline: parse_timestamp(doc.deadline.as_deref(), now),
            priority: parse_assignment_priority(doc.priority.as_deref()),
            status: parse_assignment_status(doc.status.as_deref()),
            created_at: parse_timestamp(doc.created_at.as_deref(), now),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_document_never_fails() {
        let doc = TaskDoc {
            id: "t1".to_string(),
            ..TaskDoc::default()
        };
        let tasks = normalize_tasks(&[doc], now());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].deadline, now());
        assert_eq!(tasks[0].created_at, now());
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert!(!tasks[0].completed);
        assert_eq!(tasks[0].title, "");
    }

    #[test]
    fn test_unparsable_timestamp_becomes_now() {
        let doc = TaskDoc {
            id: "t1".to_string(),
            deadline: Some("next thursday-ish".to_string()),
            ..TaskDoc::default()
        };
        let tasks = normalize_tasks(&[doc], now());
        assert_eq!(tasks[0].deadline, now());
    }

    #[test]
    fn test_parses_own_layout_and_rfc3339() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp(Some("2024-06-01T09:00:00"), now()), expected);
        assert_eq!(
            parse_timestamp(Some("2024-06-01T09:00:00+00:00"), now()),
            expected
        );
    }

    #[test]
    fn test_priority_casings_are_separate_domains() {
        assert_eq!(parse_priority(Some("high")), Priority::High);
        assert_eq!(parse_priority(Some("nonsense")), Priority::Medium);
        assert_eq!(
            parse_assignment_priority(Some("High")),
            AssignmentPriority::High
        );
        assert_eq!(parse_assignment_priority(None), AssignmentPriority::Medium);
    }

    #[test]
    fn test_status_defaults_to_not_started() {
        assert_eq!(
            parse_assignment_status(Some("Completed")),
            AssignmentStatus::Completed
        );
        assert_eq!(
            parse_assignment_status(Some("In Progress")),
            AssignmentStatus::InProgress
        );
        assert_eq!(parse_assignment_status(None), AssignmentStatus::NotStarted);
        assert_eq!(
            parse_assignment_status(Some("half done")),
            AssignmentStatus::NotStarted
        );
    }

    #[test]
    fn test_unknown_weekday_falls_back_to_reference_day() {
        let doc = ClassDoc {
            id: "c1".to_string(),
            name: Some("Physics".to_string()),
            day: Some("Moonday".to_string()),
            ..ClassDoc::default()
        };
        let classes = normalize_classes(&[doc], now());
        // 2024-05-15 is a Wednesday.
        assert_eq!(classes[0].day, Weekday::Wednesday);
    }

    #[test]
    fn test_order_preserved_no_dedup() {
        let docs = vec![
            TaskDoc {
                id: "t2".to_string(),
                ..TaskDoc::default()
            },
            TaskDoc {
                id: "t1".to_string(),
                ..TaskDoc::default()
            },
            TaskDoc {
                id: "t2".to_string(),
                ..TaskDoc::default()
            },
        ];
        let ids: Vec<String> = normalize_tasks(&docs, now())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["t2", "t1", "t2"]);
    }
}
