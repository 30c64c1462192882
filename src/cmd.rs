//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers behind each subcommand: the
//! create/toggle/delete point mutations, and the read commands that load
//! the store, normalize it, run the filter engine or calendar builder, and
//! print the result. Every read command captures "now" exactly once and
//! threads it through, so a single render always sees one consistent
//! reference moment.

use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::account::discover_accounts;
use crate::calendar::{marked_dates, task_marked_dates, DayMarker};
use crate::fields::*;
use crate::filter::{day_planner, filter_records, home_summary, PlannerItem, Selection};
use crate::normalize::{normalize_assignments, normalize_classes, normalize_tasks};
use crate::record::{Assignment, ClassEntry, Task};
use crate::store::Store;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", a weekday name, or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Due time of day, HH:MM. Defaults to the current time.
        #[arg(long)]
        time: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Add a weekly recurring class.
    AddClass {
        /// Class name.
        name: String,
        /// Weekday the class recurs on.
        #[arg(long, value_enum)]
        day: Weekday,
        /// Start time, free-form (e.g. "09:00").
        #[arg(long)]
        start: String,
        /// End time, free-form.
        #[arg(long)]
        end: String,
        /// Room or building.
        #[arg(long)]
        location: String,
        /// Instructor name.
        #[arg(long)]
        instructor: String,
    },

    /// Add an assignment.
    AddAssignment {
        /// Assignment title.
        title: String,
        /// Course the assignment belongs to.
        #[arg(long)]
        course: String,
        /// Optional description.
        #[arg(long)]
        desc: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", a weekday name, or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = AssignmentPriority::Medium)]
        priority: AssignmentPriority,
        /// Status: not-started | in-progress | completed.
        #[arg(long, value_enum, default_value_t = AssignmentStatus::NotStarted)]
        status: AssignmentStatus,
    },

    /// List tasks, classes and assignments through a filter.
    List {
        /// Filter mode: all | today | upcoming | completed | uncompleted | classes | assignments.
        #[arg(long, value_enum, conflicts_with = "date")]
        filter: Option<FilterMode>,
        /// Show only items for this calendar date (YYYY-MM-DD) instead of a mode.
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the merged day planner (classes and tasks for one date).
    Day {
        /// Date to plan for (YYYY-MM-DD). Without it, all tasks are listed.
        date: Option<String>,
    },

    /// Show the calendar dot-markers.
    Calendar {
        /// Highlight this date (YYYY-MM-DD).
        #[arg(long)]
        selected: Option<String>,
        /// Tasks-only view: dots coloured by completion instead of priority.
        #[arg(long)]
        tasks_only: bool,
    },

    /// Show the home screen quick stats.
    Summary,

    /// Mark a task completed.
    Complete {
        /// Task ID.
        id: String,
    },

    /// Reopen a completed task.
    Reopen {
        /// Task ID.
        id: String,
    },

    /// Toggle an assignment between Completed and Not Started.
    Status {
        /// Assignment ID.
        id: String,
    },

    /// Delete a record by kind and ID.
    Delete {
        /// Record kind: task | class | assignment.
        #[arg(value_enum)]
        kind: RecordKind,
        /// Record ID.
        id: String,
    },

    /// List known accounts.
    Accounts,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Add a new task to the store.
pub fn cmd_add(
    store: &mut Store,
    store_path: &Path,
    title: String,
    desc: Option<String>,
    due: Option<String>,
    time: Option<String>,
    priority: Priority,
) {
    let now = Local::now().naive_local();
    let due_date = resolve_due_input(due.as_deref(), now.date());
    let due_time = match time.as_deref() {
        Some(raw) => match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(t) => t,
            Err(_) => {
                eprintln!("Invalid time '{raw}', expected HH:MM");
                std::process::exit(1);
            }
        },
        None => now.time(),
    };

    match store.create_task(
        &title,
        desc.as_deref().unwrap_or(""),
        due_date,
        due_time,
        priority,
        now,
    ) {
        Ok(id) => {
            save_or_die(store, store_path);
            println!("Created task {id}: {}", title.trim());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Add a recurring class to the store.
pub fn cmd_add_class(
    store: &mut Store,
    store_path: &Path,
    name: String,
    day: Weekday,
    start: String,
    end: String,
    location: String,
    instructor: String,
) {
    match store.create_class(&name, day, &start, &end, &location, &instructor) {
        Ok(id) => {
            save_or_die(store, store_path);
            println!("Created class {id}: {}", name.trim());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Add an assignment to the store.
pub fn cmd_add_assignment(
    store: &mut Store,
    store_path: &Path,
    title: String,
    course: String,
    desc: Option<String>,
    due: Option<String>,
    priority: AssignmentPriority,
    status: AssignmentStatus,
) {
    let now = Local::now().naive_local();
    let due_date = resolve_due_input(due.as_deref(), now.date());
    match store.create_assignment(
        &title,
        &course,
        desc.as_deref().unwrap_or(""),
        due_date,
        priority,
        status,
        now,
    ) {
        Ok(id) => {
            save_or_die(store, store_path);
            println!("Created assignment {id}: {}", title.trim());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// List records through a filter mode or an explicit date.
pub fn cmd_list(store: &Store, filter: Option<FilterMode>, date: Option<String>) {
    let now = Local::now().naive_local();
    let tasks = normalize_tasks(&store.tasks, now);
    let classes = normalize_classes(&store.classes, now);
    let assignments = normalize_assignments(&store.assignments, now);

    // An unrecognized --date string falls soft to the `all` mode rather
    // than failing; clap already constrains --filter to valid modes.
    let selection = date
        .as_deref()
        .map(Selection::parse)
        .or(filter.map(Selection::Mode));

    let data = filter_records(&tasks, &classes, &assignments, selection.as_ref(), now);

    if data.tasks.is_empty() && data.classes.is_empty() && data.assignments.is_empty() {
        println!("No items found");
        return;
    }
    if !data.tasks.is_empty() {
        print_task_table(&data.tasks, now.date());
    }
    if !data.classes.is_empty() {
        if !data.tasks.is_empty() {
            println!();
        }
        print_class_table(&data.classes);
    }
    if !data.assignments.is_empty() {
        if !data.tasks.is_empty() || !data.classes.is_empty() {
            println!();
        }
        print_assignment_table(&data.assignments, now.date());
    }
}

/// Show the merged planner for one date, or every task without one.
pub fn cmd_day(store: &Store, date: Option<String>) {
    let now = Local::now().naive_local();
    let tasks = normalize_tasks(&store.tasks, now);
    let classes = normalize_classes(&store.classes, now);

    let selected = date.as_deref().map(|raw| parse_date_or_die(raw));
    match selected {
        Some(d) => println!("Schedule for {d}"),
        None => println!("All schedule"),
    }

    let items = day_planner(&tasks, &classes, selected);
    if items.is_empty() {
        println!("No items found");
        return;
    }
    for item in items {
        match item {
            PlannerItem::Class(c) => {
                println!(
                    "class {:<5} {} - {}  {} ({}, {})",
                    c.id, c.start_time, c.end_time, c.name, c.location, c.instructor
                );
            }
            PlannerItem::Task(t) => {
                let done = if t.completed { "x" } else { " " };
                println!(
                    "task  {:<5} [{done}] {}  {}",
                    t.id,
                    t.time.format("%H:%M"),
                    t.title
                );
            }
        }
    }
}

/// Print the calendar dot-markers.
pub fn cmd_calendar(store: &Store, selected: Option<String>, tasks_only: bool) {
    let now = Local::now().naive_local();
    let tasks = normalize_tasks(&store.tasks, now);
    let classes = normalize_classes(&store.classes, now);
    let selected = selected.as_deref().map(|raw| parse_date_or_die(raw));

    let marked = if tasks_only {
        task_marked_dates(&tasks)
    } else {
        marked_dates(&tasks, &classes, selected, now.date())
    };

    if marked.is_empty() {
        println!("No marked dates");
        return;
    }
    println!("{:<12} {:<9} {}", "Date", "Dot", "Flags");
    for (date, marker) in &marked {
        println!(
            "{:<12} {:<9} {}",
            date.to_string(),
            marker.dot_color.unwrap_or("-"),
            marker_flags(marker)
        );
    }
}

/// Print the home screen quick stats.
pub fn cmd_summary(store: &Store) {
    let now = Local::now().naive_local();
    let tasks = normalize_tasks(&store.tasks, now);
    let classes = normalize_classes(&store.classes, now);
    let assignments = normalize_assignments(&store.assignments, now);

    let summary = home_summary(&tasks, &classes, &assignments, now);
    println!("Today's tasks:       {}", summary.today_tasks);
    println!("Upcoming:            {}", summary.upcoming_tasks);
    println!("Today's classes:     {}", summary.today_classes);
    println!("Pending assignments: {}", summary.pending_assignments);
    if summary.priority_tasks.is_empty() {
        println!("No priority tasks for today");
    } else {
        println!("Priority tasks:");
        for t in &summary.priority_tasks {
            println!(
                "  {:<5} {:<7} {}  {}",
                t.id,
                priority_label(t.priority),
                t.deadline.format("%H:%M"),
                t.title
            );
        }
    }
}

/// Mark a task completed (or reopen it).
pub fn cmd_set_completed(store: &mut Store, store_path: &Path, id: String, completed: bool) {
    match store.set_task_completed(&id, completed) {
        Ok(()) => {
            save_or_die(store, store_path);
            if completed {
                println!("Completed task {id}");
            } else {
                println!("Reopened task {id}");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Toggle an assignment's status.
pub fn cmd_toggle_status(store: &mut Store, store_path: &Path, id: String) {
    match store.toggle_assignment_status(&id) {
        Ok(status) => {
            save_or_die(store, store_path);
            println!("Assignment {id} is now {}", assignment_status_label(status));
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Delete one record.
pub fn cmd_delete(store: &mut Store, store_path: &Path, kind: RecordKind, id: String) {
    match store.delete(kind, &id) {
        Ok(()) => {
            save_or_die(store, store_path);
            println!("Deleted {id}");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// List known accounts.
pub fn cmd_accounts(data_dir: &Path) {
    match discover_accounts(data_dir) {
        Ok(accounts) if accounts.is_empty() => println!("No accounts yet"),
        Ok(accounts) => {
            for a in accounts {
                println!("{:<20} {}", a.display_name, a.file_path.display());
            }
        }
        Err(e) => {
            eprintln!("Failed to list accounts: {e}");
            std::process::exit(1);
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn save_or_die(store: &Store, store_path: &Path) {
    if let Err(e) = store.save(store_path) {
        eprintln!("Failed to save store {}: {e}", store_path.display());
        std::process::exit(1);
    }
}

fn parse_date_or_die(raw: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            eprintln!("Invalid date '{raw}', expected YYYY-MM-DD");
            std::process::exit(1);
        }
    }
}

fn resolve_due_input(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    match raw {
        None => today,
        Some(raw) => match parse_due_input(raw, today) {
            Some(d) => d,
            None => {
                eprintln!("Invalid due date '{raw}'");
                std::process::exit(1);
            }
        },
    }
}

/// Parse human-readable due date input.
///
/// Supports "today", "tomorrow", weekday names (this week's occurrence),
/// "in Nd" / "in Nw", and the YYYY-MM-DD format.
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    let weekdays = [
        ("sunday", Weekday::Sunday),
        ("monday", Weekday::Monday),
        ("tuesday", Weekday::Tuesday),
        ("wednesday", Weekday::Wednesday),
        ("thursday", Weekday::Thursday),
        ("friday", Weekday::Friday),
        ("saturday", Weekday::Saturday),
    ];
    for (name, day) in weekdays {
        if s == name {
            return Some(crate::calendar::next_occurrence(day, today));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a deadline relative to today ("Today at 09:00", "Tomorrow at ...").
pub fn format_deadline(dt: NaiveDateTime, today: NaiveDate) -> String {
    let time = dt.format("%H:%M");
    if dt.date() == today {
        format!("Today at {time}")
    } else if dt.date() == today + Duration::days(1) {
        format!("Tomorrow at {time}")
    } else {
        format!("{} at {time}", dt.format("%a %d %b"))
    }
}

fn marker_flags(marker: &DayMarker) -> String {
    match (marker.marked, marker.selected) {
        (true, true) => "marked, selected".to_string(),
        (true, false) => "marked".to_string(),
        (false, true) => "selected".to_string(),
        (false, false) => String::new(),
    }
}

/// Print tasks in a formatted table.
pub fn print_task_table(tasks: &[Task], today: NaiveDate) {
    println!(
        "{:<5} {:<8} {:<5} {:<20} {}",
        "ID", "Pri", "Done", "Due", "Title"
    );
    for t in tasks {
        let done = if t.completed { "x" } else { "" };
        println!(
            "{:<5} {:<8} {:<5} {:<20} {}",
            t.id,
            priority_label(t.priority),
            done,
            format_deadline(t.deadline, today),
            truncate(&t.title, 50)
        );
    }
}

/// Print classes in a formatted table.
pub fn print_class_table(classes: &[ClassEntry]) {
    println!(
        "{:<5} {:<10} {:<14} {:<20} {:<14} {}",
        "ID", "Day", "Time", "Name", "Location", "Instructor"
    );
    for c in classes {
        println!(
            "{:<5} {:<10} {:<14} {:<20} {:<14} {}",
            c.id,
            weekday_label(c.day),
            format!("{}-{}", c.start_time, c.end_time),
            truncate(&c.name, 20),
            truncate(&c.location, 14),
            c.instructor
        );
    }
}

/// Print assignments in a formatted table.
pub fn print_assignment_table(assignments: &[Assignment], today: NaiveDate) {
    println!(
        "{:<5} {:<8} {:<12} {:<20} {:<12} {}",
        "ID", "Pri", "Status", "Due", "Course", "Title"
    );
    for a in assignments {
        println!(
            "{:<5} {:<8} {:<12} {:<20} {:<12} {}",
            a.id,
            assignment_priority_label(a.priority),
            assignment_status_label(a.status),
            format_deadline(a.deadline, today),
            truncate(&a.course, 12),
            truncate(&a.title, 40)
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
