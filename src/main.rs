//! # CampusBuddy - Student Schedule CLI
//!
//! A command-line task and class-schedule manager for students, keeping
//! tasks, weekly classes and assignments in per-account JSON stores.
//!
//! ## Key Features
//!
//! - **Three record kinds**: tasks with deadlines and priorities, weekly
//!   recurring classes, and assignments with their own status lifecycle
//! - **List filters**: all | today | upcoming | completed | uncompleted |
//!   classes | assignments, or an explicit calendar date
//! - **Calendar markers**: per-day dots coloured by task priority, with
//!   class occurrences and a selected-day highlight
//! - **Day planner**: classes and tasks for one date merged into a single
//!   schedule
//! - **Multi-Account Support**: per-account (local .json) store files
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task due tomorrow evening
//! cb add "Revise algebra notes" --due tomorrow --time 18:00 --priority high
//!
//! # Add a weekly class
//! cb add-class "Linear Algebra" --day monday --start 09:00 --end 10:30 \
//!     --location "B2.14" --instructor "Dr Low"
//!
//! # What's on today?
//! cb list --filter today
//!
//! # The month view's dot markers
//! cb calendar --selected 2024-05-20
//! ```
//!
//! Data is stored locally in `~/.campusbuddy/` with each account as a
//! separate JSON file.

use std::path::{Path, PathBuf};

use clap::Parser;

pub mod account;
pub mod calendar;
pub mod cli;
pub mod cmd;
pub mod fields;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod store;

use account::{get_most_recent_account, Account};
use cli::Cli;
use cmd::*;
use store::Store;

fn main() {
    let cli = Cli::parse();

    // Determine the data directory.
    let data_dir = if let Some(db_path) = cli.db.as_ref() {
        db_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf()
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(home).join(".campusbuddy");
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
        data_dir
    };

    // Completions and accounts never open a store; everything else does.
    match cli.command {
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Accounts => cmd_accounts(&data_dir),
        command => {
            let store_path = resolve_store_path(cli.db, cli.account.as_deref(), &data_dir);
            let mut store = Store::load(&store_path);
            run_store_command(&mut store, &store_path, command);
        }
    }
}

/// Resolve the store file: explicit --db wins, then --account, then the
/// most recently used account, then a fresh default account.
fn resolve_store_path(db: Option<PathBuf>, account: Option<&str>, data_dir: &Path) -> PathBuf {
    if let Some(db_path) = db {
        return db_path;
    }
    if let Some(name) = account {
        let account = Account::new(name, data_dir);
        if let Err(e) = account.create_if_not_exists() {
            eprintln!("Failed to open account '{name}': {e}");
            std::process::exit(1);
        }
        return account.file_path;
    }
    match get_most_recent_account(data_dir) {
        Ok(Some(account)) => account.file_path,
        _ => {
            let default_account = Account::new("Default", data_dir);
            if let Err(e) = default_account.create_if_not_exists() {
                eprintln!("Failed to create default account: {e}");
                std::process::exit(1);
            }
            default_account.file_path
        }
    }
}

fn run_store_command(store: &mut Store, store_path: &Path, command: Commands) {
    match command {
        // Dispatched in main before the store was opened.
        Commands::Completions { .. } | Commands::Accounts => {}

        Commands::Add {
            title,
            desc,
            due,
            time,
            priority,
        } => cmd_add(store, store_path, title, desc, due, time, priority),

        Commands::AddClass {
            name,
            day,
            start,
            end,
            location,
            instructor,
        } => cmd_add_class(
            store,
            store_path,
            name,
            day,
            start,
            end,
            location,
            instructor,
        ),

        Commands::AddAssignment {
            title,
            course,
            desc,
            due,
            priority,
            status,
        } => cmd_add_assignment(
            store,
            store_path,
            title,
            course,
            desc,
            due,
            priority,
            status,
        ),

        Commands::List { filter, date } => cmd_list(store, filter, date),

        Commands::Day { date } => cmd_day(store, date),

        Commands::Calendar {
            selected,
            tasks_only,
        } => cmd_calendar(store, selected, tasks_only),

        Commands::Summary => cmd_summary(store),

        Commands::Complete { id } => cmd_set_completed(store, store_path, id, true),

        Commands::Reopen { id } => cmd_set_completed(store, store_path, id, false),

        Commands::Status { id } => cmd_toggle_status(store, store_path, id),

        Commands::Delete { kind, id } => cmd_delete(store, store_path, kind, id),
    }
}
