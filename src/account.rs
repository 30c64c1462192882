//! Account management for multi-account support.
//!
//! Each account owns one store file under the data directory, named
//! `<account_name>_campus.json`. The aggregator itself never sees the
//! account id; it only scopes which store file gets opened.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::store::Store;

/// File-name suffix that marks a store file as an account store.
const STORE_SUFFIX: &str = "_campus.json";

/// An account with its name and store file path.
#[derive(Debug, Clone)]
pub struct Account {
    pub name: String,
    pub display_name: String,
    pub file_path: PathBuf,
}

impl Account {
    /// Create a new account handle with the given display name.
    pub fn new(display_name: &str, data_dir: &Path) -> Self {
        let name = sanitize_account_name(display_name);
        Account {
            file_path: data_dir.join(format!("{name}{STORE_SUFFIX}")),
            display_name: display_name.to_string(),
            name,
        }
    }

    /// Recover an account handle from an existing store file. Returns
    /// `None` for files that don't carry the account-store suffix.
    pub fn from_file(file_path: PathBuf) -> Option<Self> {
        let name = file_path
            .file_name()?
            .to_str()?
            .strip_suffix(STORE_SUFFIX)?
            .to_string();
        if name.is_empty() {
            return None;
        }
        Some(Account {
            display_name: name.replace('_', " "),
            name,
            file_path,
        })
    }

    /// Create the store file for this account if it doesn't exist.
    pub fn create_if_not_exists(&self) -> std::io::Result<()> {
        if self.file_path.exists() {
            return Ok(());
        }
        Store::default().save(&self.file_path)
    }
}

/// Convert a display name to a safe account name for file naming.
/// Converts to lowercase and replaces spaces with underscores.
pub fn sanitize_account_name(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Discover all existing accounts in the data directory, sorted by
/// display name.
pub fn discover_accounts(data_dir: &Path) -> std::io::Result<Vec<Account>> {
    if !data_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut accounts: Vec<Account> = fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(Account::from_file)
        .collect();
    accounts.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(accounts)
}

/// Create a new account with the given name.
pub fn create_account(display_name: &str, data_dir: &Path) -> Result<Account, String> {
    if display_name.trim().is_empty() {
        return Err("Account name cannot be empty".to_string());
    }

    let account = Account::new(display_name, data_dir);

    if account.file_path.exists() {
        return Err(format!("Account '{}' already exists", display_name));
    }

    account
        .create_if_not_exists()
        .map_err(|e| format!("Failed to create account store: {e}"))?;

    Ok(account)
}

/// Find the account whose store file was modified last. Accounts whose
/// file metadata can't be read are skipped.
pub fn get_most_recent_account(data_dir: &Path) -> std::io::Result<Option<Account>> {
    let newest = discover_accounts(data_dir)?
        .into_iter()
        .filter_map(|account| {
            let modified = fs::metadata(&account.file_path).ok()?.modified().ok()?;
            Some((modified, account))
        })
        .max_by_key(|(modified, _): &(SystemTime, Account)| *modified)
        .map(|(_, account)| account);
    Ok(newest)
}
