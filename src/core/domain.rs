use std::env;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

// Identifiable yields the primary key every stored entity is filed under
pub trait Identifiable {
    fn id(&self) -> String;
}

pub const DEFAULT_LOAN_DURATION_DAYS: i64 = 14;
pub const DEFAULT_RENEWAL_DAYS: i64 = 7;
pub const MAX_RENEWALS: u32 = 2;
pub const DEFAULT_RESERVATION_DURATION_DAYS: i64 = 7;
pub const DEFAULT_MEMBERSHIP_DURATION_DAYS: i64 = 365;
pub const DEFAULT_MAX_BOOKS: usize = 5;

// DataFiles names the JSON file backing each entity table
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DataFiles {
    pub books: PathBuf,
    pub members: PathBuf,
    pub loans: PathBuf,
    pub reservations: PathBuf,
    pub users: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        DataFiles {
            books: PathBuf::from("biblioteka_books.json"),
            members: PathBuf::from("biblioteka_members.json"),
            loans: PathBuf::from("biblioteka_loans.json"),
            reservations: PathBuf::from("biblioteka_reservations.json"),
            users: PathBuf::from("biblioteka_users.json"),
        }
    }
}

impl DataFiles {
    // all files placed under one directory, keeping the default file names
    pub fn in_dir(dir: &std::path::Path) -> Self {
        let defaults = DataFiles::default();
        DataFiles {
            books: dir.join(defaults.books),
            members: dir.join(defaults.members),
            loans: dir.join(defaults.loans),
            reservations: dir.join(defaults.reservations),
            users: dir.join(defaults.users),
        }
    }
}

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub loan_days: i64,
    pub renewal_days: i64,
    pub max_renewals: u32,
    pub reservation_days: i64,
    pub membership_days: i64,
    pub max_books: usize,
    pub log_level: String,
    pub log_json: bool,
    pub data_files: DataFiles,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            loan_days: DEFAULT_LOAN_DURATION_DAYS,
            renewal_days: DEFAULT_RENEWAL_DAYS,
            max_renewals: MAX_RENEWALS,
            reservation_days: DEFAULT_RESERVATION_DURATION_DAYS,
            membership_days: DEFAULT_MEMBERSHIP_DURATION_DAYS,
            max_books: DEFAULT_MAX_BOOKS,
            log_level: "warn".to_string(),
            log_json: false,
            data_files: DataFiles::default(),
        }
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup; unset
    /// variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);
        config.data_files = DataFiles {
            books: path("BIB_BOOK_DATA_FILE", config.data_files.books.clone()),
            members: path("BIB_MEMBER_DATA_FILE", config.data_files.members.clone()),
            loans: path("BIB_LOAN_DATA_FILE", config.data_files.loans.clone()),
            reservations: path("BIB_RESERVATION_DATA_FILE", config.data_files.reservations.clone()),
            users: path("BIB_USER_DATA_FILE", config.data_files.users.clone()),
        };
        if let Some(level) = lookup("LMS_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(format) = lookup("LMS_LOG_FORMAT") {
            config.log_json = format.eq_ignore_ascii_case("json");
        }
        if let Some(days) = lookup("LMS_RENEWAL_DAYS").and_then(|v| v.parse().ok()) {
            config.renewal_days = days;
        }
        config
    }
}
