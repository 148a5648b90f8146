// ⚙️ Configuration - runtime settings from environment variables
//
// TUITION_BOOK_DB       SQLite file (default: tuition_book.db)
// TUITION_BOOK_LOG      log file used while the terminal UI runs (default: tuition_book.log)
// TUITION_BOOK_VERBOSE  debug logging (default: false)
// TUITION_BOOK_SEED     seed sample students into an empty book (default: true)

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "tuition_book.db";
pub const DEFAULT_LOG_PATH: &str = "tuition_book.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub verbose: bool,
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            verbose: false,
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let db_path = lookup("TUITION_BOOK_DB")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let log_path = lookup("TUITION_BOOK_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        let verbose = match lookup("TUITION_BOOK_VERBOSE") {
            Some(value) => parse_flag("TUITION_BOOK_VERBOSE", &value)?,
            None => defaults.verbose,
        };

        let seed_sample_data = match lookup("TUITION_BOOK_SEED") {
            Some(value) => parse_flag("TUITION_BOOK_SEED", &value)?,
            None => defaults.seed_sample_data,
        };

        Ok(AppConfig {
            db_path,
            log_path,
            verbose,
            seed_sample_data,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got '{}'", key, other),
    }
}
