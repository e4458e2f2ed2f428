//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use crate::constants::{sql, store, tables};
use crate::types::{GymError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Store file settings
    pub store: StoreConfig,

    /// Table name overrides
    pub tables: TableNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            store: StoreConfig::default(),
            tables: TableNames::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `GymError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(GymError::Config("store.path must not be empty".to_string()));
        }

        self.tables.validate()
    }
}

/// Table names are interpolated into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*`
/// is accepted.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_keyword(name: &str) -> bool {
    sql::KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(name))
}

// =============================================================================
// Store Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Location of the SQLite file; its directory is created on first open
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// `$XDG_DATA_HOME/gymlog/gym.db`, then `~/.local/share/gymlog/gym.db`,
/// then `./database/gym.db`.
pub fn default_store_path() -> PathBuf {
    env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .map(|root| root.join(store::APP_DIR))
        .unwrap_or_else(|| PathBuf::from(store::FALLBACK_DIR))
        .join(store::DB_FILE_NAME)
}

// =============================================================================
// Table Names
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub exercise: String,
    pub session: String,
    pub session_details: String,
    pub intensity: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            exercise: tables::EXERCISE.to_string(),
            session: tables::SESSION.to_string(),
            session_details: tables::SESSION_DETAILS.to_string(),
            intensity: tables::INTENSITY.to_string(),
        }
    }
}

impl TableNames {
    /// (config key, table name) pairs in schema creation order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("exercise", &self.exercise),
            ("session", &self.session),
            ("intensity", &self.intensity),
            ("session_details", &self.session_details),
        ]
    }

    /// Every name must be a plain identifier, not a keyword, and distinct
    /// from the others ignoring case.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (key, name) in self.entries() {
            if !is_identifier(name) {
                return Err(GymError::Config(format!(
                    "tables.{} must be a plain SQL identifier, got '{}'",
                    key, name
                )));
            }
            if is_keyword(name) {
                return Err(GymError::Config(format!(
                    "tables.{} must not be an SQL keyword, got '{}'",
                    key, name
                )));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(GymError::Config(format!(
                    "tables.{} reuses table name '{}'",
                    key, name
                )));
            }
        }
        Ok(())
    }
}
