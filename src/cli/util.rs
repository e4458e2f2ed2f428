//! CLI Common Utilities
//!
//! Shared initialization for command handlers: loading the configuration and
//! opening the store it points at.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{Config, ConfigLoader};
use crate::constants::display::{DATE_FORMAT, DATETIME_FORMAT};
use crate::storage::Database;
use crate::types::{Result, ValidationError, ValidationErrorKind};

/// Command execution context
///
/// Created via `CommandContext::load()` by every command that touches the
/// store. The store is open for as long as the context lives.
#[derive(Debug)]
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Open store handle
    pub db: Database,
}

impl CommandContext {
    /// Load the configuration and open the store, creating the file and its
    /// tables on first use.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = ConfigLoader::load_with(config_file)?;
        let mut db = Database::from_config(&config);
        db.open()?;
        Ok(Self { config, db })
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(input, DATETIME_FORMAT) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::Format, "invalid date")
                .with_field("date")
                .with_comparison("YYYY-MM-DD[ HH:MM:SS]", input)
                .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GymError;

    #[test]
    fn test_parse_timestamp() {
        let full = parse_timestamp("2024-03-01 18:30:00").unwrap();
        assert_eq!(full.to_string(), "2024-03-01 18:30:00");

        let day = parse_timestamp(" 2024-03-01 ").unwrap();
        assert_eq!(day.to_string(), "2024-03-01 00:00:00");

        let err = parse_timestamp("01/03/2024").unwrap_err();
        assert!(matches!(err, GymError::Validation(_)));
    }

    #[test]
    fn test_context_opens_configured_store() {
        figment::Jail::expect_with(|jail| {
            let store = jail.directory().join("nested").join("gym.db");
            jail.create_file(
                "config.toml",
                &format!("[store]\npath = \"{}\"\n", store.display()),
            )?;
            let config_file = jail.directory().join("config.toml");

            let ctx = CommandContext::load(Some(&config_file)).unwrap();
            assert!(ctx.db.is_open());
            assert!(store.exists());
            Ok(())
        });
    }
}
