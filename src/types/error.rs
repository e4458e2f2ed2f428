//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Error Families
//!
//! - **Storage**: SQLite failures, including constraint violations (NOT NULL,
//!   CHECK, UNIQUE, FK), propagated unchanged from the engine
//! - **Contract**: caller mistakes such as using a closed store or issuing an
//!   update with no fields
//! - **Decode**: a row that does not have the shape of the expected record
//! - **Input**: invalid user input and configuration
//!
//! The storage layer never recovers locally. Every engine error reaches the
//! caller as [`GymError::Database`].

use rusqlite::ErrorCode;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field or component that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
    /// Expected value or format
    pub expected: Option<String>,
    /// Actual value received
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)?;
        } else {
            write!(f, "Validation failed: {}", self.message)?;
        }
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected {}, got '{}')", expected, actual)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add expected/actual values
    pub fn with_comparison(
        mut self,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing
    MissingField,
    /// Invalid format
    Format,
    /// Value out of range
    Range,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum GymError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine error, constraint violations included
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Caller-Contract Errors
    // -------------------------------------------------------------------------
    #[error("Store is not open: call open() first")]
    NotOpen,

    #[error("Update on '{table}' requires at least one field")]
    EmptyUpdate { table: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Cannot decode row from '{table}': {message}")]
    Decode { table: String, message: String },

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ValidationError> for GymError {
    fn from(err: ValidationError) -> Self {
        GymError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, GymError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl GymError {
    pub fn decode(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            table: table.into(),
            message: message.into(),
        }
    }

    /// True when SQLite rejected the statement because of a NOT NULL, CHECK,
    /// UNIQUE or foreign-key rule.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }

    /// Caller mistakes that indicate a bug rather than bad data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NotOpen | Self::EmptyUpdate { .. })
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| GymError::Storage(format!("{}: {}", context.into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: ErrorCode, extended: i32) -> GymError {
        GymError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code,
                extended_code: extended,
            },
            Some("constraint failed".to_string()),
        ))
    }

    #[test]
    fn test_constraint_violation_detection() {
        // SQLITE_CONSTRAINT_UNIQUE
        let err = sqlite_failure(ErrorCode::ConstraintViolation, 2067);
        assert!(err.is_constraint_violation());
        assert!(!err.is_contract_violation());

        let busy = sqlite_failure(ErrorCode::DatabaseBusy, 5);
        assert!(!busy.is_constraint_violation());
    }

    #[test]
    fn test_contract_violations() {
        assert!(GymError::NotOpen.is_contract_violation());
        let empty = GymError::EmptyUpdate {
            table: "exercise".to_string(),
        };
        assert!(empty.is_contract_violation());
        assert_eq!(
            empty.to_string(),
            "Update on 'exercise' requires at least one field"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ValidationErrorKind::Format, "bad weight")
            .with_field("weight_kg")
            .with_comparison("a number", "heavy");
        assert_eq!(
            err.to_string(),
            "Validation failed for 'weight_kg': bad weight (expected a number, got 'heavy')"
        );

        let plain = ValidationError::new(ValidationErrorKind::MissingField, "nothing to record");
        assert_eq!(plain.to_string(), "Validation failed: nothing to record");
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk gone"));
        let err = res.with_context("Failed to create store directory").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage error: Failed to create store directory: disk gone"
        );
    }
}
