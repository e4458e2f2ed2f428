//! gymlog - Persistence layer for a workout tracker
//!
//! Stores exercises, workout sessions, the exercise lines of each session and
//! named intensity levels in a single SQLite file.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gymlog::{Config, Database};
//! use gymlog::storage::exercise::{self, NewExercise, ExerciseFilter};
//!
//! let mut db = Database::from_config(&Config::default());
//! db.open()?;
//! exercise::insert(&db, &NewExercise::new("Squat", "SQ"))?;
//! let all = exercise::get(&db, &ExerciseFilter::default())?;
//! ```
//!
//! ## Modules
//!
//! - [`storage`]: query builder, store handle and per-table repositories
//! - [`config`]: store path and table names
//! - [`cli`]: command handlers for the `gymlog` binary

pub mod cli;
pub mod config;
pub mod constants;
pub mod storage;
pub mod types;

// Configuration
pub use config::{Config, ConfigLoader, StoreConfig, TableNames};

// Error Types
pub use types::error::{GymError, Result, ResultExt, ValidationError, ValidationErrorKind};
pub use types::RowId;

// Storage
pub use storage::{Database, Executor, Outcome, Statement, UnitOfWork};
