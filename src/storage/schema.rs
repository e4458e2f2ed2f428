//! Table definitions.
//!
//! Table names are configurable, so the DDL is rendered per store rather than
//! kept in a static `.sql` file. Column names and their order are part of the
//! persisted contract.

use crate::config::TableNames;
use crate::constants::limits::{
    DETAIL_INTENSITY_MAX, DETAIL_INTENSITY_MIN, LEVEL_MAX, LEVEL_MIN,
};

/// Issued on every new connection before anything else; SQLite ships with
/// foreign-key checks disabled.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Render the idempotent `CREATE TABLE IF NOT EXISTS` batch for all four tables.
pub fn render(tables: &TableNames) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {exercise} (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (name != ''),
    acronym TEXT NOT NULL UNIQUE CHECK (acronym != ''),
    description TEXT
);

CREATE TABLE IF NOT EXISTS {session} (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS {intensity} (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    level INTEGER NOT NULL UNIQUE CHECK (level >= {level_min} AND level <= {level_max}),
    description TEXT
);

CREATE TABLE IF NOT EXISTS {session_details} (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL REFERENCES {session} (_id) ON DELETE CASCADE,
    exercise_id INTEGER REFERENCES {exercise} (_id),
    weight_kg REAL NOT NULL DEFAULT 0 CHECK (weight_kg >= 0),
    reps_total INTEGER NOT NULL CHECK (reps_total > 0),
    sets INTEGER NOT NULL CHECK (sets > 0),
    intensity INTEGER NOT NULL CHECK (intensity >= {detail_min} AND intensity <= {detail_max})
);
"#,
        exercise = tables.exercise,
        session = tables.session,
        intensity = tables.intensity,
        session_details = tables.session_details,
        level_min = LEVEL_MIN,
        level_max = LEVEL_MAX,
        detail_min = DETAIL_INTENSITY_MIN,
        detail_max = DETAIL_INTENSITY_MAX,
    )
}
