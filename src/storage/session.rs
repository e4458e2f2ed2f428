//! Workout sessions.
//!
//! A session is a timestamp; its exercises live in `session_details` and are
//! removed with it (`ON DELETE CASCADE`).

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use serde::Serialize;

use super::database::{Database, Executor, Row};
use super::query::{Field, build_delete, build_insert, build_update};
use super::record::{Record, column, datetime, fetch};
use super::session_detail::{self, NewSessionDetail};
use crate::types::{Result, RowId, ValidationError, ValidationErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: RowId,
    pub timestamp: NaiveDateTime,
}

impl Record for Session {
    const COLUMNS: &'static [&'static str] = &["_id", "timestamp"];

    fn from_row(table: &str, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(table, row, 0, "_id")?,
            timestamp: column(table, row, 1, "timestamp")?,
        })
    }
}

/// Without a timestamp the store stamps the row with the current UTC time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSession {
    pub timestamp: Option<NaiveDateTime>,
}

impl NewSession {
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    fn fields(&self) -> Vec<Field> {
        self.timestamp
            .iter()
            .map(|ts| ("timestamp", datetime(ts)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChanges {
    pub timestamp: Option<NaiveDateTime>,
}

impl SessionChanges {
    fn fields(&self) -> Vec<Field> {
        self.timestamp
            .iter()
            .map(|ts| ("timestamp", datetime(ts)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub id: Option<RowId>,
    pub timestamp: Option<NaiveDateTime>,
}

impl SessionFilter {
    pub fn by_id(id: RowId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(id) = self.id {
            fields.push(("_id", Value::Integer(id)));
        }
        if let Some(ts) = &self.timestamp {
            fields.push(("timestamp", datetime(ts)));
        }
        fields
    }
}

/// One exercise line of a session being recorded; the session id is filled
/// in by [`record`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub exercise_id: Option<RowId>,
    /// `None` falls back to the column default of 0 kg
    pub weight_kg: Option<f64>,
    pub reps_total: i64,
    pub sets: i64,
    pub intensity: i64,
}

pub fn insert<E: Executor + ?Sized>(db: &E, session: &NewSession) -> Result<()> {
    db.execute(&build_insert(&db.tables().session, session.fields()))?;
    Ok(())
}

pub fn get<E: Executor + ?Sized>(db: &E, filter: &SessionFilter) -> Result<Vec<Session>> {
    fetch(db, &db.tables().session, filter.fields())
}

pub fn update<E: Executor + ?Sized>(db: &E, id: RowId, changes: &SessionChanges) -> Result<usize> {
    let statement = build_update(&db.tables().session, id, changes.fields())?;
    Ok(db.execute(&statement)?.affected())
}

/// Deletes the session and, through the cascade, all of its details.
pub fn delete<E: Executor + ?Sized>(db: &E, id: RowId) -> Result<usize> {
    Ok(db.execute(&build_delete(&db.tables().session, id))?.affected())
}

/// Insert a session and all of its entries as one unit of work.
///
/// Returns the new session id. If any entry is rejected nothing is stored.
pub fn record(db: &mut Database, session: &NewSession, entries: &[SessionEntry]) -> Result<RowId> {
    if entries.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingField,
            "a session needs at least one entry",
        )
        .with_field("entries")
        .into());
    }

    let session_id = db.transaction(|tx| {
        insert(tx, session)?;
        let session_id = tx.last_inserted_id()?;
        for entry in entries {
            session_detail::insert(tx, &NewSessionDetail::for_session(session_id, entry))?;
        }
        Ok(session_id)
    })?;

    tracing::info!(
        "Recorded session {} with {} entries",
        session_id,
        entries.len()
    );
    Ok(session_id)
}
