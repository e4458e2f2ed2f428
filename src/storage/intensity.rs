//! Named intensity levels (1–10).

use rusqlite::types::Value;
use serde::Serialize;

use super::database::{Executor, Row};
use super::query::{Field, build_delete, build_insert, build_update};
use super::record::{Record, column, fetch, optional_text, text};
use crate::types::{Result, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntensityLevel {
    pub id: RowId,
    pub level: i64,
    pub description: Option<String>,
}

impl Record for IntensityLevel {
    const COLUMNS: &'static [&'static str] = &["_id", "level", "description"];

    fn from_row(table: &str, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(table, row, 0, "_id")?,
            level: column(table, row, 1, "level")?,
            description: column(table, row, 2, "description")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIntensityLevel {
    pub level: i64,
    pub description: Option<String>,
}

impl NewIntensityLevel {
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![("level", Value::Integer(self.level))];
        if let Some(description) = &self.description {
            fields.push(("description", text(description)));
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntensityLevelChanges {
    pub level: Option<i64>,
    pub description: Option<Option<String>>,
}

impl IntensityLevelChanges {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(level) = self.level {
            fields.push(("level", Value::Integer(level)));
        }
        if let Some(description) = &self.description {
            fields.push(("description", optional_text(description.as_deref())));
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntensityLevelFilter {
    pub id: Option<RowId>,
    pub level: Option<i64>,
    pub description: Option<String>,
}

impl IntensityLevelFilter {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(id) = self.id {
            fields.push(("_id", Value::Integer(id)));
        }
        if let Some(level) = self.level {
            fields.push(("level", Value::Integer(level)));
        }
        if let Some(description) = &self.description {
            fields.push(("description", text(description)));
        }
        fields
    }
}

pub fn insert<E: Executor + ?Sized>(db: &E, level: &NewIntensityLevel) -> Result<()> {
    db.execute(&build_insert(&db.tables().intensity, level.fields()))?;
    Ok(())
}

pub fn get<E: Executor + ?Sized>(
    db: &E,
    filter: &IntensityLevelFilter,
) -> Result<Vec<IntensityLevel>> {
    fetch(db, &db.tables().intensity, filter.fields())
}

pub fn update<E: Executor + ?Sized>(
    db: &E,
    id: RowId,
    changes: &IntensityLevelChanges,
) -> Result<usize> {
    let statement = build_update(&db.tables().intensity, id, changes.fields())?;
    Ok(db.execute(&statement)?.affected())
}

pub fn delete<E: Executor + ?Sized>(db: &E, id: RowId) -> Result<usize> {
    Ok(db.execute(&build_delete(&db.tables().intensity, id))?.affected())
}
