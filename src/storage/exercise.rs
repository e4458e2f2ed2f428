//! Exercise catalog.

use rusqlite::types::Value;
use serde::Serialize;

use super::database::{Executor, Row};
use super::query::{Field, build_delete, build_insert, build_update};
use super::record::{Record, column, fetch, optional_text, text};
use crate::types::{Result, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub id: RowId,
    pub name: String,
    pub acronym: String,
    pub description: Option<String>,
}

impl Exercise {
    /// `"name, ACRONYM"`, the form a picker shows and parses back.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.acronym)
    }
}

impl Record for Exercise {
    const COLUMNS: &'static [&'static str] = &["_id", "name", "acronym", "description"];

    fn from_row(table: &str, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(table, row, 0, "_id")?,
            name: column(table, row, 1, "name")?,
            acronym: column(table, row, 2, "acronym")?,
            description: column(table, row, 3, "description")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub name: String,
    pub acronym: String,
    pub description: Option<String>,
}

impl NewExercise {
    pub fn new(name: impl Into<String>, acronym: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            acronym: acronym.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![("name", text(&self.name)), ("acronym", text(&self.acronym))];
        if let Some(description) = &self.description {
            fields.push(("description", text(description)));
        }
        fields
    }
}

/// Partial update: only `Some` fields are written.
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseChanges {
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub description: Option<Option<String>>,
}

impl ExerciseChanges {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", text(name)));
        }
        if let Some(acronym) = &self.acronym {
            fields.push(("acronym", text(acronym)));
        }
        if let Some(description) = &self.description {
            fields.push(("description", optional_text(description.as_deref())));
        }
        fields
    }
}

/// Equality filter; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub id: Option<RowId>,
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub description: Option<String>,
}

impl ExerciseFilter {
    pub fn by_id(id: RowId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_acronym(acronym: impl Into<String>) -> Self {
        Self {
            acronym: Some(acronym.into()),
            ..Self::default()
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(id) = self.id {
            fields.push(("_id", Value::Integer(id)));
        }
        if let Some(name) = &self.name {
            fields.push(("name", text(name)));
        }
        if let Some(acronym) = &self.acronym {
            fields.push(("acronym", text(acronym)));
        }
        if let Some(description) = &self.description {
            fields.push(("description", text(description)));
        }
        fields
    }
}

pub fn insert<E: Executor + ?Sized>(db: &E, exercise: &NewExercise) -> Result<()> {
    db.execute(&build_insert(&db.tables().exercise, exercise.fields()))?;
    tracing::debug!("Inserted exercise {}", exercise.acronym);
    Ok(())
}

pub fn get<E: Executor + ?Sized>(db: &E, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
    fetch(db, &db.tables().exercise, filter.fields())
}

/// Returns the number of rows changed; zero when `id` does not exist.
pub fn update<E: Executor + ?Sized>(db: &E, id: RowId, changes: &ExerciseChanges) -> Result<usize> {
    let statement = build_update(&db.tables().exercise, id, changes.fields())?;
    Ok(db.execute(&statement)?.affected())
}

/// Fails with a constraint violation while session details reference `id`.
pub fn delete<E: Executor + ?Sized>(db: &E, id: RowId) -> Result<usize> {
    Ok(db.execute(&build_delete(&db.tables().exercise, id))?.affected())
}

pub fn find_by_acronym<E: Executor + ?Sized>(db: &E, acronym: &str) -> Result<Option<Exercise>> {
    Ok(get(db, &ExerciseFilter::by_acronym(acronym))?.into_iter().next())
}
