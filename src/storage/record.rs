//! Typed rows.
//!
//! Selects return untyped [`Row`]s; each entity implements [`Record`] to
//! decode them in table column order.

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, Value, ValueRef};

use super::database::{Executor, Row};
use super::query::{Field, build_select};
use crate::types::{GymError, Result};

/// Text format used to bind timestamps. Matches what `CURRENT_TIMESTAMP`
/// writes; fractional seconds are only emitted when non-zero.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub trait Record: Sized {
    /// Column names in table order, `_id` first
    const COLUMNS: &'static [&'static str];

    fn from_row(table: &str, row: &Row) -> Result<Self>;
}

/// Select every row of `table` matching all `filters` and decode it.
pub fn fetch<R, E>(db: &E, table: &str, filters: Vec<Field>) -> Result<Vec<R>>
where
    R: Record,
    E: Executor + ?Sized,
{
    db.execute(&build_select(table, filters))?
        .into_rows()
        .iter()
        .map(|row| {
            if row.len() != R::COLUMNS.len() {
                return Err(GymError::decode(
                    table,
                    format!(
                        "expected {} columns, got {}",
                        R::COLUMNS.len(),
                        row.len()
                    ),
                ));
            }
            R::from_row(table, row)
        })
        .collect()
}

/// Decode column `index` of `row`; `name` only labels errors.
pub fn column<T: FromSql>(table: &str, row: &Row, index: usize, name: &str) -> Result<T> {
    let value = row
        .get(index)
        .ok_or_else(|| GymError::decode(table, format!("missing column '{}'", name)))?;
    T::column_result(ValueRef::from(value))
        .map_err(|e| GymError::decode(table, format!("column '{}': {}", name, e)))
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn optional_text(value: Option<&str>) -> Value {
    value.map(text).unwrap_or(Value::Null)
}

pub fn datetime(value: &NaiveDateTime) -> Value {
    Value::Text(value.format(DB_DATETIME_FORMAT).to_string())
}
