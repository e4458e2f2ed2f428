//! Parameterized statement construction.
//!
//! Every builder takes a table name and an ordered field list and produces a
//! [`Statement`] whose variant says how the store must run it. Values are only
//! ever bound through `?` placeholders; table and column names come from
//! validated configuration and compile-time constants.

use rusqlite::types::Value;

use crate::constants::store::ID_COLUMN;
use crate::types::{GymError, Result, RowId};

/// One `(column, value)` pair. List order is column order.
pub type Field = (&'static str, Value);

/// A statement ready to run, tagged with how its result is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert { sql: String, args: Vec<Value> },
    Select { sql: String, args: Vec<Value> },
    Update { sql: String, args: Vec<Value> },
    Delete { sql: String, args: Vec<Value> },
    /// Pragmas and DDL: executed without fetching
    Raw { sql: String },
}

impl Statement {
    pub fn sql(&self) -> &str {
        match self {
            Self::Insert { sql, .. }
            | Self::Select { sql, .. }
            | Self::Update { sql, .. }
            | Self::Delete { sql, .. }
            | Self::Raw { sql } => sql,
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            Self::Insert { args, .. }
            | Self::Select { args, .. }
            | Self::Update { args, .. }
            | Self::Delete { args, .. } => args,
            Self::Raw { .. } => &[],
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Select { .. } => "select",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Raw { .. } => "raw",
        }
    }
}

/// `INSERT INTO table (k1, k2) VALUES (?, ?)`, or `INSERT INTO table DEFAULT
/// VALUES` when `fields` is empty.
pub fn build_insert(table: &str, fields: Vec<Field>) -> Statement {
    if fields.is_empty() {
        return Statement::Insert {
            sql: format!("INSERT INTO {} DEFAULT VALUES", table),
            args: Vec::new(),
        };
    }

    let (columns, args): (Vec<&str>, Vec<Value>) = fields.into_iter().unzip();
    let placeholders = vec!["?"; columns.len()].join(", ");

    Statement::Insert {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        ),
        args,
    }
}

/// `SELECT * FROM table WHERE k1=? AND k2=?`; no filters selects every row.
pub fn build_select(table: &str, filters: Vec<Field>) -> Statement {
    let mut sql = format!("SELECT * FROM {}", table);
    if filters.is_empty() {
        return Statement::Select {
            sql,
            args: Vec::new(),
        };
    }

    let (columns, args): (Vec<&str>, Vec<Value>) = filters.into_iter().unzip();
    let conditions: Vec<String> = columns.iter().map(|c| format!("{}=?", c)).collect();
    sql.push_str(" WHERE ");
    sql.push_str(&conditions.join(" AND "));

    Statement::Select { sql, args }
}

/// `UPDATE table SET k1=?, k2=? WHERE _id=?` with `id` bound last.
///
/// An empty field list is a caller bug and is rejected instead of producing
/// invalid SQL.
pub fn build_update(table: &str, id: RowId, fields: Vec<Field>) -> Result<Statement> {
    if fields.is_empty() {
        return Err(GymError::EmptyUpdate {
            table: table.to_string(),
        });
    }

    let (columns, mut args): (Vec<&str>, Vec<Value>) = fields.into_iter().unzip();
    let assignments: Vec<String> = columns.iter().map(|c| format!("{}=?", c)).collect();
    args.push(Value::Integer(id));

    Ok(Statement::Update {
        sql: format!(
            "UPDATE {} SET {} WHERE {}=?",
            table,
            assignments.join(", "),
            ID_COLUMN
        ),
        args,
    })
}

/// `DELETE FROM table WHERE _id=?`
pub fn build_delete(table: &str, id: RowId) -> Statement {
    Statement::Delete {
        sql: format!("DELETE FROM {} WHERE {}=?", table, ID_COLUMN),
        args: vec![Value::Integer(id)],
    }
}
