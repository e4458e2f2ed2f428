pub mod database;
pub mod exercise;
pub mod intensity;
pub mod query;
pub mod record;
pub mod schema;
pub mod session;
pub mod session_detail;

pub use database::{Database, Executor, Outcome, Row, UnitOfWork};
pub use query::{Field, Statement};

use crate::types::{Result, RowId};

/// Ordered column names of the session table, for labelling a results grid.
pub fn get_session_headers<E: Executor + ?Sized>(db: &E) -> Result<Vec<String>> {
    db.column_names(&db.tables().session)
}

/// Row id most recently assigned on the store's connection.
pub fn get_last_rowid<E: Executor + ?Sized>(db: &E) -> Result<RowId> {
    db.last_inserted_id()
}
