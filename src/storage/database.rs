//! Store Handle with Explicit Lifecycle and Units of Work
//!
//! SQLite access for the gym log:
//! - One owned connection per handle, opened lazily and closed explicitly
//! - Foreign-key enforcement on every connection
//! - Idempotent schema creation on open
//! - Statement routing by [`Statement`] variant, never by SQL text
//! - Panic-safe transactions with automatic rollback

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, trace};

use super::query::Statement;
use super::schema;
use crate::config::{Config, TableNames};
use crate::types::{GymError, Result, ResultExt, RowId};

/// One result row: column values in table order.
pub type Row = Vec<Value>;

/// What running a [`Statement`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every row of a select, in scan order
    Rows(Vec<Row>),
    /// Rows touched by an insert, update or delete
    Affected(usize),
    /// Raw statements report nothing
    Done,
}

impl Outcome {
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Self::Rows(rows) => rows,
            Self::Affected(_) | Self::Done => Vec::new(),
        }
    }

    pub fn affected(&self) -> usize {
        match self {
            Self::Affected(n) => *n,
            Self::Rows(_) | Self::Done => 0,
        }
    }
}

/// Anything repository functions can run statements against: the store
/// itself, or a unit of work inside [`Database::transaction`].
pub trait Executor {
    /// Run one statement. Writes outside a unit of work are committed as soon
    /// as they complete.
    fn execute(&self, statement: &Statement) -> Result<Outcome>;

    /// Row id most recently assigned on the underlying connection.
    fn last_inserted_id(&self) -> Result<RowId>;

    /// Ordered column names of `table`.
    fn column_names(&self, table: &str) -> Result<Vec<String>>;

    /// Table names this store was created with.
    fn tables(&self) -> &TableNames;
}

/// Owned handle to the gym log store.
///
/// Holds at most one open connection. Operations on a closed handle fail with
/// [`GymError::NotOpen`]; dropping the handle releases the connection.
pub struct Database {
    /// `None` for an in-memory store
    path: Option<PathBuf>,
    tables: TableNames,
    conn: Option<Connection>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("tables", &self.tables)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Database {
    /// Create a closed handle for the store file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P, tables: TableNames) -> Self {
        Self {
            path: Some(path.into()),
            tables,
            conn: None,
        }
    }

    /// Create a closed handle from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store.path.clone(), config.tables.clone())
    }

    /// Create and open a handle for the store file at `path`.
    pub fn open_at<P: Into<PathBuf>>(path: P, tables: TableNames) -> Result<Self> {
        let mut db = Self::new(path, tables);
        db.open()?;
        Ok(db)
    }

    /// Open a private in-memory store with the default table names.
    pub fn open_in_memory() -> Result<Self> {
        let mut db = Self {
            path: None,
            tables: TableNames::default(),
            conn: None,
        };
        db.open()?;
        Ok(db)
    }

    /// Open the connection and make sure the schema exists.
    ///
    /// Creates the store directory when missing. A no-op when already open.
    pub fn open(&mut self) -> Result<()> {
        if self.conn.is_some() {
            debug!("Store already open, reusing connection");
            return Ok(());
        }
        self.tables.validate()?;

        let conn = match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                    && !parent.exists()
                {
                    fs::create_dir_all(parent).with_context(format!(
                        "Failed to create store directory {}",
                        parent.display()
                    ))?;
                    debug!("Created store directory: {}", parent.display());
                }
                Connection::open(path)?
            }
            None => Connection::open_in_memory()?,
        };

        Self::configure_connection(&conn)?;
        run(
            &conn,
            &Statement::Raw {
                sql: schema::render(&self.tables),
            },
        )?;
        debug!("Schema ensured for tables {:?}", self.tables.entries());

        self.conn = Some(conn);
        info!("Opened store: {}", self.describe_location());
        Ok(())
    }

    /// Release the connection. A no-op when not open.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| GymError::Database(e))?;
            info!("Closed store: {}", self.describe_location());
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Store file location, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Per-connection settings, applied before any other statement.
    fn configure_connection(conn: &Connection) -> Result<()> {
        run(
            conn,
            &Statement::Raw {
                sql: schema::CONNECTION_PRAGMAS.to_string(),
            },
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(GymError::NotOpen)
    }

    fn describe_location(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string())
    }

    /// Run `f` as one unit of work.
    ///
    /// Everything `f` executes commits together when it returns `Ok`. On `Err`
    /// or panic the transaction is rolled back; a panic is reported as an
    /// error instead of unwinding through the caller.
    pub fn transaction<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<T>,
    {
        let conn = self.conn.as_mut().ok_or(GymError::NotOpen)?;
        let tx = conn.transaction()?;
        let unit = UnitOfWork {
            conn: &tx,
            tables: &self.tables,
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&unit)));

        match result {
            Ok(Ok(value)) => {
                tx.commit()?;
                debug!("Unit of work committed");
                Ok(value)
            }
            Ok(Err(e)) => {
                // Transaction will be rolled back on drop
                debug!("Unit of work rolled back: {}", e);
                Err(e)
            }
            Err(panic_payload) => {
                // Transaction will be rolled back on drop
                let panic_msg = panic_payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic_payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "Unknown panic".to_string());

                tracing::error!("Unit of work panicked: {}", panic_msg);
                Err(GymError::Storage(format!(
                    "Transaction panicked: {}",
                    panic_msg
                )))
            }
        }
    }
}

impl Executor for Database {
    fn execute(&self, statement: &Statement) -> Result<Outcome> {
        run(self.conn()?, statement)
    }

    fn last_inserted_id(&self) -> Result<RowId> {
        Ok(self.conn()?.last_insert_rowid())
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        column_names(self.conn()?, table)
    }

    fn tables(&self) -> &TableNames {
        &self.tables
    }
}

/// Statements issued inside [`Database::transaction`].
pub struct UnitOfWork<'a> {
    conn: &'a Connection,
    tables: &'a TableNames,
}

impl Executor for UnitOfWork<'_> {
    fn execute(&self, statement: &Statement) -> Result<Outcome> {
        run(self.conn, statement)
    }

    fn last_inserted_id(&self) -> Result<RowId> {
        Ok(self.conn.last_insert_rowid())
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        column_names(self.conn, table)
    }

    fn tables(&self) -> &TableNames {
        self.tables
    }
}

/// Route a statement by its tag. Engine errors pass through untouched so
/// constraint violations stay recognizable.
fn run(conn: &Connection, statement: &Statement) -> Result<Outcome> {
    trace!("Executing {} statement: {}", statement.kind(), statement.sql());

    match statement {
        Statement::Select { sql, args } => {
            let mut stmt = conn.prepare(sql)?;
            let width = stmt.column_count();
            let rows = stmt
                .query_map(params_from_iter(args.iter()), |row| {
                    (0..width)
                        .map(|i| row.get::<_, Value>(i))
                        .collect::<rusqlite::Result<Row>>()
                })?
                .collect::<rusqlite::Result<Vec<Row>>>()?;
            Ok(Outcome::Rows(rows))
        }
        Statement::Insert { sql, args }
        | Statement::Update { sql, args }
        | Statement::Delete { sql, args } => {
            let affected = conn.execute(sql, params_from_iter(args.iter()))?;
            Ok(Outcome::Affected(affected))
        }
        Statement::Raw { sql } => {
            conn.execute_batch(sql)?;
            Ok(Outcome::Done)
        }
    }
}

fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let stmt = conn.prepare(&format!("SELECT * FROM {} LIMIT 1", table))?;
    Ok(stmt.column_names().into_iter().map(String::from).collect())
}
