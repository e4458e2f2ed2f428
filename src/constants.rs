//! Global Constants
//!
//! Centralized constants for storage layout and presentation.

/// Store layout defaults
pub mod store {
    /// Application directory name under the XDG config/data roots
    pub const APP_DIR: &str = "gymlog";

    /// Store file name
    pub const DB_FILE_NAME: &str = "gym.db";

    /// Directory used when no XDG data root or HOME is available
    pub const FALLBACK_DIR: &str = "database";

    /// Surrogate key column shared by every table
    pub const ID_COLUMN: &str = "_id";
}

/// Default table names
pub mod tables {
    pub const EXERCISE: &str = "exercise";
    pub const SESSION: &str = "session";
    pub const SESSION_DETAILS: &str = "session_details";
    pub const INTENSITY: &str = "intensity";
}

/// Value bounds enforced by the schema
pub mod limits {
    /// Inclusive bounds of a session detail's intensity
    pub const DETAIL_INTENSITY_MIN: i64 = 0;
    pub const DETAIL_INTENSITY_MAX: i64 = 10;

    /// Inclusive bounds of an intensity level
    pub const LEVEL_MIN: i64 = 1;
    pub const LEVEL_MAX: i64 = 10;
}

/// Presentation constants
pub mod display {
    /// Label shown for a session detail with no exercise
    pub const UNNAMED_EXERCISE: &str = "UNNAMED";

    /// Timestamp format accepted and printed by the CLI
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Date-only format accepted by the CLI
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// SQL keywords
pub mod sql {
    /// Keywords SQLite reserves; none of them may be used as a table name.
    pub const KEYWORDS: &[&str] = &[
        "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS",
        "ASC", "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE",
        "CASE", "CAST", "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT",
        "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
        "DATABASE", "DEFAULT", "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH",
        "DISTINCT", "DO", "DROP", "EACH", "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE",
        "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL", "FILTER", "FIRST", "FOLLOWING", "FOR",
        "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB", "GROUP", "GROUPS", "HAVING", "IF",
        "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED", "INITIALLY", "INNER", "INSERT",
        "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "KEY", "LAST", "LEFT",
        "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT", "NOTHING",
        "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS", "OUTER",
        "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
        "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME",
        "REPLACE", "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT",
        "SELECT", "SET", "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION",
        "TRIGGER", "UNBOUNDED", "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES",
        "VIEW", "VIRTUAL", "WHEN", "WHERE", "WINDOW", "WITH", "WITHOUT",
    ];
}
