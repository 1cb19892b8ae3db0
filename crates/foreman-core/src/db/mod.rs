//! Database operations and SQLite management.
//!
//! This module provides the low-level persistence layer of the tracker: the
//! SQLite connection, schema management and one query module per entity. The
//! [`crate::propagation::StatusRepository`] implementation lives in
//! [`status_repo`].

use std::{path::Path, str::FromStr};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};

use crate::error::{DatabaseResultExt, Result};

pub mod client_queries;
pub mod project_queries;
pub mod schema;
pub mod status_repo;
pub mod step_queries;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Read an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a status column into one of the status enums.
pub(crate) fn status_column<S>(row: &Row, idx: usize) -> rusqlite::Result<S>
where
    S: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<S>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Read an INTEGER id column.
pub(crate) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    row.get::<_, i64>(idx).map(|id| id as u64)
}
