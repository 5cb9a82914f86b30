/// SQLite Driver
///
/// File backed databases through rusqlite. The only connection detail is the
/// database path; `:memory:` opens a private in-memory database.
use crate::config::{require, ConfigEntries};
use crate::core::db::{Adapter, DatabaseConnection, Handle, Param, Row, Table};
use crate::core::{Cell, Result};
use rusqlite::{params_from_iter, types::ValueRef, Connection};
use tracing::debug;

/// Location of a SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteDetails {
    pub path: String,
}

impl SqliteDetails {
    pub fn new(path: impl Into<String>) -> Self {
        SqliteDetails { path: path.into() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteAdapter;

impl Adapter for SqliteAdapter {
    type Details = SqliteDetails;
    type Handle = SqliteHandle;

    fn open_handle(&self, details: &SqliteDetails) -> Result<SqliteHandle> {
        debug!(path = %details.path, "opening sqlite database");
        let conn = Connection::open(&details.path)?;
        Ok(SqliteHandle { conn })
    }

    fn details_from_config(entries: &ConfigEntries) -> Result<SqliteDetails> {
        Ok(SqliteDetails::new(require(entries, "path")?.to_string()))
    }
}

/// An open rusqlite connection.
#[derive(Debug)]
pub struct SqliteHandle {
    conn: Connection,
}

impl SqliteHandle {
    /// The wrapped rusqlite connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Handle for SqliteHandle {
    fn execute(&mut self, command: &str, params: &[Param]) -> Result<()> {
        let mut stmt = self.conn.prepare(command)?;
        // stepping through the rows also runs statements that return some
        let mut rows = stmt.query(params_from_iter(params.iter().map(Param::as_str)))?;
        while rows.next()?.is_some() {}
        Ok(())
    }

    fn query(&mut self, command: &str, params: &[Param]) -> Result<Table> {
        let mut stmt = self.conn.prepare(command)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params_from_iter(params.iter().map(Param::as_str)))?;
        let mut table = Table::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                record.insert(name.clone(), cell_from_value(row.get_ref(i)?));
            }
            table.push(record);
        }
        Ok(table)
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

/// Renders a SQLite value as text, keeping NULL distinct.
fn cell_from_value(value: ValueRef) -> Cell {
    match value {
        ValueRef::Null => Cell::null(),
        ValueRef::Integer(i) => Cell::from(i.to_string()),
        // keep reals real-shaped: 1.0 stays "1.0", 1e20 stays "1e20"
        ValueRef::Real(f) => Cell::from(format!("{:?}", f)),
        ValueRef::Text(t) | ValueRef::Blob(t) => Cell::from(String::from_utf8_lossy(t).into_owned()),
    }
}

/// A connection to a SQLite database file.
pub type SqliteConnection = DatabaseConnection<SqliteAdapter>;

impl DatabaseConnection<SqliteAdapter> {
    /// Creates a disconnected connection to the database at `path`
    pub fn with_path(path: impl Into<String>) -> Self {
        DatabaseConnection::new(SqliteAdapter, SqliteDetails::new(path))
    }

    /// Points the connection at another database file, reconnecting if
    /// connected.
    pub fn set_path(&mut self, path: impl Into<String>) -> Result<()> {
        self.set_connection_details(SqliteDetails::new(path))
    }
}
