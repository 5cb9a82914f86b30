//! Connection lifecycle, flat config files and loosely-typed result rows on
//! top of SQLite and MySQL clients.
//!
//! ```no_run
//! use databaselib::{params, SqliteConnection};
//!
//! let mut conn = SqliteConnection::with_path("app.db");
//! conn.open()?;
//! conn.get_table("CREATE TABLE IF NOT EXISTS kv (k TEXT, v TEXT)", &[])?;
//! conn.get_table("INSERT INTO kv VALUES (?, ?)", &params!["answer", 42])?;
//! if let Some(row) = conn.get_first_row("SELECT v FROM kv WHERE k = ?", &params!["answer"])? {
//!     assert_eq!(row["v"].to_int()?, 42);
//! }
//! conn.close()?;
//! # Ok::<(), databaselib::DatabaseError>(())
//! ```

// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod drivers;

pub use crate::core::{
    Cell, ConnectionState, DatabaseConnection, DatabaseError, Param, Result, Row,
    ServerDetails, Table,
};
pub use drivers::{SqliteConnection, SqliteDetails};

#[cfg(feature = "mysql")]
pub use drivers::MysqlConnection;
