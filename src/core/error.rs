/// Databaselib Error Module
///
/// This module defines the error type shared by every connection, adapter
/// and config operation in the crate.
use thiserror::Error;

/// Error type for all databaselib operations.
///
/// The variants fall into three groups:
/// - Lifecycle violations (`AlreadyConnected`, `NotConnected`)
/// - Configuration problems (`InvalidConfiguration`, `ConfigParse`, `Io`)
/// - Failures reported by the underlying SQL client (`Database`, `Server`, `Driver`)
///
/// `Coercion` is returned by [`Cell`](crate::core::Cell) conversions.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// `open()` was called on a connection that already holds a handle
    #[error("Already connected")]
    AlreadyConnected,

    /// An operation needed a live handle but the connection is closed
    #[error("Not connected: {0}")]
    NotConnected(String),

    /// New connection details could not be used to reconnect
    #[error("Invalid connection details: {0}")]
    InvalidConfiguration(String),

    /// The command could not be run as given (e.g. it is empty)
    #[error("Query error: {0}")]
    Query(String),

    /// A configuration file line was malformed or a required entry is missing
    #[error("Could not read database configuration: {0}")]
    ConfigParse(String),

    /// Errors reported by the SQLite client
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Errors reported by the MySQL client
    #[cfg(feature = "mysql")]
    #[error("Server error: {0}")]
    Server(#[from] sqlx::Error),

    /// Backend failures that do not originate from a SQL client
    #[error("Driver error: {0}")]
    Driver(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell value could not be converted to the requested type
    #[error("Cannot convert {} to {target}", .value.as_deref().map(|v| format!("'{v}'")).unwrap_or_else(|| "NULL".to_string()))]
    Coercion {
        value: Option<String>,
        target: &'static str,
    },
}

impl DatabaseError {
    /// Returns true for errors raised by the wrapped SQL client or its transport.
    pub fn is_driver_error(&self) -> bool {
        match self {
            DatabaseError::Database(_) | DatabaseError::Driver(_) => true,
            #[cfg(feature = "mysql")]
            DatabaseError::Server(_) => true,
            _ => false,
        }
    }
}

/// Type alias for Result to use DatabaseError as the error type.
pub type Result<T> = std::result::Result<T, DatabaseError>;
