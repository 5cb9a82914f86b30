/// Core Module for databaselib
///
/// The cell type, the connection layer and the shared error type. Backends
/// live in [`crate::drivers`].

pub mod cell;
pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use cell::Cell;
pub use db::{
    Adapter, ConnectionState, DatabaseConnection, Handle, Param, Row, ServerAdapter,
    ServerBackend, ServerConnection, ServerDetails, StatementType, Table,
};
pub use error::{DatabaseError, Result};
