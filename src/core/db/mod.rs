/// Database Module
///
/// The connection layer, split into four concerns:
/// - **Adapters** (`adapter.rs`): the traits a backend implements
/// - **Connection Management** (`connection.rs`): lifecycle, auto-reconnect and command execution
/// - **Query Types** (`query.rs`): rows, tables, parameters and statement classification
/// - **Server Connections** (`server.rs`): host/port/credential details shared by networked backends
///
/// ## Error Handling
///
/// All operations return the crate-wide `DatabaseError`.
pub mod adapter;
pub mod connection;
pub mod query;
pub mod server;

pub use adapter::*;
pub use connection::*;
pub use query::*;
pub use server::*;
