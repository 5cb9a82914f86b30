/// Drivers Module
///
/// Concrete backends. SQLite is always available; MySQL is built with the
/// `mysql` feature.
pub mod sqlite;

#[cfg(feature = "mysql")]
pub mod mysql;

pub use sqlite::{SqliteAdapter, SqliteConnection, SqliteDetails, SqliteHandle};

#[cfg(feature = "mysql")]
pub use mysql::{MysqlBackend, MysqlConnection, MysqlHandle};
