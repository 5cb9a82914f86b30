/// Server Connection Module
///
/// Connection details and config schema shared by networked database
/// servers. A [`ServerBackend`] only knows how to reach its vendor's server;
/// [`ServerAdapter`] supplies everything else.
use crate::config::{require, ConfigEntries};
use crate::core::db::adapter::{Adapter, Handle};
use crate::core::db::connection::DatabaseConnection;
use crate::core::{DatabaseError, Result};
use std::fmt;
use tracing::debug;

/// Host, port, database and credentials of a database server.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerDetails {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ServerDetails {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        ServerDetails {
            host: host.into(),
            port,
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads the `host`, `port`, `database`, `username` and `password`
    /// entries. All five are required.
    pub fn from_config(entries: &ConfigEntries) -> Result<Self> {
        let host = require(entries, "host")?.to_string();
        let port_entry = require(entries, "port")?;
        let port = port_entry
            .to_int()
            .ok()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| {
                DatabaseError::ConfigParse(format!(
                    "Entry 'port' is not a valid port number: '{}'",
                    port_entry
                ))
            })?;
        let database = require(entries, "database")?.to_string();
        let username = require(entries, "username")?.to_string();
        let password = require(entries, "password")?.to_string();

        Ok(ServerDetails {
            host,
            port,
            database,
            username,
            password,
        })
    }
}

impl fmt::Debug for ServerDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerDetails")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Vendor specific access to a database server.
pub trait ServerBackend {
    type Handle: Handle;

    /// Connection string for the given details, without the password.
    fn connection_url(&self, details: &ServerDetails) -> String;

    /// Opens a handle to the server.
    fn connect(&self, details: &ServerDetails) -> Result<Self::Handle>;
}

/// Adapter for any networked server backend.
#[derive(Debug, Clone, Default)]
pub struct ServerAdapter<B> {
    backend: B,
}

impl<B: ServerBackend> ServerAdapter<B> {
    pub fn new(backend: B) -> Self {
        ServerAdapter { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ServerBackend> Adapter for ServerAdapter<B> {
    type Details = ServerDetails;
    type Handle = B::Handle;

    fn open_handle(&self, details: &ServerDetails) -> Result<B::Handle> {
        debug!(url = %self.backend.connection_url(details), "connecting to database server");
        self.backend.connect(details)
    }

    fn details_from_config(entries: &ConfigEntries) -> Result<ServerDetails> {
        ServerDetails::from_config(entries)
    }
}

/// A connection to a networked database server.
pub type ServerConnection<B> = DatabaseConnection<ServerAdapter<B>>;

impl<B: ServerBackend> DatabaseConnection<ServerAdapter<B>> {
    /// Creates a disconnected server connection
    pub fn server(backend: B, details: ServerDetails) -> Self {
        DatabaseConnection::new(ServerAdapter::new(backend), details)
    }

    /// Replaces all five connection values, reconnecting if connected.
    pub fn set_connection_values(
        &mut self,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        self.set_connection_details(ServerDetails::new(host, port, database, username, password))
    }
}
