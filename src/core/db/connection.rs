/// Connection Management Module
///
/// This module provides the connection lifecycle (open, close, reconnect),
/// the auto-reconnect policy and parameterized command execution on top of
/// any [`Adapter`].
use crate::config::read_configuration_file;
use crate::core::db::adapter::{Adapter, Handle};
use crate::core::db::query::{Param, Row, StatementType, Table};
use crate::core::{DatabaseError, Result};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Represents the lifecycle state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No handle is held
    Disconnected,
    /// A live handle is held
    Connected,
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

/// A single logical connection to a database.
///
/// Owns the adapter, the current connection details and at most one open
/// handle. Not synchronized: use one instance per thread of execution.
pub struct DatabaseConnection<A: Adapter> {
    adapter: A,
    details: A::Details,
    handle: Option<A::Handle>,
    auto_reconnect: bool,
}

impl<A: Adapter> DatabaseConnection<A> {
    /// Creates a disconnected connection with auto-reconnect disabled
    pub fn new(adapter: A, details: A::Details) -> Self {
        Self::with_auto_reconnect(adapter, details, false)
    }

    /// Creates a disconnected connection with the given auto-reconnect policy
    pub fn with_auto_reconnect(adapter: A, details: A::Details, auto_reconnect: bool) -> Self {
        DatabaseConnection {
            adapter,
            details,
            handle: None,
            auto_reconnect,
        }
    }

    /// Creates a disconnected connection whose details come from a
    /// configuration file.
    pub fn from_config_file<P: AsRef<Path>>(adapter: A, path: P) -> Result<Self> {
        let entries = read_configuration_file(path)?;
        let details = A::details_from_config(&entries)?;
        Ok(Self::new(adapter, details))
    }

    /// Opens the underlying handle.
    ///
    /// # Errors
    ///
    /// `DatabaseError::AlreadyConnected` if a handle is already held; driver
    /// errors from the adapter are returned unchanged.
    pub fn open(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Err(DatabaseError::AlreadyConnected);
        }
        debug!(details = ?self.details, "opening connection");
        self.handle = Some(self.adapter.open_handle(&self.details)?);
        Ok(())
    }

    /// Closes the underlying handle.
    ///
    /// The connection is disconnected afterwards even if the driver reports
    /// an error while releasing the handle.
    pub fn close(&mut self) -> Result<()> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| DatabaseError::NotConnected("Not connected".to_string()))?;
        debug!("closing connection");
        handle.close()
    }

    /// Closes and reopens the handle. Does nothing while disconnected.
    pub fn reconnect(&mut self) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            debug!(details = ?self.details, "reconnecting");
            handle.close()?;
            self.handle = Some(self.adapter.open_handle(&self.details)?);
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn auto_reconnect_active(&self) -> bool {
        self.auto_reconnect
    }

    pub fn set_auto_reconnect(&mut self, auto_reconnect: bool) {
        self.auto_reconnect = auto_reconnect;
    }

    /// The raw driver handle, `None` while disconnected
    pub fn handle(&self) -> Option<&A::Handle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut A::Handle> {
        self.handle.as_mut()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Current connection details
    pub fn details(&self) -> &A::Details {
        &self.details
    }

    /// Mutable access to the details. Changes apply on the next open or
    /// reconnect.
    pub fn details_mut(&mut self) -> &mut A::Details {
        &mut self.details
    }

    /// Replaces the connection details and, if connected, reconnects with them.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidConfiguration` if the forced reconnect fails. The
    /// connection is left disconnected in that case.
    pub fn set_connection_details(&mut self, details: A::Details) -> Result<()> {
        self.details = details;
        self.reconnect().map_err(|e| {
            warn!(error = %e, "reconnect with new connection details failed");
            DatabaseError::InvalidConfiguration(format!(
                "Unable to reconnect with the new connection details: {}",
                e
            ))
        })
    }

    /// Reads connection details from a configuration file and applies them
    /// like [`set_connection_details`](Self::set_connection_details).
    pub fn load_connection_details_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let entries = read_configuration_file(path)?;
        let details = A::details_from_config(&entries)?;
        self.set_connection_details(details)
    }

    /// Runs a command and returns its rows.
    ///
    /// Parameters replace the placeholders in order. Commands that do not
    /// start with `select` are run for their effect and yield an empty table.
    ///
    /// The command is a single statement. With SQLite, anything after the
    /// first statement is ignored without an error.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Query` for an empty or whitespace-only command.
    /// `DatabaseError::NotConnected` when disconnected and auto-reconnect is
    /// off. Driver errors are returned unchanged.
    pub fn get_table(&mut self, command: &str, params: &[Param]) -> Result<Table> {
        if command.trim().is_empty() {
            return Err(DatabaseError::Query("Command is empty".to_string()));
        }
        let statement_type = StatementType::from_sql(command);
        let handle = self.live_handle(command)?;
        debug!(?statement_type, params = params.len(), "running command");

        if !statement_type.returns_rows() {
            handle.execute(command, params)?;
            return Ok(Table::new());
        }
        handle.query(command, params)
    }

    /// Runs a command and returns its first row, `None` if there is none.
    pub fn get_first_row(&mut self, command: &str, params: &[Param]) -> Result<Option<Row>> {
        Ok(self.get_table(command, params)?.into_iter().next())
    }

    fn live_handle(&mut self, command: &str) -> Result<&mut A::Handle> {
        if self.handle.is_none() {
            if !self.auto_reconnect {
                return Err(not_connected(command));
            }
            debug!("connection is closed, reopening before running command");
            self.open()?;
        }
        self.handle.as_mut().ok_or_else(|| not_connected(command))
    }
}

fn not_connected(command: &str) -> DatabaseError {
    DatabaseError::NotConnected(format!("Failed to run \"{}\"", command))
}

impl<A: Adapter> Drop for DatabaseConnection<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.close() {
                warn!(error = %e, "failed to close connection on drop");
            }
        }
    }
}

impl<A: Adapter> fmt::Debug for DatabaseConnection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("details", &self.details)
            .field("state", &self.state())
            .field("auto_reconnect", &self.auto_reconnect)
            .finish()
    }
}
