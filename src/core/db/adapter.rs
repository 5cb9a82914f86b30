/// Adapter Module
///
/// The only place backend specific code plugs into the connection layer.
/// An [`Adapter`] turns connection details into a live [`Handle`]; the handle
/// runs prepared commands against the engine.
use crate::config::ConfigEntries;
use crate::core::db::query::{Param, Table};
use crate::core::Result;
use std::fmt;

/// A live connection to a SQL engine.
pub trait Handle {
    /// Runs a command for its effect, discarding any rows it produces.
    fn execute(&mut self, command: &str, params: &[Param]) -> Result<()>;

    /// Runs a command and materializes every row as text cells, in the order
    /// the engine returns them.
    fn query(&mut self, command: &str, params: &[Param]) -> Result<Table>;

    /// Releases the underlying resources.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Backend specific construction of handles.
pub trait Adapter {
    /// Everything the backend needs to open a handle
    type Details: fmt::Debug + Clone;
    type Handle: Handle;

    /// Opens a new handle with the given details.
    fn open_handle(&self, details: &Self::Details) -> Result<Self::Handle>;

    /// Builds details from the entries of a configuration file, failing with
    /// `ConfigParse` when a required entry is missing or unusable.
    fn details_from_config(entries: &ConfigEntries) -> Result<Self::Details>;
}
