//! Start-up sources for the service catalogue and agent registry.
//!
//! A [`RegistrySource`] yields a [`RegistrySnapshot`]: the raw service and
//! agent definitions plus optional orchestrator settings. Validation into
//! domain types happens once, during
//! [`Platform::bootstrap`](crate::platform::Platform::bootstrap).

mod json_file;
mod snapshot;
mod static_source;

pub use json_file::JsonFileRegistrySource;
pub use snapshot::RegistrySnapshot;
pub use static_source::StaticRegistrySource;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned while loading a registry snapshot.
#[derive(Debug, Error)]
pub enum RegistrySourceError {
    /// The registry directory could not be opened.
    #[error("failed to open registry directory {path}: {source}")]
    OpenDir {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The registry document could not be read.
    #[error("failed to read registry document {path}: {source}")]
    Read {
        /// Document path relative to its directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The registry document is not valid JSON for a snapshot.
    #[error("failed to parse registry document {path}: {source}")]
    Parse {
        /// Document path relative to its directory.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for registry source operations.
pub type RegistrySourceResult<T> = Result<T, RegistrySourceError>;

/// Provider of the start-up registry snapshot.
pub trait RegistrySource {
    /// Loads the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrySourceError`] when the snapshot cannot be read or
    /// parsed.
    fn load(&self) -> RegistrySourceResult<RegistrySnapshot>;
}
