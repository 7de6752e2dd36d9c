//! JSON file registry source.

use super::{RegistrySnapshot, RegistrySource, RegistrySourceError, RegistrySourceResult};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

/// Reads a registry document from a file inside a capability directory.
///
/// The document is read afresh on every [`RegistrySource::load`]; the
/// platform loads it once at start-up.
#[derive(Debug)]
pub struct JsonFileRegistrySource {
    dir: Dir,
    file: Utf8PathBuf,
}

impl JsonFileRegistrySource {
    /// Uses `file` inside an already opened directory.
    #[must_use]
    pub fn new(dir: Dir, file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir,
            file: file.into(),
        }
    }

    /// Opens `dir` with ambient authority and uses `file` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrySourceError::OpenDir`] when the directory cannot be
    /// opened.
    pub fn open(dir: &Utf8Path, file: impl Into<Utf8PathBuf>) -> RegistrySourceResult<Self> {
        let handle = Dir::open_ambient_dir(dir, ambient_authority()).map_err(|source| {
            RegistrySourceError::OpenDir {
                path: dir.to_owned(),
                source,
            }
        })?;
        Ok(Self::new(handle, file))
    }

    /// Returns the document path relative to the directory.
    #[must_use]
    pub fn file(&self) -> &Utf8Path {
        &self.file
    }
}

impl RegistrySource for JsonFileRegistrySource {
    fn load(&self) -> RegistrySourceResult<RegistrySnapshot> {
        let contents =
            self.dir
                .read_to_string(&self.file)
                .map_err(|source| RegistrySourceError::Read {
                    path: self.file.clone(),
                    source,
                })?;
        let snapshot: RegistrySnapshot =
            serde_json::from_str(&contents).map_err(|source| RegistrySourceError::Parse {
                path: self.file.clone(),
                source,
            })?;
        debug!(
            file = %self.file,
            services = snapshot.services.len(),
            agents = snapshot.agents.len(),
            "registry document loaded"
        );
        Ok(snapshot)
    }
}
