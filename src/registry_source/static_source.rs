//! In-memory registry source.

use super::{RegistrySnapshot, RegistrySource, RegistrySourceResult};

/// Registry source that returns a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistrySource {
    snapshot: RegistrySnapshot,
}

impl StaticRegistrySource {
    /// Wraps a snapshot.
    #[must_use]
    pub const fn new(snapshot: RegistrySnapshot) -> Self {
        Self { snapshot }
    }
}

impl RegistrySource for StaticRegistrySource {
    fn load(&self) -> RegistrySourceResult<RegistrySnapshot> {
        Ok(self.snapshot.clone())
    }
}
