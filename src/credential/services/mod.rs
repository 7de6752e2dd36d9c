//! Credential services.

mod byok;

pub use byok::{ByokError, ByokManager, ByokResult};
