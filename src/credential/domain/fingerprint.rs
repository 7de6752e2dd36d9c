//! Truncated key digests.

use super::ApiKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

/// Number of digest bytes kept in a fingerprint.
const FINGERPRINT_BYTES: usize = 8;

/// First 64 bits of the SHA-256 digest of a key, hex encoded.
///
/// Used to tell whether a rotation wrote the same value again without
/// retaining the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyFingerprint(String);

impl KeyFingerprint {
    /// Computes the fingerprint of a key.
    #[must_use]
    pub fn of(key: &ApiKey) -> Self {
        let digest = Sha256::digest(key.expose().as_bytes());
        let mut hex = String::with_capacity(FINGERPRINT_BYTES * 2);
        for byte in digest.iter().take(FINGERPRINT_BYTES) {
            // Writing to a String cannot fail.
            let _ignored = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
