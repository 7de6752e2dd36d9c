//! Domain model for tenant credentials.
//!
//! Plaintext key material is confined to [`ApiKey`] and
//! [`CredentialHandle`]; every other type here is safe to log, serialise
//! and display.

mod credential;
mod error;
mod fingerprint;
mod mask;
mod secret;
mod sealed;
mod strength;
mod tenant;

pub use credential::{Credential, CredentialKey};
pub use error::CredentialDomainError;
pub use fingerprint::KeyFingerprint;
pub use mask::{MASK_CHAR, MaskedKey, VISIBLE_PREFIX_LEN, VISIBLE_SUFFIX_LEN, mask_api_key};
pub use sealed::SealedRecord;
pub use secret::{ApiKey, CredentialHandle};
pub use strength::{KeyStrength, StrengthLabel, calculate_key_strength};
pub use tenant::TenantId;
