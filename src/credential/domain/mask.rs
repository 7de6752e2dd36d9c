//! Display-safe key masking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading characters a masked key may reveal.
pub const VISIBLE_PREFIX_LEN: usize = 5;
/// Number of trailing characters a masked key may reveal.
pub const VISIBLE_SUFFIX_LEN: usize = 4;
/// Character substituted for hidden key material.
pub const MASK_CHAR: char = '*';

/// Fixed length of the masked middle section.
const MASK_RUN: usize = 4;
/// Minimum number of hidden characters before any are revealed.
const MIN_HIDDEN: usize = 8;

/// Masked representation of an API key, safe to log and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskedKey(String);

impl MaskedKey {
    /// Returns the masked text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaskedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Masks a key for display.
///
/// Keys long enough to keep at least eight characters hidden reveal their
/// first [`VISIBLE_PREFIX_LEN`] and last [`VISIBLE_SUFFIX_LEN`] characters
/// around a fixed run of [`MASK_CHAR`]. Shorter keys, and keys that contain
/// the mask character themselves, are masked entirely. The middle run has a
/// fixed length so the output does not leak the key length.
#[must_use]
pub fn mask_api_key(raw_key: &str) -> MaskedKey {
    let chars: Vec<char> = raw_key.chars().collect();
    let fully_masked = chars.len() < VISIBLE_PREFIX_LEN + VISIBLE_SUFFIX_LEN + MIN_HIDDEN
        || chars.contains(&MASK_CHAR);
    if fully_masked {
        return MaskedKey(MASK_CHAR.to_string().repeat(MASK_RUN));
    }

    let head: String = chars.iter().take(VISIBLE_PREFIX_LEN).collect();
    let tail: String = chars
        .iter()
        .skip(chars.len().saturating_sub(VISIBLE_SUFFIX_LEN))
        .collect();
    let middle = MASK_CHAR.to_string().repeat(MASK_RUN);
    MaskedKey(format!("{head}{middle}{tail}"))
}
