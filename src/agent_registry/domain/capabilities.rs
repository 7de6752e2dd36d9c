//! Capability tags attached to agents.

use super::AgentDomainError;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of lowercase capability tags.
///
/// Tags keep their declaration order so listings stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CapabilitySet(Vec<String>);

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a capability set from raw tags.
    ///
    /// Tags are trimmed and lowercased; duplicates after normalisation are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyCapability`] when a tag is blank.
    pub fn new<I, S>(tags: I) -> Result<Self, AgentDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let value = tag.as_ref().trim().to_lowercase();
            if value.is_empty() {
                return Err(AgentDomainError::EmptyCapability);
            }
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }
        Ok(Self(normalized))
    }

    /// Returns whether the set contains a tag (case-insensitive).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.0.iter().any(|existing| *existing == needle)
    }

    /// Returns whether every tag of `required` is present.
    #[must_use]
    pub fn contains_all(&self, required: &Self) -> bool {
        required.0.iter().all(|tag| self.0.contains(tag))
    }

    /// Returns whether any tag contains `needle`, which must already be
    /// lowercase.
    #[must_use]
    pub fn any_contains(&self, needle: &str) -> bool {
        self.0.iter().any(|tag| tag.contains(needle))
    }

    /// Iterates over tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for CapabilitySet {
    type Error = AgentDomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CapabilitySet> for Vec<String> {
    fn from(value: CapabilitySet) -> Self {
        value.0
    }
}
