//! Credential shape rules attached to catalogue entries.
//!
//! A [`KeyFormat`] is an ordered list drawn from the closed [`KeyRule`] set.
//! When the format declares a prefix, length and charset rules apply to the
//! key body that follows it, while a pattern rule is matched against the
//! whole key. Violations never carry key material.

use super::CatalogDomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Character classes a key body may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// ASCII letters and digits.
    Alphanumeric,
    /// ASCII letters, digits, `-` and `_`.
    AlphanumericDash,
    /// Hexadecimal digits in either case.
    Hex,
    /// Standard and URL-safe base64 alphabets, including padding.
    Base64,
    /// Any visible ASCII character (no whitespace).
    Printable,
}

impl Charset {
    /// Returns whether `c` belongs to the character set.
    #[must_use]
    pub const fn allows(self, c: char) -> bool {
        match self {
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
            Self::AlphanumericDash => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Self::Hex => c.is_ascii_hexdigit(),
            Self::Base64 => {
                c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '-' | '_')
            }
            Self::Printable => c.is_ascii_graphic(),
        }
    }

    /// Returns the canonical name of the character set.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphanumeric => "alphanumeric",
            Self::AlphanumericDash => "alphanumeric_dash",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Printable => "printable",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length constraint on a key body, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthRule {
    /// The body must have exactly this many characters.
    Exact(usize),
    /// The body length must fall within `min..=max`.
    Range {
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
    /// The body must have at least this many characters.
    AtLeast(usize),
}

impl LengthRule {
    /// Returns whether `len` satisfies the rule.
    #[must_use]
    pub const fn accepts(self, len: usize) -> bool {
        match self {
            Self::Exact(expected) => len == expected,
            Self::Range { min, max } => len >= min && len <= max,
            Self::AtLeast(min) => len >= min,
        }
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(expected) => write!(f, "exactly {expected}"),
            Self::Range { min, max } => write!(f, "between {min} and {max}"),
            Self::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// Compiled regular expression a whole key must match.
#[derive(Debug, Clone)]
pub struct KeyPattern(Regex);

impl KeyPattern {
    /// Compiles a key pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::InvalidKeyPattern`] when the expression
    /// does not compile.
    pub fn new(source: &str) -> Result<Self, CatalogDomainError> {
        Regex::new(source)
            .map(Self)
            .map_err(|err| CatalogDomainError::InvalidKeyPattern {
                pattern: source.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Returns the pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_match(&self, key: &str) -> bool {
        self.0.is_match(key)
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for KeyPattern {}

/// Reason a key failed its catalogue format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyFormatViolation {
    /// The key does not start with the declared prefix.
    #[error("key must start with '{expected}'")]
    MissingPrefix {
        /// Declared prefix.
        expected: String,
    },

    /// The key body has the wrong length.
    #[error("key body length {actual} is not {expected} characters")]
    Length {
        /// Declared length rule.
        expected: LengthRule,
        /// Observed body length.
        actual: usize,
    },

    /// The key body contains a character outside the declared set.
    #[error("key body has a character outside the {charset} set at position {position}")]
    Charset {
        /// Declared character set.
        charset: Charset,
        /// Zero-based character position inside the body.
        position: usize,
    },

    /// The key does not match the declared pattern.
    #[error("key does not match the required pattern")]
    Pattern,
}

/// One rule from the closed set of key shape checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRule {
    /// The key starts with a fixed literal.
    Prefix(String),
    /// The body length satisfies a [`LengthRule`].
    Length(LengthRule),
    /// Every body character belongs to a [`Charset`].
    Charset(Charset),
    /// The whole key matches a [`KeyPattern`].
    Pattern(KeyPattern),
}

impl KeyRule {
    /// Checks the rule against a key and its body.
    ///
    /// `body` is the part of `key` following the format's prefix, or the
    /// whole key when no prefix is declared.
    ///
    /// # Errors
    ///
    /// Returns the [`KeyFormatViolation`] describing the failed check.
    pub fn matches(&self, key: &str, body: &str) -> Result<(), KeyFormatViolation> {
        match self {
            Self::Prefix(prefix) => {
                if key.starts_with(prefix.as_str()) {
                    Ok(())
                } else {
                    Err(KeyFormatViolation::MissingPrefix {
                        expected: prefix.clone(),
                    })
                }
            }
            Self::Length(rule) => {
                let actual = body.chars().count();
                if rule.accepts(actual) {
                    Ok(())
                } else {
                    Err(KeyFormatViolation::Length {
                        expected: *rule,
                        actual,
                    })
                }
            }
            Self::Charset(charset) => body
                .chars()
                .position(|c| !charset.allows(c))
                .map_or(Ok(()), |position| {
                    Err(KeyFormatViolation::Charset {
                        charset: *charset,
                        position,
                    })
                }),
            Self::Pattern(pattern) => {
                if pattern.is_match(key) {
                    Ok(())
                } else {
                    Err(KeyFormatViolation::Pattern)
                }
            }
        }
    }
}

/// Validated, ordered set of key rules for one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyFormat {
    prefix: Option<String>,
    rules: Vec<KeyRule>,
}

impl KeyFormat {
    /// Builds a key format from rules, evaluated in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyKeyPrefix`] for an empty prefix
    /// literal or a second prefix rule, and
    /// [`CatalogDomainError::EmptyLengthRange`] when a range has `min > max`.
    pub fn from_rules(rules: Vec<KeyRule>) -> Result<Self, CatalogDomainError> {
        let mut prefix = None;
        for rule in &rules {
            match rule {
                KeyRule::Prefix(literal) => {
                    if literal.is_empty() || prefix.is_some() {
                        return Err(CatalogDomainError::EmptyKeyPrefix);
                    }
                    prefix = Some(literal.clone());
                }
                KeyRule::Length(LengthRule::Range { min, max }) if min > max => {
                    return Err(CatalogDomainError::EmptyLengthRange {
                        min: *min,
                        max: *max,
                    });
                }
                _ => {}
            }
        }
        Ok(Self { prefix, rules })
    }

    /// Returns the declared prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    /// Checks a key against every rule, stopping at the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`KeyFormatViolation`] encountered.
    pub fn matches(&self, key: &str) -> Result<(), KeyFormatViolation> {
        let body = self
            .prefix
            .as_deref()
            .and_then(|prefix| key.strip_prefix(prefix))
            .unwrap_or(key);
        self.rules.iter().try_for_each(|rule| rule.matches(key, body))
    }
}

/// Serialised shape of a [`KeyFormat`] inside a registry document.
///
/// ```json
/// { "prefix": "sk-", "length": { "exact": 48 }, "charset": "alphanumeric" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyFormatDefinition {
    /// Literal the key must start with.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Length rule for the body after the prefix.
    #[serde(default)]
    pub length: Option<LengthRule>,
    /// Character set for the body after the prefix.
    #[serde(default)]
    pub charset: Option<Charset>,
    /// Regular expression for the whole key.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl TryFrom<KeyFormatDefinition> for KeyFormat {
    type Error = CatalogDomainError;

    fn try_from(definition: KeyFormatDefinition) -> Result<Self, Self::Error> {
        let KeyFormatDefinition {
            prefix,
            length,
            charset,
            pattern,
        } = definition;

        let mut rules = Vec::with_capacity(4);
        if let Some(literal) = prefix {
            rules.push(KeyRule::Prefix(literal));
        }
        if let Some(rule) = length {
            rules.push(KeyRule::Length(rule));
        }
        if let Some(set) = charset {
            rules.push(KeyRule::Charset(set));
        }
        if let Some(source) = pattern {
            rules.push(KeyRule::Pattern(KeyPattern::new(&source)?));
        }
        Self::from_rules(rules)
    }
}

impl From<&KeyFormat> for KeyFormatDefinition {
    fn from(format: &KeyFormat) -> Self {
        let mut definition = Self::default();
        for rule in format.rules() {
            match rule {
                KeyRule::Prefix(literal) => definition.prefix = Some(literal.clone()),
                KeyRule::Length(length) => definition.length = Some(*length),
                KeyRule::Charset(set) => definition.charset = Some(*set),
                KeyRule::Pattern(pattern) => definition.pattern = Some(pattern.as_str().to_owned()),
            }
        }
        definition
    }
}
