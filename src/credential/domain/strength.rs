//! Informational key strength scoring.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key length at which the length component saturates.
const LENGTH_SATURATION: f64 = 64.0;
/// Total entropy, in bits, at which the entropy component saturates.
const ENTROPY_SATURATION_BITS: f64 = 128.0;
const LENGTH_WEIGHT: f64 = 40.0;
const DIVERSITY_WEIGHT: f64 = 30.0;
const ENTROPY_WEIGHT: f64 = 30.0;
const CHARACTER_CLASSES: f64 = 4.0;

/// Strength score between 0 and 100.
///
/// Scores are a user-experience signal only; no operation refuses a key
/// because of a low score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyStrength(u8);

/// Coarse bucket of a [`KeyStrength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    /// Below 40.
    Weak,
    /// 40 to 64.
    Fair,
    /// 65 to 84.
    Strong,
    /// 85 and above.
    Excellent,
}

impl KeyStrength {
    /// Returns the numeric score.
    #[must_use]
    pub const fn score(self) -> u8 {
        self.0
    }

    /// Returns the coarse bucket for the score.
    #[must_use]
    pub const fn label(self) -> StrengthLabel {
        match self.0 {
            0..=39 => StrengthLabel::Weak,
            40..=64 => StrengthLabel::Fair,
            65..=84 => StrengthLabel::Strong,
            _ => StrengthLabel::Excellent,
        }
    }
}

impl fmt::Display for KeyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scores a key from its length, character-class diversity and Shannon
/// entropy estimate.
///
/// Length contributes up to 40 points (saturating at 64 characters), the
/// number of classes present among lowercase, uppercase, digits and symbols
/// up to 30, and total entropy up to 30 (saturating at 128 bits). The result
/// is deterministic for a given input.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "entropy estimation is inherently fractional; the result is clamped to 0..=100"
)]
#[must_use]
pub fn calculate_key_strength(raw_key: &str) -> KeyStrength {
    let length = raw_key.chars().count();
    if length == 0 {
        return KeyStrength(0);
    }
    let length_f = length as f64;

    let length_score = (length_f / LENGTH_SATURATION).min(1.0) * LENGTH_WEIGHT;

    let classes = [
        raw_key.chars().any(|c| c.is_lowercase()),
        raw_key.chars().any(|c| c.is_uppercase()),
        raw_key.chars().any(|c| c.is_numeric()),
        raw_key.chars().any(|c| !c.is_alphanumeric()),
    ];
    let present = classes.iter().filter(|&&found| found).count() as f64;
    let diversity_score = present / CHARACTER_CLASSES * DIVERSITY_WEIGHT;

    let mut frequencies: HashMap<char, usize> = HashMap::new();
    for c in raw_key.chars() {
        *frequencies.entry(c).or_default() += 1;
    }
    let bits_per_char: f64 = frequencies
        .values()
        .map(|&count| {
            let p = count as f64 / length_f;
            -p * p.log2()
        })
        .sum();
    let entropy_score =
        (bits_per_char * length_f / ENTROPY_SATURATION_BITS).min(1.0) * ENTROPY_WEIGHT;

    let total = (length_score + diversity_score + entropy_score).round();
    KeyStrength(total.clamp(0.0, 100.0) as u8)
}
