//! Propagation modes and their display vocabulary

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Decoded propagation-mode selector
///
/// Kept as the raw integer: values outside the configured vocabulary are
/// preserved rather than rejected, they just have no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropagationMode(i64);

impl PropagationMode {
    /// Wrap a raw mode value
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw mode value
    #[inline]
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Position in the vocabulary, if the value is non-negative
    #[inline]
    #[must_use]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Display for PropagationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Labels for propagation modes, indexed by mode value
///
/// The default vocabulary is input-to-output, output-to-input, and
/// output-to-input with static or ad-hoc marking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeVocabulary(Vec<String>);

impl ModeVocabulary {
    /// Create vocabulary from labels
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// Label for a mode, `None` when out of range
    #[must_use]
    pub fn label(&self, mode: PropagationMode) -> Option<&str> {
        mode.index()
            .and_then(|i| self.0.get(i))
            .map(String::as_str)
    }

    /// Label for a mode, falling back to the raw value
    #[must_use]
    pub fn label_or_value(&self, mode: PropagationMode) -> String {
        self.label(mode)
            .map_or_else(|| mode.to_string(), str::to_string)
    }

    /// Number of known modes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no mode is labeled
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ModeVocabulary {
    fn default() -> Self {
        Self(
            ["i2o", "o2i", "o2i - static", "o2i - ad-hoc"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        )
    }
}
