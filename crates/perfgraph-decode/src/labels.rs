//! Positional argument labels
//!
//! Display only. Labels never take part in the grouping identifier.

use crate::settings::ArgumentSlot;
use std::fmt::{self, Display, Formatter};

/// One argument with its optional display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledArgument {
    /// Position in the decoded argument list
    pub position: usize,
    /// Configured label, `None` renders the bare value
    pub label: Option<String>,
    /// Argument value
    pub value: i64,
}

impl LabeledArgument {
    /// `(label, value)` pair
    #[inline]
    #[must_use]
    pub fn as_pair(&self) -> (Option<&str>, i64) {
        (self.label.as_deref(), self.value)
    }
}

impl Display for LabeledArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Label `arguments` according to `order`
///
/// Positions marked `IGNORE` or `PROPAGATION_MODE` are dropped. Positions
/// past the end of `order` are kept unlabeled.
#[must_use]
pub fn label_arguments(order: &[ArgumentSlot], arguments: &[i64]) -> Vec<LabeledArgument> {
    arguments
        .iter()
        .enumerate()
        .filter_map(|(position, &value)| match order.get(position) {
            Some(slot) if slot.is_hidden() => None,
            Some(slot) => Some(LabeledArgument {
                position,
                label: slot.label().map(str::to_string),
                value,
            }),
            None => Some(LabeledArgument {
                position,
                label: None,
                value,
            }),
        })
        .collect()
}
