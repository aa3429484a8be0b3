//! Benchmarked method of a model

use super::{merge_child, merge_children, Merge, PropagationModeGroup};
use crate::error::{MergeError, NodeKind};
use std::collections::BTreeMap;

/// One benchmarked method and its groups
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    groups: BTreeMap<String, PropagationModeGroup>,
}

impl Method {
    /// Create method holding its first group
    #[must_use]
    pub fn new(name: impl Into<String>, group: PropagationModeGroup) -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(group.identifier().to_string(), group);
        Self {
            name: name.into(),
            groups,
        }
    }

    /// Raw method name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group by identifier
    #[inline]
    #[must_use]
    pub fn group(&self, identifier: &str) -> Option<&PropagationModeGroup> {
        self.groups.get(identifier)
    }

    /// Group whose free parameters match, regardless of method name
    #[must_use]
    pub fn group_with_parameters(&self, parameters: &str) -> Option<&PropagationModeGroup> {
        self.groups.values().find(|g| g.parameters() == parameters)
    }

    /// Groups in identifier order
    pub fn groups(&self) -> impl Iterator<Item = &PropagationModeGroup> {
        self.groups.values()
    }

    /// Add a group, merging with an existing one of the same identifier
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn add_group(&mut self, group: PropagationModeGroup) -> Result<(), MergeError> {
        merge_child(&mut self.groups, group)
    }
}

impl Merge for Method {
    type Key = String;

    const KIND: NodeKind = NodeKind::Method;

    fn key(&self) -> &String {
        &self.name
    }

    fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        MergeError::check_key(Self::KIND, self.name.as_str(), other.name.as_str())?;
        merge_children(&mut self.groups, other.groups)
    }
}
