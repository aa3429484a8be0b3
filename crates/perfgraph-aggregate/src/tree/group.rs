//! Series sharing a grouping identifier

use super::{merge_child, merge_children, InstanceCollection, Merge};
use crate::error::{MergeError, NodeKind};
use perfgraph_decode::{ArgumentLayout, PropagationMode};
use std::collections::BTreeMap;

/// Series of one method and parameter set, one per propagation mode
///
/// Keeps a representative argument list for labeling. Members of a group
/// differ only in the mode and instance positions; the smallest list seen is
/// kept so the choice does not depend on arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationModeGroup {
    identifier: String,
    arguments: Vec<i64>,
    layout: ArgumentLayout,
    collections: BTreeMap<PropagationMode, InstanceCollection>,
}

impl PropagationModeGroup {
    /// Create group holding its first series
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        arguments: Vec<i64>,
        layout: ArgumentLayout,
        collection: InstanceCollection,
    ) -> Self {
        let mut collections = BTreeMap::new();
        collections.insert(collection.propagation_mode(), collection);
        Self {
            identifier: identifier.into(),
            arguments,
            layout,
            collections,
        }
    }

    /// Grouping identifier (`method/free/arguments`)
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Identifier without the leading method name
    ///
    /// Used to match groups across models whose method names differ.
    #[must_use]
    pub fn parameters(&self) -> &str {
        self.identifier
            .split_once('/')
            .map_or("", |(_, parameters)| parameters)
    }

    /// Representative argument list
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &[i64] {
        &self.arguments
    }

    /// Positions of mode and instance in [`arguments`](Self::arguments)
    #[inline]
    #[must_use]
    pub fn layout(&self) -> ArgumentLayout {
        self.layout
    }

    /// Series for a propagation mode
    #[inline]
    #[must_use]
    pub fn collection(&self, mode: PropagationMode) -> Option<&InstanceCollection> {
        self.collections.get(&mode)
    }

    /// Series in ascending mode order
    pub fn collections(&self) -> impl Iterator<Item = &InstanceCollection> {
        self.collections.values()
    }

    /// Propagation modes present, ascending
    pub fn propagation_modes(&self) -> impl Iterator<Item = PropagationMode> + '_ {
        self.collections.keys().copied()
    }

    /// Add a series, merging with an existing one of the same mode
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn add_collection(&mut self, collection: InstanceCollection) -> Result<(), MergeError> {
        merge_child(&mut self.collections, collection)
    }
}

impl Merge for PropagationModeGroup {
    type Key = String;

    const KIND: NodeKind = NodeKind::Group;

    fn key(&self) -> &String {
        &self.identifier
    }

    fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        MergeError::check_key(Self::KIND, self.identifier.as_str(), other.identifier.as_str())?;
        if (&other.arguments, other.layout) < (&self.arguments, self.layout) {
            self.arguments = other.arguments;
            self.layout = other.layout;
        }
        merge_children(&mut self.collections, other.collections)
    }
}
