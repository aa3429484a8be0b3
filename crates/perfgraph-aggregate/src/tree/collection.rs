//! Series of one propagation mode

use super::{merge_child, merge_children, Instance, Merge};
use crate::error::{MergeError, NodeKind};
use crate::project::Series;
use perfgraph_decode::PropagationMode;
use std::collections::BTreeMap;

/// Problem instances measured under one propagation mode
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceCollection {
    propagation_mode: PropagationMode,
    instances: BTreeMap<i64, Instance>,
}

impl InstanceCollection {
    /// Create collection holding its first instance
    #[must_use]
    pub fn new(propagation_mode: PropagationMode, instance: Instance) -> Self {
        let mut instances = BTreeMap::new();
        instances.insert(instance.problem_instance(), instance);
        Self {
            propagation_mode,
            instances,
        }
    }

    /// Propagation mode of this series
    #[inline]
    #[must_use]
    pub fn propagation_mode(&self) -> PropagationMode {
        self.propagation_mode
    }

    /// Instance for a problem size
    #[inline]
    #[must_use]
    pub fn instance(&self, problem_instance: i64) -> Option<&Instance> {
        self.instances.get(&problem_instance)
    }

    /// Instances in ascending problem-instance order
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Number of instances
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if no instance is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Add an instance, merging with an existing one of the same size
    ///
    /// # Errors
    /// Propagates [`MergeError`] from the instance level
    pub fn add_instance(&mut self, instance: Instance) -> Result<(), MergeError> {
        merge_child(&mut self.instances, instance)
    }

    /// Sorted problem instances with their averaged values
    #[must_use]
    pub fn results(&self) -> Series {
        self.instances
            .values()
            .map(|instance| (instance.problem_instance(), instance.mean()))
            .collect()
    }
}

impl Merge for InstanceCollection {
    type Key = PropagationMode;

    const KIND: NodeKind = NodeKind::Collection;

    fn key(&self) -> &PropagationMode {
        &self.propagation_mode
    }

    fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        MergeError::check_key(Self::KIND, &self.propagation_mode, &other.propagation_mode)?;
        merge_children(&mut self.instances, other.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(mode: i64, runs: &[(i64, f64)]) -> InstanceCollection {
        let mut iter = runs.iter();
        let (first_instance, first_run) = iter.next().copied().unwrap();
        let mut collection = InstanceCollection::new(
            PropagationMode::new(mode),
            Instance::new(first_instance, first_run),
        );
        for &(instance, run) in iter {
            collection.add_instance(Instance::new(instance, run)).unwrap();
        }
        collection
    }

    #[test]
    fn results_are_sorted_and_averaged() {
        let collection = collection(1, &[(100, 5000.0), (50, 9000.0), (100, 7000.0)]);
        let series = collection.results();

        assert_eq!(series.x_values, vec![50, 100]);
        assert_eq!(series.y_values, vec![9000.0, 6000.0]);
    }

    #[test]
    fn merge_combines_instances() {
        let mut a = collection(1, &[(50, 1.0)]);
        let b = collection(1, &[(50, 3.0), (100, 4.0)]);

        a.merge(b).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.instance(50).unwrap().runs(), &[1.0, 3.0]);
    }

    #[test]
    fn merge_rejects_other_mode() {
        let mut holding_one = collection(1, &[(50, 1.0)]);
        let result = holding_one.merge(collection(0, &[(50, 1.0)]));

        assert_eq!(
            result,
            Err(MergeError::KeyMismatch {
                kind: NodeKind::Collection,
                expected: "1".to_string(),
                found: "0".to_string(),
            })
        );
    }
}
