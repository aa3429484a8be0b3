//! Leaf level: repeated runs of one problem instance

use super::Merge;
use crate::error::{MergeError, NodeKind};

/// Runs measured for one problem instance
///
/// Never empty: an instance is created from its first run and only grows.
/// Runs are kept in ascending order, so the mean is the same float for any
/// arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    problem_instance: i64,
    runs: Vec<f64>,
}

impl Instance {
    /// Create instance holding a single run
    #[inline]
    #[must_use]
    pub fn new(problem_instance: i64, run: f64) -> Self {
        Self {
            problem_instance,
            runs: vec![run],
        }
    }

    /// Problem instance (x axis value)
    #[inline]
    #[must_use]
    pub fn problem_instance(&self) -> i64 {
        self.problem_instance
    }

    /// Recorded runs, ascending
    #[inline]
    #[must_use]
    pub fn runs(&self) -> &[f64] {
        &self.runs
    }

    /// Number of runs
    #[inline]
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Record one more run
    pub fn add_run(&mut self, run: f64) {
        let at = self.runs.partition_point(|r| r.total_cmp(&run).is_le());
        self.runs.insert(at, run);
    }

    /// Arithmetic mean of the runs
    ///
    /// A single run is returned as is.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        match self.runs.as_slice() {
            [single] => *single,
            runs => runs.iter().sum::<f64>() / runs.len() as f64,
        }
    }
}

impl Merge for Instance {
    type Key = i64;

    const KIND: NodeKind = NodeKind::Instance;

    fn key(&self) -> &i64 {
        &self.problem_instance
    }

    fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        MergeError::check_key(Self::KIND, &self.problem_instance, &other.problem_instance)?;
        for run in other.runs {
            self.add_run(run);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_two_runs() {
        let mut instance = Instance::new(100, 5000.0);
        instance.add_run(7000.0);
        assert_eq!(instance.mean(), 6000.0);
    }

    #[test]
    fn single_run_is_returned_exactly() {
        let instance = Instance::new(100, 4200.5);
        assert_eq!(instance.mean().to_bits(), 4200.5f64.to_bits());
    }

    #[test]
    fn merge_concatenates_runs() {
        let mut a = Instance::new(100, 3.0);
        a.add_run(1.0);
        let mut b = Instance::new(100, 2.0);
        b.add_run(2.0);

        a.merge(b).unwrap();
        assert_eq!(a.runs(), &[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(a.run_count(), 4);
    }

    #[test]
    fn merge_rejects_other_instance() {
        let mut a = Instance::new(100, 1.0);
        let result = a.merge(Instance::new(50, 1.0));

        assert!(matches!(
            result,
            Err(MergeError::KeyMismatch {
                kind: NodeKind::Instance,
                ..
            })
        ));
        assert_eq!(a.runs(), &[1.0]);
    }

    #[test]
    fn mean_is_order_independent() {
        let runs = [0.1, 0.2, 0.3, 1e16, -1e16];

        let mut forward = Instance::new(1, runs[0]);
        runs[1..].iter().for_each(|r| forward.add_run(*r));
        let mut backward = Instance::new(1, runs[4]);
        runs[..4].iter().rev().for_each(|r| backward.add_run(*r));

        assert_eq!(forward.mean().to_bits(), backward.mean().to_bits());
    }
}
