//! Diagnostic totals over an aggregation tree

use crate::tree::Model;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign};

/// Number of nodes at every tree level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeCounts {
    /// Input sources (result files)
    pub sources: usize,
    /// Models
    pub models: usize,
    /// Methods
    pub methods: usize,
    /// Propagation mode groups
    pub groups: usize,
    /// Instance collections (one per mode)
    pub instance_collections: usize,
    /// Problem instances
    pub instances: usize,
    /// Recorded runs
    pub runs: usize,
}

impl TreeCounts {
    /// Count the nodes below and including `model`
    #[must_use]
    pub fn of_model(model: &Model) -> Self {
        let mut counts = Self {
            models: 1,
            ..Self::default()
        };
        for method in model.methods() {
            counts.methods += 1;
            for group in method.groups() {
                counts.groups += 1;
                for collection in group.collections() {
                    counts.instance_collections += 1;
                    for instance in collection.instances() {
                        counts.instances += 1;
                        counts.runs += instance.run_count();
                    }
                }
            }
        }
        counts
    }
}

impl Add for TreeCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for TreeCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.sources += rhs.sources;
        self.models += rhs.models;
        self.methods += rhs.methods;
        self.groups += rhs.groups;
        self.instance_collections += rhs.instance_collections;
        self.instances += rhs.instances;
        self.runs += rhs.runs;
    }
}

impl std::iter::Sum for TreeCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for TreeCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} source(s); {} model(s); {} method(s); {} propagation mode group(s); \
             {} instance collection(s); {} instance(s); {} run(s)",
            self.sources,
            self.models,
            self.methods,
            self.groups,
            self.instance_collections,
            self.instances,
            self.runs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_fieldwise() {
        let a = TreeCounts {
            models: 1,
            runs: 3,
            ..TreeCounts::default()
        };
        let b = TreeCounts {
            sources: 1,
            runs: 2,
            ..TreeCounts::default()
        };

        let total = a + b;
        assert_eq!(total.sources, 1);
        assert_eq!(total.models, 1);
        assert_eq!(total.runs, 5);
    }

    #[test]
    fn display() {
        let counts = TreeCounts {
            sources: 1,
            models: 2,
            methods: 3,
            groups: 4,
            instance_collections: 5,
            instances: 6,
            runs: 7,
        };
        assert_eq!(
            counts.to_string(),
            "1 source(s); 2 model(s); 3 method(s); 4 propagation mode group(s); \
             5 instance collection(s); 6 instance(s); 7 run(s)"
        );
    }
}
