//! Tree roots: one input source, and several named sources
//!
//! [`ModelCollection::insert`] builds a one-path [`Model`] for the record and
//! merges it in, so building from scratch and combining independently built
//! aggregates are the same operation.

use crate::counts::TreeCounts;
use crate::error::MergeError;
use crate::ingest::{BenchmarkRecord, RejectionTally};
use crate::tree::{merge_child, merge_children, Model};
use indexmap::map::Entry;
use indexmap::IndexMap;
use perfgraph_decode::{DecodedName, ModelSettings, NameDecoder};
use std::collections::BTreeMap;

/// All models aggregated from one source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCollection {
    models: BTreeMap<String, Model>,
}

impl ModelCollection {
    /// Create empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records
    ///
    /// # Errors
    /// Returns [`MergeError`] on the first structural violation
    pub fn from_records<I>(
        records: I,
        decoder: &NameDecoder<'_>,
        tally: &mut RejectionTally,
    ) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = BenchmarkRecord>,
    {
        let mut collection = Self::new();
        collection.extend_records(records, decoder, tally)?;
        Ok(collection)
    }

    /// Record one run of a decoded benchmark
    ///
    /// # Errors
    /// Returns [`MergeError`] if the record's keys clash with the tree
    pub fn insert(
        &mut self,
        decoded: &DecodedName,
        settings: &ModelSettings,
        run: f64,
    ) -> Result<(), MergeError> {
        self.add_model(Model::singleton(decoded, settings, run))
    }

    /// Decode and insert records, counting the ones the decoder rejects
    ///
    /// Returns the number of inserted records.
    ///
    /// # Errors
    /// Returns [`MergeError`] on the first structural violation
    pub fn extend_records<I>(
        &mut self,
        records: I,
        decoder: &NameDecoder<'_>,
        tally: &mut RejectionTally,
    ) -> Result<usize, MergeError>
    where
        I: IntoIterator<Item = BenchmarkRecord>,
    {
        let mut inserted = 0;
        for record in records {
            let decoded = match decoder.decode(&record.name) {
                Ok(decoded) => decoded,
                Err(rejection) => {
                    tracing::debug!(%rejection, "Rejected record");
                    tally.record(&rejection);
                    continue;
                }
            };

            tracing::debug!(
                model = decoded.model(),
                instance = decoded.problem_instance(),
                mode = %decoded.propagation_mode(),
                value = record.value,
                "Recorded run"
            );
            let settings = decoder.settings().model_or_default(decoded.model());
            self.insert(&decoded, settings, record.value)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Add a model, merging with an existing one of the same name
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn add_model(&mut self, model: Model) -> Result<(), MergeError> {
        merge_child(&mut self.models, model)
    }

    /// Merge another collection into this one
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn merge(&mut self, other: ModelCollection) -> Result<(), MergeError> {
        merge_children(&mut self.models, other.models)
    }

    /// Model by raw name
    #[inline]
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Models in name order
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Number of models
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if no model is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// `model` followed by the models of its `compare` list present here
    #[must_use]
    pub fn models_to_compare<'a>(&'a self, model: &'a Model) -> Vec<&'a Model> {
        let mut compared = vec![model];
        for name in &model.settings().compare {
            if let Some(other) = self.models.get(name) {
                if compared.iter().all(|m| m.name() != other.name()) {
                    compared.push(other);
                }
            }
        }
        compared
    }

    /// Node totals
    #[must_use]
    pub fn counts(&self) -> TreeCounts {
        self.models.values().map(TreeCounts::of_model).sum()
    }
}

/// Model collections keyed by source (usually the input file)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemCollection {
    sources: IndexMap<String, ModelCollection>,
}

impl ProblemCollection {
    /// Create empty problem collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, merging with an existing one of the same name
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        collection: ModelCollection,
    ) -> Result<(), MergeError> {
        match self.sources.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(collection);
                Ok(())
            }
            Entry::Occupied(mut slot) => slot.get_mut().merge(collection),
        }
    }

    /// Sources in insertion order
    pub fn sources(&self) -> impl Iterator<Item = (&str, &ModelCollection)> {
        self.sources.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Take the sources, in insertion order
    pub fn into_sources(self) -> impl Iterator<Item = (String, ModelCollection)> {
        self.sources.into_iter()
    }

    /// Number of sources
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if no source is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fold every source into a single collection
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn into_merged(self) -> Result<ModelCollection, MergeError> {
        let mut merged = ModelCollection::new();
        for collection in self.sources.into_values() {
            merged.merge(collection)?;
        }
        Ok(merged)
    }

    /// Node totals, including the number of sources
    #[must_use]
    pub fn counts(&self) -> TreeCounts {
        let mut counts: TreeCounts = self.sources.values().map(ModelCollection::counts).sum();
        counts.sources = self.sources.len();
        counts
    }
}
