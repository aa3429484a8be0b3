//! Loading inputs into aggregation trees

use anyhow::{Context, Result};
use perfgraph_aggregate::{
    BenchmarkDocument, ModelCollection, ProblemCollection, RejectionTally, TreeCounts,
};
use perfgraph_decode::{NameDecoder, Settings};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Label of the collection produced by `--merge-inputs`
pub const MERGED_SOURCE: &str = "merged";

/// Load the settings file, or defaults when none is given
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        tracing::debug!("No settings file, using defaults");
        return Ok(Settings::default());
    };
    Settings::load(path).with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Aggregated inputs with the rows left out along the way
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    /// One collection per input file
    pub problems: ProblemCollection,
    /// Rows left out, per reason
    pub rejections: RejectionTally,
}

/// Counts report
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountsReport {
    /// Tree totals
    pub counts: TreeCounts,
    /// Rows left out, per reason
    pub rejections: RejectionTally,
}

impl Loaded {
    /// Counts report of everything loaded
    #[must_use]
    pub fn report(&self) -> CountsReport {
        CountsReport {
            counts: self.problems.counts(),
            rejections: self.rejections,
        }
    }

    /// Collections to present: one per input, or a single merged one
    ///
    /// # Errors
    /// Returns error if merging the inputs hits a structural violation
    pub fn into_collections(self, merge: bool) -> Result<Vec<(String, ModelCollection)>> {
        if merge {
            let merged = self
                .problems
                .into_merged()
                .context("failed to merge input files")?;
            Ok(vec![(MERGED_SOURCE.to_string(), merged)])
        } else {
            Ok(self.problems.into_sources().collect())
        }
    }
}

/// Load, filter, decode and aggregate every input file
///
/// # Errors
/// Returns error if a file cannot be loaded or its records violate the
/// tree structure
pub fn load_inputs(inputs: &[PathBuf], settings: &Settings, value_field: &str) -> Result<Loaded> {
    let decoder = NameDecoder::new(settings);
    let mut loaded = Loaded::default();

    for path in inputs {
        let document = BenchmarkDocument::load(path)
            .with_context(|| format!("failed to load benchmark results from {}", path.display()))?;
        let records = document.records(value_field, &mut loaded.rejections);
        if records.is_empty() {
            tracing::warn!(
                path = %path.display(),
                field = value_field,
                rows = document.benchmarks.len(),
                "No usable benchmark rows"
            );
        }

        let collection = ModelCollection::from_records(records, &decoder, &mut loaded.rejections)
            .with_context(|| format!("failed to aggregate {}", path.display()))?;
        loaded
            .problems
            .add_source(path.display().to_string(), collection)
            .with_context(|| format!("failed to aggregate {}", path.display()))?;
    }

    tracing::info!("Retrieved and loaded {} json file(s)", inputs.len());
    tracing::info!("Parsed: {}", loaded.problems.counts());
    if loaded.rejections.total() > 0 {
        tracing::info!(
            rejected = loaded.rejections.total(),
            malformed = loaded.rejections.malformed_name,
            ignored = loaded.rejections.ignored_model,
            "Left out benchmark rows"
        );
    }
    Ok(loaded)
}
