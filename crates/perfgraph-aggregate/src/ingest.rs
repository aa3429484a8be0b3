//! Benchmark result documents
//!
//! Reads Google-Benchmark style JSON (`{"benchmarks": [...]}`) and applies
//! the pre-filter that keeps the core from ever seeing both a raw row and
//! its precomputed mean:
//!
//! - rows without a name are dropped
//! - aggregate rows other than `mean` are dropped
//! - raw rows whose name also has a `mean` aggregate are dropped
//! - rows without the value field are dropped

use crate::error::IngestError;
use perfgraph_decode::Rejection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Default throughput field
pub const DEFAULT_VALUE_FIELD: &str = "probes_per_second";

const AGGREGATE_RUN_TYPE: &str = "aggregate";
const MEAN_AGGREGATE: &str = "mean";

/// One named throughput measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Encoded benchmark name
    pub name: String,
    /// Throughput value
    pub value: f64,
}

impl BenchmarkRecord {
    /// Create record
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A benchmark result document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkDocument {
    /// Result rows
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkRow>,
}

/// One row of a result document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkRow {
    /// Full row name (may carry an aggregate suffix)
    #[serde(default)]
    pub name: Option<String>,
    /// Name shared by repetitions and their aggregates
    #[serde(default)]
    pub run_name: Option<String>,
    /// `iteration` or `aggregate`
    #[serde(default)]
    pub run_type: Option<String>,
    /// `mean`, `median`, `stddev`, ... for aggregate rows
    #[serde(default)]
    pub aggregate_name: Option<String>,
    /// Counters and timings
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BenchmarkRow {
    /// Name used for decoding: `run_name`, else `name`
    #[must_use]
    pub fn record_name(&self) -> Option<&str> {
        self.run_name.as_deref().or(self.name.as_deref())
    }

    /// Numeric value of a field
    #[must_use]
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    fn is_aggregate(&self) -> bool {
        self.run_type.as_deref() == Some(AGGREGATE_RUN_TYPE)
    }

    fn is_mean(&self) -> bool {
        self.aggregate_name.as_deref() == Some(MEAN_AGGREGATE)
    }
}

impl BenchmarkDocument {
    /// Parse a document from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a benchmark document
    pub fn from_json_str(json: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| IngestError::io_error(path, e))?;
        let document = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            rows = document.benchmarks.len(),
            "Loaded benchmark document"
        );
        Ok(document)
    }

    /// Records that survive the pre-filter, in document order
    pub fn records(&self, value_field: &str, tally: &mut RejectionTally) -> Vec<BenchmarkRecord> {
        let mean_names: HashSet<&str> = self
            .benchmarks
            .iter()
            .filter(|row| row.is_aggregate() && row.is_mean())
            .filter_map(BenchmarkRow::record_name)
            .collect();

        let mut records = Vec::with_capacity(self.benchmarks.len());
        for row in &self.benchmarks {
            let Some(name) = row.record_name() else {
                tally.missing_name += 1;
                continue;
            };

            if row.is_aggregate() {
                if !row.is_mean() {
                    tally.non_mean_aggregate += 1;
                    continue;
                }
            } else if mean_names.contains(name) {
                tally.shadowed_by_mean += 1;
                continue;
            }

            let Some(value) = row.value(value_field) else {
                tracing::debug!(name, field = value_field, "Row has no value");
                tally.missing_value += 1;
                continue;
            };

            records.push(BenchmarkRecord::new(name, value));
        }
        records
    }
}

/// Why records were left out, per reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionTally {
    /// Rows without `run_name` or `name`
    pub missing_name: usize,
    /// Aggregate rows other than `mean`
    pub non_mean_aggregate: usize,
    /// Raw rows replaced by their `mean` aggregate
    pub shadowed_by_mean: usize,
    /// Rows without the value field
    pub missing_value: usize,
    /// Names the decoder could not take apart
    pub malformed_name: usize,
    /// Rows of models marked `ignore`
    pub ignored_model: usize,
}

impl RejectionTally {
    /// Count a decoder rejection
    pub fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::IgnoredModel { .. } => self.ignored_model += 1,
            Rejection::TooFewSegments { .. }
            | Rejection::EmptySegment { .. }
            | Rejection::NonNumericArgument { .. }
            | Rejection::ModePositionOutOfRange { .. } => self.malformed_name += 1,
        }
    }

    /// Total number of rejected rows
    #[must_use]
    pub fn total(&self) -> usize {
        self.missing_name
            + self.non_mean_aggregate
            + self.shadowed_by_mean
            + self.missing_value
            + self.malformed_name
            + self.ignored_model
    }
}
