//! Error types for aggregation
//!
//! - [`MergeError`]: structural violation while merging two subtrees. Fatal
//!   for the aggregation pass: it means two different series were about to be
//!   conflated.
//! - [`IngestError`]: a benchmark result document could not be read.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Level of the aggregation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Model (benchmark fixture)
    Model,
    /// Method of a model
    Method,
    /// Group of series sharing an identifier
    Group,
    /// Series of one propagation mode
    Collection,
    /// Runs of one problem instance
    Instance,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Model => "model",
            Self::Method => "method",
            Self::Group => "propagation mode group",
            Self::Collection => "instance collection",
            Self::Instance => "instance",
        };
        f.write_str(name)
    }
}

/// Structural violation during merge
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Two nodes of the same level with different keys
    #[error("{kind} key mismatch: cannot merge '{found}' into '{expected}'")]
    KeyMismatch {
        /// Level where the mismatch happened
        kind: NodeKind,
        /// Key of the receiving node
        expected: String,
        /// Key of the incoming node
        found: String,
    },

    /// Two nodes of different levels
    #[error("cannot merge {found} node into {expected} node")]
    KindMismatch {
        /// Level of the receiving node
        expected: NodeKind,
        /// Level of the incoming node
        found: NodeKind,
    },

    /// Two trees of the same model built under different settings
    #[error("model '{model}' was aggregated under different settings")]
    SettingsMismatch {
        /// Model name
        model: String,
    },
}

impl MergeError {
    /// Fail unless both keys are equal
    ///
    /// # Errors
    /// Returns [`MergeError::KeyMismatch`] when `expected != found`
    pub fn check_key<K>(kind: NodeKind, expected: &K, found: &K) -> Result<(), Self>
    where
        K: PartialEq + Display + ?Sized,
    {
        if expected == found {
            Ok(())
        } else {
            Err(Self::KeyMismatch {
                kind,
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }
}

/// Errors while reading benchmark result documents
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Result file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Result file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Result document is not valid JSON
    #[error("invalid benchmark document: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
