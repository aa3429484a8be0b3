//! perfgraph Aggregation Layer
//!
//! Merges decoded benchmark runs into a five-level tree and projects it into
//! renderer-neutral figures.
//!
//! # Core Concepts
//!
//! - [`BenchmarkDocument`]: Benchmark result JSON and its pre-filter
//! - [`ModelCollection`]: Aggregated models of one source
//! - [`ProblemCollection`]: Aggregates of several sources, mergeable into one
//! - [`Merge`]: Key-checked recursive merge shared by every tree level
//! - [`TreeNode`]: Any tree node, merged through one entry point
//! - [`TreeCounts`]: Node totals for diagnostics
//! - [`Projector`]: Figures with one series per propagation mode or compared model
//! - [`chunk_messages`]: Code-fenced text chunks of a summary report
//!
//! # Example
//!
//! ```rust
//! use perfgraph_aggregate::{BenchmarkRecord, ModelCollection, Projector, RejectionTally};
//! use perfgraph_decode::{NameDecoder, Settings};
//!
//! let settings = Settings::default();
//! let decoder = NameDecoder::new(&settings);
//! let mut tally = RejectionTally::default();
//!
//! let records = vec![
//!     BenchmarkRecord::new("Tree/Lookup/0/1/100", 5000.0),
//!     BenchmarkRecord::new("Tree/Lookup/0/1/100", 7000.0),
//!     BenchmarkRecord::new("Tree/Lookup/abc", 1.0),
//! ];
//! let models = ModelCollection::from_records(records, &decoder, &mut tally).unwrap();
//! assert_eq!(tally.malformed_name, 1);
//!
//! let figures = Projector::new(&settings).figures(&models);
//! assert_eq!(figures[0].plots[0].series.y_values, vec![6000.0]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod collections;
mod counts;
mod error;
mod ingest;
mod tree;

// Presentation
mod project;
mod report;

// Re-exports
pub use collections::{ModelCollection, ProblemCollection};
pub use counts::TreeCounts;
pub use error::{IngestError, MergeError, NodeKind};
pub use ingest::{
    BenchmarkDocument, BenchmarkRecord, BenchmarkRow, RejectionTally, DEFAULT_VALUE_FIELD,
};
pub use project::{
    linestyle, marker, title, xlabel, Figure, Plot, Projector, Series, DEFAULT_XLABEL,
    THROUGHPUT_LABEL,
};
pub use report::{chunk_messages, summary_lines, DEFAULT_MAX_MESSAGE_LEN};
pub use tree::{Instance, InstanceCollection, Merge, Method, Model, PropagationModeGroup, TreeNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
