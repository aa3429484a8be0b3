//! perfgraph Decode Layer
//!
//! Recovers structure from slash-delimited benchmark names.
//!
//! # Core Concepts
//!
//! - [`NameDecoder`]: Splits `<model>/<method>/<arg_0>/.../<arg_k>` into typed parts
//! - [`DecodedName`]: Model, method, grouping identifier, propagation mode and problem instance
//! - [`ArgumentLayout`]: Which argument positions carry the mode and the instance
//! - [`Settings`] / [`ModelSettings`]: Per-model configuration bundle
//! - [`label_arguments`]: Human-readable labels for positional arguments
//!
//! # Example
//!
//! ```rust
//! use perfgraph_decode::{NameDecoder, Settings};
//!
//! let settings = Settings::default();
//! let decoder = NameDecoder::new(&settings);
//!
//! let decoded = decoder.decode("Tree/Lookup/0/1/100").unwrap();
//! assert_eq!(decoded.identifier(), "Lookup/0");
//! assert_eq!(decoded.propagation_mode().value(), 1);
//! assert_eq!(decoded.problem_instance(), 100);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod error;
mod labels;
mod mode;
mod name;
mod settings;

// Re-exports
pub use error::{Rejection, SettingsError};
pub use labels::{label_arguments, LabeledArgument};
pub use mode::{ModeVocabulary, PropagationMode};
pub use name::{ArgumentLayout, DecodedName, NameDecoder};
pub use settings::{ArgumentSlot, ModelSettings, Settings};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
