//! Error types for the decode layer
//!
//! Two very different things live here:
//! - [`Rejection`]: a benchmark name that cannot be decoded. Recoverable; the
//!   record is simply left out of the aggregate.
//! - [`SettingsError`]: the settings bundle itself could not be loaded.

use std::path::PathBuf;

/// Why a benchmark name was excluded from aggregation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Not enough segments after the model to carry a mode and an instance
    #[error("'{name}': expected a method and at least two arguments, found {found} segment(s)")]
    TooFewSegments {
        /// Raw benchmark name
        name: String,
        /// Segments found after the model name
        found: usize,
    },

    /// Model or method segment is empty
    #[error("'{name}': empty model or method segment")]
    EmptySegment {
        /// Raw benchmark name
        name: String,
    },

    /// An argument segment is not an integer
    #[error("'{name}': argument '{segment}' is not an integer")]
    NonNumericArgument {
        /// Raw benchmark name
        name: String,
        /// Offending segment
        segment: String,
    },

    /// The `PROPAGATION_MODE` sentinel points past the argument list
    #[error("'{name}': propagation mode position {position} is outside {arguments} argument(s)")]
    ModePositionOutOfRange {
        /// Raw benchmark name
        name: String,
        /// Configured sentinel position
        position: usize,
        /// Number of decoded arguments
        arguments: usize,
    },

    /// Model is marked `ignore` in the settings
    #[error("model '{model}' is ignored by settings")]
    IgnoredModel {
        /// Model name
        model: String,
    },
}

/// Errors while loading the settings bundle
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("io error reading settings {path}: {source}")]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings are not valid JSON or have the wrong shape
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl SettingsError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_display() {
        let rejection = Rejection::TooFewSegments {
            name: "Tree/Lookup/abc".to_string(),
            found: 2,
        };
        assert_eq!(
            rejection.to_string(),
            "'Tree/Lookup/abc': expected a method and at least two arguments, found 2 segment(s)"
        );
    }

    #[test]
    fn settings_error_display() {
        let err = SettingsError::io_error(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SettingsError = json_err.into();
        assert!(matches!(err, SettingsError::Json(_)));
    }
}
