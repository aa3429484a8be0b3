//! Per-model settings bundle
//!
//! The settings file is a JSON object keyed by model name:
//!
//! ```json
//! {
//!   "$propagation_modes": ["i2o", "o2i", "o2i - static", "o2i - ad-hoc"],
//!   "LinearTree": {
//!     "argument_order": ["IGNORE", "PROPAGATION_MODE", "tree height"],
//!     "model_name": "Linear tree",
//!     "method_name": { "probe_single": "single probe" },
//!     "compare": ["ElementTree"],
//!     "yscale": "log",
//!     "group": 1,
//!     "show_y_values": true
//!   }
//! }
//! ```
//!
//! Every key is optional; missing models get [`ModelSettings::default`].

use crate::error::SettingsError;
use crate::mode::ModeVocabulary;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const IGNORE: &str = "IGNORE";
const PROPAGATION_MODE: &str = "PROPAGATION_MODE";

/// One entry of a model's `argument_order`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentSlot {
    /// `"IGNORE"`: position is hidden from labels
    Ignore,
    /// `"PROPAGATION_MODE"`: position carries the propagation mode
    PropagationMode,
    /// Any other string: display label for the position
    Label(String),
}

impl ArgumentSlot {
    /// Check if this slot is the propagation-mode sentinel
    #[inline]
    #[must_use]
    pub fn is_propagation_mode(&self) -> bool {
        matches!(self, Self::PropagationMode)
    }

    /// Check if this slot is excluded from labels
    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Ignore | Self::PropagationMode)
    }

    /// Display label, if any
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl From<String> for ArgumentSlot {
    fn from(value: String) -> Self {
        match value.as_str() {
            IGNORE => Self::Ignore,
            PROPAGATION_MODE => Self::PropagationMode,
            _ => Self::Label(value),
        }
    }
}

impl From<&str> for ArgumentSlot {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ArgumentSlot> for String {
    fn from(slot: ArgumentSlot) -> Self {
        match slot {
            ArgumentSlot::Ignore => IGNORE.to_string(),
            ArgumentSlot::PropagationMode => PROPAGATION_MODE.to_string(),
            ArgumentSlot::Label(label) => label,
        }
    }
}

/// Settings for one model
///
/// Opaque to aggregation: only [`argument_order`](Self::argument_order) and
/// [`ignore`](Self::ignore) influence decoding, the rest is presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Positional labels and sentinels
    pub argument_order: Vec<ArgumentSlot>,
    /// Pretty model name
    pub model_name: Option<String>,
    /// Legend label (falls back to the pretty name)
    pub label: Option<String>,
    /// Raw method name → pretty method name
    pub method_name: IndexMap<String, String>,
    /// Models plotted together with this one
    pub compare: Vec<String>,
    /// Y axis scale understood by the renderer
    pub yscale: String,
    /// Ordering group for figures
    pub group: i64,
    /// Annotate points with their values
    pub show_y_values: bool,
    /// Drop every record of this model
    pub ignore: bool,
}

impl ModelSettings {
    /// Pretty name for a raw model name
    #[must_use]
    pub fn pretty_model_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.model_name.as_deref().unwrap_or(raw)
    }

    /// Legend label for a raw model name
    #[must_use]
    pub fn model_label<'a>(&'a self, raw: &'a str) -> &'a str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.pretty_model_name(raw))
    }

    /// Pretty name for a raw method name
    #[must_use]
    pub fn pretty_method_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.method_name.get(raw).map_or(raw, String::as_str)
    }

    /// Index of the `PROPAGATION_MODE` sentinel, if configured
    #[must_use]
    pub fn propagation_mode_position(&self) -> Option<usize> {
        self.argument_order
            .iter()
            .position(ArgumentSlot::is_propagation_mode)
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            argument_order: Vec::new(),
            model_name: None,
            label: None,
            method_name: IndexMap::new(),
            compare: Vec::new(),
            yscale: "linear".to_string(),
            group: 0,
            show_y_values: false,
            ignore: false,
        }
    }
}

/// Settings for every model plus the mode vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "$propagation_modes", default)]
    propagation_modes: ModeVocabulary,
    #[serde(flatten)]
    models: IndexMap<String, ModelSettings>,
    #[serde(skip)]
    fallback: ModelSettings,
}

impl Settings {
    /// Parse settings from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a settings object
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        tracing::debug!(
            models = settings.models.len(),
            modes = settings.propagation_modes.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Load settings from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| SettingsError::io_error(path, e))?;
        Self::from_json_str(&text)
    }

    /// Add or replace a model's settings
    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, settings: ModelSettings) -> Self {
        self.models.insert(name.into(), settings);
        self
    }

    /// Replace the mode vocabulary
    #[must_use]
    pub fn with_propagation_modes(mut self, vocabulary: ModeVocabulary) -> Self {
        self.propagation_modes = vocabulary;
        self
    }

    /// Settings configured for a model
    #[inline]
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelSettings> {
        self.models.get(name)
    }

    /// Settings for a model, or defaults when not configured
    #[inline]
    #[must_use]
    pub fn model_or_default(&self, name: &str) -> &ModelSettings {
        self.models.get(name).unwrap_or(&self.fallback)
    }

    /// Mode vocabulary
    #[inline]
    #[must_use]
    pub fn propagation_modes(&self) -> &ModeVocabulary {
        &self.propagation_modes
    }

    /// Configured model names, in file order
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
