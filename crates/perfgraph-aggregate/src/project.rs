//! Projection of the tree into renderer-neutral figures
//!
//! # Core Concepts
//!
//! - [`Series`]: One x/y line, x ascending by problem instance
//! - [`Plot`]: A series with its legend label, marker and line style
//! - [`Figure`]: Everything an external renderer needs for one chart
//! - [`Projector`]: Turns a [`ModelCollection`] into ordered figures
//!
//! Single models get one figure per group with one plot per propagation
//! mode. Models with a `compare` list get one figure per group of the first
//! model, holding one plot per (model, mode); every compared model keeps
//! its own x values.

use crate::collections::ModelCollection;
use crate::tree::{Method, Model, PropagationModeGroup};
use perfgraph_decode::{label_arguments, ModeVocabulary, PropagationMode, Settings};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Y axis label of every figure
pub const THROUGHPUT_LABEL: &str = "probes/s";

/// X axis label when the instance position has no label
pub const DEFAULT_XLABEL: &str = "n";

const MARKERS: [&str; 4] = ["o", "v", "*", "+"];
const LINESTYLES: [&str; 4] = ["-", "--", ":", "-."];

/// Marker for a propagation mode, empty outside the known modes
#[must_use]
pub fn marker(mode: PropagationMode) -> &'static str {
    mode.index()
        .and_then(|index| MARKERS.get(index))
        .copied()
        .unwrap_or("")
}

/// Line style for the n-th compared model
#[must_use]
pub fn linestyle(iteration: usize) -> &'static str {
    LINESTYLES[iteration % LINESTYLES.len()]
}

/// Mean throughput per problem instance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// Problem instances, ascending
    pub x_values: Vec<i64>,
    /// Mean of the runs at each instance
    pub y_values: Vec<f64>,
}

impl Series {
    /// Number of points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    /// Check if the series has no point
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// Points as `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.x_values.iter().copied().zip(self.y_values.iter().copied())
    }
}

impl FromIterator<(i64, f64)> for Series {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        let (x_values, y_values) = iter.into_iter().unzip();
        Self { x_values, y_values }
    }
}

/// One drawn line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    /// Data points
    #[serde(flatten)]
    pub series: Series,
    /// Legend label
    pub label: String,
    /// Point marker
    pub marker: &'static str,
    /// Line style
    pub linestyle: &'static str,
}

/// One chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Chart title
    pub title: String,
    /// X axis label
    pub xlabel: String,
    /// Y axis label
    pub ylabel: String,
    /// Y axis scale
    pub yscale: String,
    /// Unique, file-name safe identifier
    pub identifier: String,
    /// Suggested output file name
    pub file_name: String,
    /// Annotate points with their values
    pub show_y_values: bool,
    /// Ordering group from the model settings
    pub group: i64,
    /// Every x value of every plot, ascending and deduplicated
    pub xticks: Vec<i64>,
    /// Lines of the chart
    #[serde(rename = "series")]
    pub plots: Vec<Plot>,
}

impl Figure {
    /// X ticks thinned to at least a tenth of the x range apart
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pretty_xticks(&self) -> Vec<i64> {
        let (Some(&first), Some(&last)) = (self.xticks.first(), self.xticks.last()) else {
            return Vec::new();
        };
        let min_distance = (last as f64 - first as f64) / 10.0;

        let mut ticks = vec![first];
        for &tick in &self.xticks[1..] {
            let previous = ticks[ticks.len() - 1];
            if tick as f64 - previous as f64 >= min_distance {
                ticks.push(tick);
            }
        }
        ticks
    }
}

fn xticks(plots: &[Plot]) -> Vec<i64> {
    plots
        .iter()
        .flat_map(|plot| plot.series.x_values.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

type FigureKey = (i64, String, String, String);

/// Builds figures from aggregated models
#[derive(Debug, Clone)]
pub struct Projector<'a> {
    settings: &'a Settings,
    file_prefix: String,
    file_suffix: String,
}

impl<'a> Projector<'a> {
    /// Create projector
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            file_prefix: String::new(),
            file_suffix: String::new(),
        }
    }

    /// Prefix for file names (joined with `-`)
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Suffix for file names (joined with `-`)
    #[must_use]
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }

    fn vocabulary(&self) -> &ModeVocabulary {
        self.settings.propagation_modes()
    }

    /// `{prefix-}{identifier}{-suffix}.png`
    #[must_use]
    pub fn file_name(&self, identifier: &str) -> String {
        let mut name = String::new();
        if !self.file_prefix.is_empty() {
            name.push_str(&self.file_prefix);
            name.push('-');
        }
        name.push_str(identifier);
        if !self.file_suffix.is_empty() {
            name.push('-');
            name.push_str(&self.file_suffix);
        }
        name.push_str(".png");
        name
    }

    /// Every figure of the collection, ordered by (group, model, method, identifier)
    #[must_use]
    pub fn figures(&self, collection: &ModelCollection) -> Vec<Figure> {
        let mut keyed: Vec<(FigureKey, Figure)> = Vec::new();
        let mut plotted: HashSet<&str> = HashSet::new();

        // Comparing models claim their compared models before those are seen alone
        let (comparing, single): (Vec<&Model>, Vec<&Model>) = collection
            .models()
            .partition(|model| collection.models_to_compare(model).len() > 1);

        for model in comparing.into_iter().chain(single) {
            if plotted.contains(model.name()) {
                continue;
            }
            let compared = collection.models_to_compare(model);
            plotted.extend(compared.iter().map(|m| m.name()));

            for method in model.methods() {
                for group in method.groups() {
                    let figure = if compared.len() == 1 {
                        self.group_figure(model, method, group)
                    } else {
                        self.comparison_figure(model, &compared, method, group)
                    };
                    let key = (
                        model.settings().group,
                        model.name().to_string(),
                        method.name().to_string(),
                        group.identifier().to_string(),
                    );
                    keyed.push((key, figure));
                }
            }
        }

        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        tracing::info!(figures = keyed.len(), models = collection.len(), "Projected figures");
        keyed.into_iter().map(|(_, figure)| figure).collect()
    }

    /// One plot per propagation mode of a group
    #[must_use]
    pub fn group_figure(
        &self,
        model: &Model,
        method: &Method,
        group: &PropagationModeGroup,
    ) -> Figure {
        let plots = self.plots(group, linestyle(0), None);
        self.figure(model, method, group, plots)
    }

    /// One plot per (model, mode) for every compared model holding the group
    ///
    /// `initial` provides title, axes and identifier. Compared models match
    /// the method by raw or pretty name and the group by identifier, or by
    /// its parameters when their method name differs.
    #[must_use]
    pub fn comparison_figure(
        &self,
        initial: &Model,
        models: &[&Model],
        method: &Method,
        group: &PropagationModeGroup,
    ) -> Figure {
        let pretty_method = initial.settings().pretty_method_name(method.name());

        let mut plots = Vec::new();
        for (iteration, model) in models.iter().enumerate() {
            let Some(other_method) = model.find_method(method.name(), pretty_method) else {
                tracing::debug!(model = model.name(), method = method.name(), "No matching method");
                continue;
            };
            let Some(other_group) = other_method
                .group(group.identifier())
                .or_else(|| other_method.group_with_parameters(group.parameters()))
            else {
                tracing::debug!(
                    model = model.name(),
                    identifier = group.identifier(),
                    "No matching group"
                );
                continue;
            };
            plots.extend(self.plots(other_group, linestyle(iteration), Some(model.label())));
        }

        self.figure(initial, method, group, plots)
    }

    fn plots(
        &self,
        group: &PropagationModeGroup,
        linestyle: &'static str,
        model_label: Option<&str>,
    ) -> Vec<Plot> {
        group
            .collections()
            .map(|collection| {
                let mode = collection.propagation_mode();
                let mode_label = self.vocabulary().label_or_value(mode);
                let label = match model_label {
                    Some(model_label) => format!("{model_label} - {mode_label}"),
                    None => mode_label,
                };
                Plot {
                    series: collection.results(),
                    label,
                    marker: marker(mode),
                    linestyle,
                }
            })
            .collect()
    }

    fn figure(
        &self,
        model: &Model,
        method: &Method,
        group: &PropagationModeGroup,
        plots: Vec<Plot>,
    ) -> Figure {
        let settings = model.settings();
        let identifier = std::iter::once(model.name())
            .chain(group.identifier().split('/'))
            .collect::<Vec<_>>()
            .join("-");

        Figure {
            title: title(model, method, group),
            xlabel: xlabel(model, group),
            ylabel: THROUGHPUT_LABEL.to_string(),
            yscale: settings.yscale.clone(),
            file_name: self.file_name(&identifier),
            identifier,
            show_y_values: settings.show_y_values,
            group: settings.group,
            xticks: xticks(&plots),
            plots,
        }
    }
}

/// `model - method - label: value ...` over the free arguments of a group
#[must_use]
pub fn title(model: &Model, method: &Method, group: &PropagationModeGroup) -> String {
    let settings = model.settings();
    let layout = group.layout();

    let mut entries = vec![
        model.pretty_name().to_string(),
        settings.pretty_method_name(method.name()).to_string(),
    ];
    entries.extend(
        label_arguments(&settings.argument_order, group.arguments())
            .into_iter()
            .filter(|argument| layout.is_free(argument.position))
            .map(|argument| argument.to_string()),
    );
    entries.join(" - ")
}

/// Label of the problem-instance position, or [`DEFAULT_XLABEL`]
#[must_use]
pub fn xlabel(model: &Model, group: &PropagationModeGroup) -> String {
    model
        .settings()
        .argument_order
        .get(group.layout().instance_position())
        .and_then(|slot| slot.label())
        .unwrap_or(DEFAULT_XLABEL)
        .to_string()
}
