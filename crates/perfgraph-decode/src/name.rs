//! Benchmark name decoding
//!
//! A name has the form `<model>/<method>/<arg_0>/.../<arg_{k-1}>` with k >= 2.
//!
//! # Position rule
//!
//! - Propagation mode: the index of `PROPAGATION_MODE` in the model's
//!   `argument_order`, otherwise the second-to-last argument.
//! - Problem instance: the last argument, or the one before it when the
//!   sentinel sits on the last slot.
//!
//! The grouping identifier is the method joined with every other argument,
//! so sweeps that differ only in mode and instance share one group.

use crate::error::Rejection;
use crate::mode::PropagationMode;
use crate::settings::{ArgumentSlot, Settings};

/// Resolved positions of the mode and instance arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgumentLayout {
    mode_position: usize,
    instance_position: usize,
}

impl ArgumentLayout {
    /// Resolve positions for `arguments` values under `order`
    ///
    /// Returns `None` when fewer than two arguments are present or the
    /// sentinel points past the argument list.
    #[must_use]
    pub fn resolve(order: &[ArgumentSlot], arguments: usize) -> Option<Self> {
        if arguments < 2 {
            return None;
        }
        let last = arguments - 1;
        let mode_position = match order.iter().position(ArgumentSlot::is_propagation_mode) {
            Some(position) if position <= last => position,
            Some(_) => return None,
            None => last - 1,
        };
        let instance_position = if mode_position == last { last - 1 } else { last };

        Some(Self {
            mode_position,
            instance_position,
        })
    }

    /// Position of the propagation mode
    #[inline]
    #[must_use]
    pub fn mode_position(&self) -> usize {
        self.mode_position
    }

    /// Position of the problem instance
    #[inline]
    #[must_use]
    pub fn instance_position(&self) -> usize {
        self.instance_position
    }

    /// Check if a position is neither mode nor instance
    #[inline]
    #[must_use]
    pub fn is_free(&self, position: usize) -> bool {
        position != self.mode_position && position != self.instance_position
    }

    /// Grouping identifier for a method and its arguments
    #[must_use]
    pub fn identifier(&self, method: &str, arguments: &[i64]) -> String {
        let mut identifier = method.to_string();
        for (position, value) in arguments.iter().enumerate() {
            if self.is_free(position) {
                identifier.push('/');
                identifier.push_str(&value.to_string());
            }
        }
        identifier
    }
}

/// A successfully decoded benchmark name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    model: String,
    method: String,
    identifier: String,
    propagation_mode: PropagationMode,
    problem_instance: i64,
    arguments: Vec<i64>,
    layout: ArgumentLayout,
}

impl DecodedName {
    /// Model name
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Method name
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Grouping identifier
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Propagation mode
    #[inline]
    #[must_use]
    pub fn propagation_mode(&self) -> PropagationMode {
        self.propagation_mode
    }

    /// Problem instance (x axis value)
    #[inline]
    #[must_use]
    pub fn problem_instance(&self) -> i64 {
        self.problem_instance
    }

    /// All arguments, in name order
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &[i64] {
        &self.arguments
    }

    /// Resolved argument layout
    #[inline]
    #[must_use]
    pub fn layout(&self) -> ArgumentLayout {
        self.layout
    }
}

/// Decodes benchmark names against a settings bundle
#[derive(Debug, Clone, Copy)]
pub struct NameDecoder<'a> {
    settings: &'a Settings,
}

impl<'a> NameDecoder<'a> {
    /// Create decoder over settings
    #[inline]
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Settings used for decoding
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Decode one benchmark name
    ///
    /// # Errors
    /// Returns a [`Rejection`] when the name cannot carry a mode and an
    /// instance, has non-integer arguments, or belongs to an ignored model.
    pub fn decode(&self, name: &str) -> Result<DecodedName, Rejection> {
        let segments: Vec<&str> = name.split('/').collect();
        if segments.len() < 4 {
            return Err(Rejection::TooFewSegments {
                name: name.to_string(),
                found: segments.len().saturating_sub(1),
            });
        }

        let (model, method) = (segments[0], segments[1]);
        if model.is_empty() || method.is_empty() {
            return Err(Rejection::EmptySegment {
                name: name.to_string(),
            });
        }

        let arguments = segments[2..]
            .iter()
            .map(|segment| {
                segment
                    .parse::<i64>()
                    .map_err(|_| Rejection::NonNumericArgument {
                        name: name.to_string(),
                        segment: (*segment).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let model_settings = self.settings.model_or_default(model);
        if model_settings.ignore {
            return Err(Rejection::IgnoredModel {
                model: model.to_string(),
            });
        }

        let layout = ArgumentLayout::resolve(&model_settings.argument_order, arguments.len())
            .ok_or_else(|| Rejection::ModePositionOutOfRange {
                name: name.to_string(),
                position: model_settings.propagation_mode_position().unwrap_or_default(),
                arguments: arguments.len(),
            })?;

        Ok(DecodedName {
            model: model.to_string(),
            method: method.to_string(),
            identifier: layout.identifier(method, &arguments),
            propagation_mode: PropagationMode::new(arguments[layout.mode_position]),
            problem_instance: arguments[layout.instance_position],
            arguments,
            layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ModelSettings;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn settings_with_order(model: &str, order: &[&str]) -> Settings {
        Settings::default().with_model(
            model,
            ModelSettings {
                argument_order: order.iter().map(|s| ArgumentSlot::from(*s)).collect(),
                ..ModelSettings::default()
            },
        )
    }

    #[test]
    fn default_layout_uses_second_to_last_mode() {
        let settings = Settings::default();
        let decoded = NameDecoder::new(&settings).decode("Tree/Lookup/0/1/100").unwrap();

        assert_eq!(decoded.model(), "Tree");
        assert_eq!(decoded.method(), "Lookup");
        assert_eq!(decoded.arguments(), &[0, 1, 100]);
        assert_eq!(decoded.propagation_mode(), PropagationMode::new(1));
        assert_eq!(decoded.problem_instance(), 100);
        assert_eq!(decoded.identifier(), "Lookup/0");
        assert_eq!(decoded.layout().mode_position(), 1);
        assert_eq!(decoded.layout().instance_position(), 2);
    }

    #[test]
    fn identifier_ignores_instance() {
        let settings = Settings::default();
        let decoder = NameDecoder::new(&settings);

        let a = decoder.decode("Tree/Lookup/0/1/100").unwrap();
        let b = decoder.decode("Tree/Lookup/0/1/50").unwrap();
        assert_eq!(a.identifier(), b.identifier());
        assert_eq!(b.problem_instance(), 50);
    }

    #[test]
    fn identifier_ignores_mode() {
        let settings = Settings::default();
        let decoder = NameDecoder::new(&settings);

        let a = decoder.decode("Tree/Lookup/7/0/100").unwrap();
        let b = decoder.decode("Tree/Lookup/7/3/100").unwrap();
        assert_eq!(a.identifier(), b.identifier());
        assert_ne!(a.propagation_mode(), b.propagation_mode());
    }

    #[test]
    fn two_arguments_is_enough() {
        let settings = Settings::default();
        let decoded = NameDecoder::new(&settings).decode("Queue/push/2/64").unwrap();

        assert_eq!(decoded.propagation_mode(), PropagationMode::new(2));
        assert_eq!(decoded.problem_instance(), 64);
        assert_eq!(decoded.identifier(), "push");
    }

    #[test]
    fn sentinel_on_last_slot_shifts_instance_left() {
        let settings = settings_with_order("Queue", &["size", "PROPAGATION_MODE"]);
        let decoded = NameDecoder::new(&settings).decode("Queue/push/64/2").unwrap();

        assert_eq!(decoded.propagation_mode(), PropagationMode::new(2));
        assert_eq!(decoded.problem_instance(), 64);
    }

    #[test]
    fn sentinel_in_the_middle() {
        let settings = settings_with_order("Tree", &["IGNORE", "PROPAGATION_MODE"]);
        let decoded = NameDecoder::new(&settings).decode("Tree/commit/5/3/9/200").unwrap();

        assert_eq!(decoded.propagation_mode(), PropagationMode::new(3));
        assert_eq!(decoded.problem_instance(), 200);
        assert_eq!(decoded.identifier(), "commit/5/9");
    }

    #[test]
    fn sentinel_for_other_model_is_not_applied() {
        let settings = settings_with_order("Queue", &["PROPAGATION_MODE", "size"]);
        let decoded = NameDecoder::new(&settings).decode("Tree/Lookup/0/1/100").unwrap();

        assert_eq!(decoded.layout().mode_position(), 1);
    }

    #[test]
    fn rejects_too_few_segments() {
        let settings = Settings::default();
        let decoder = NameDecoder::new(&settings);

        assert!(matches!(
            decoder.decode("Tree/Lookup/abc"),
            Err(Rejection::TooFewSegments { found: 2, .. })
        ));
        assert!(matches!(
            decoder.decode("Tree"),
            Err(Rejection::TooFewSegments { found: 0, .. })
        ));
        assert!(matches!(
            decoder.decode("Tree/Lookup/1"),
            Err(Rejection::TooFewSegments { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_arguments() {
        let settings = Settings::default();
        let result = NameDecoder::new(&settings).decode("Tree/Lookup/1/abc/100");

        assert_eq!(
            result,
            Err(Rejection::NonNumericArgument {
                name: "Tree/Lookup/1/abc/100".to_string(),
                segment: "abc".to_string(),
            })
        );
    }

    #[test]
    fn rejects_trailing_aggregate_suffix() {
        let settings = Settings::default();
        let result = NameDecoder::new(&settings).decode("Tree/Lookup/1/100/mean");
        assert!(matches!(result, Err(Rejection::NonNumericArgument { .. })));
    }

    #[test]
    fn rejects_empty_method() {
        let settings = Settings::default();
        let result = NameDecoder::new(&settings).decode("Tree//1/100");
        assert!(matches!(result, Err(Rejection::EmptySegment { .. })));
    }

    #[test]
    fn rejects_ignored_model() {
        let settings = Settings::default().with_model(
            "Tree",
            ModelSettings {
                ignore: true,
                ..ModelSettings::default()
            },
        );
        let result = NameDecoder::new(&settings).decode("Tree/Lookup/0/1/100");
        assert!(matches!(result, Err(Rejection::IgnoredModel { .. })));
    }

    #[test]
    fn rejects_sentinel_past_arguments() {
        let settings = settings_with_order("Tree", &["a", "b", "c", "PROPAGATION_MODE"]);
        let result = NameDecoder::new(&settings).decode("Tree/Lookup/1/100");

        assert!(matches!(
            result,
            Err(Rejection::ModePositionOutOfRange {
                position: 3,
                arguments: 2,
                ..
            })
        ));
    }

    #[test]
    fn layout_requires_two_arguments() {
        assert!(ArgumentLayout::resolve(&[], 1).is_none());
        assert!(ArgumentLayout::resolve(&[], 0).is_none());
    }

    proptest! {
        #[test]
        fn prop_mode_and_instance_are_distinct(
            arguments in proptest::collection::vec(-1000i64..1000, 2..8),
            sentinel in proptest::option::of(0usize..8),
        ) {
            let mut order = Vec::new();
            if let Some(position) = sentinel {
                order.resize(position, ArgumentSlot::Label("x".to_string()));
                order.push(ArgumentSlot::PropagationMode);
            }

            if let Some(layout) = ArgumentLayout::resolve(&order, arguments.len()) {
                prop_assert_ne!(layout.mode_position(), layout.instance_position());
                prop_assert!(layout.instance_position() < arguments.len());
                prop_assert!(layout.mode_position() < arguments.len());

                let identifier = layout.identifier("m", &arguments);
                prop_assert_eq!(identifier.split('/').count(), arguments.len() - 1);
            } else {
                prop_assert!(sentinel.is_some_and(|p| p >= arguments.len()));
            }
        }
    }
}
