//! Root level of one benchmark fixture

use super::{
    merge_child, merge_children, Instance, InstanceCollection, Merge, Method, PropagationModeGroup,
};
use crate::error::{MergeError, NodeKind};
use perfgraph_decode::{DecodedName, ModelSettings};
use std::collections::BTreeMap;

/// A benchmarked model and its methods
///
/// Carries the model's settings for presentation. Aggregation only checks
/// that merged trees carry equal settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    settings: ModelSettings,
    methods: BTreeMap<String, Method>,
}

impl Model {
    /// Create model holding its first method
    #[must_use]
    pub fn new(name: impl Into<String>, settings: ModelSettings, method: Method) -> Self {
        let mut methods = BTreeMap::new();
        methods.insert(method.name().to_string(), method);
        Self {
            name: name.into(),
            settings,
            methods,
        }
    }

    /// One-path tree holding a single run of a decoded record
    #[must_use]
    pub fn singleton(decoded: &DecodedName, settings: &ModelSettings, run: f64) -> Self {
        let instance = Instance::new(decoded.problem_instance(), run);
        let collection = InstanceCollection::new(decoded.propagation_mode(), instance);
        let group = PropagationModeGroup::new(
            decoded.identifier(),
            decoded.arguments().to_vec(),
            decoded.layout(),
            collection,
        );
        let method = Method::new(decoded.method(), group);
        Self::new(decoded.model(), settings.clone(), method)
    }

    /// Raw model name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings bundle
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Pretty model name
    #[inline]
    #[must_use]
    pub fn pretty_name(&self) -> &str {
        self.settings.pretty_model_name(&self.name)
    }

    /// Legend label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        self.settings.model_label(&self.name)
    }

    /// Method by raw name
    #[inline]
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Method matching another model's method by raw or pretty name
    #[must_use]
    pub fn find_method(&self, name: &str, pretty_name: &str) -> Option<&Method> {
        self.methods.get(name).or_else(|| {
            self.methods
                .values()
                .find(|m| self.settings.pretty_method_name(m.name()) == pretty_name)
        })
    }

    /// Methods in name order
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.values()
    }

    /// Add a method, merging with an existing one of the same name
    ///
    /// # Errors
    /// Propagates [`MergeError`] from lower levels
    pub fn add_method(&mut self, method: Method) -> Result<(), MergeError> {
        merge_child(&mut self.methods, method)
    }
}

impl Merge for Model {
    type Key = String;

    const KIND: NodeKind = NodeKind::Model;

    fn key(&self) -> &String {
        &self.name
    }

    fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        MergeError::check_key(Self::KIND, self.name.as_str(), other.name.as_str())?;
        if self.settings != other.settings {
            return Err(MergeError::SettingsMismatch { model: other.name });
        }
        merge_children(&mut self.methods, other.methods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfgraph_decode::{NameDecoder, Settings};

    fn singleton(name: &str, run: f64) -> Model {
        let settings = Settings::default();
        let decoded = NameDecoder::new(&settings).decode(name).unwrap();
        Model::singleton(&decoded, settings.model_or_default(decoded.model()), run)
    }

    #[test]
    fn singleton_builds_one_path() {
        let model = singleton("Tree/Lookup/0/1/100", 4200.5);

        let method = model.method("Lookup").unwrap();
        let group = method.group("Lookup/0").unwrap();
        let collection = group.collection(perfgraph_decode::PropagationMode::new(1)).unwrap();
        assert_eq!(collection.instance(100).unwrap().runs(), &[4200.5]);
        assert_eq!(group.arguments(), &[0, 1, 100]);
    }

    #[test]
    fn merge_is_key_checked() {
        let mut tree = singleton("Tree/Lookup/0/1/100", 1.0);
        let result = tree.merge(singleton("Queue/Lookup/0/1/100", 1.0));

        assert!(matches!(
            result,
            Err(MergeError::KeyMismatch {
                kind: NodeKind::Model,
                ..
            })
        ));
    }

    #[test]
    fn merge_rejects_different_settings() {
        let log = Settings::from_json_str(r#"{"Tree": {"yscale": "log"}}"#).unwrap();
        let decoded = NameDecoder::new(&log).decode("Tree/Lookup/0/1/100").unwrap();
        let log_tree = Model::singleton(&decoded, log.model_or_default("Tree"), 1.0);
        let linear_tree = singleton("Tree/Lookup/0/1/100", 2.0);

        let mut a = log_tree.clone();
        let mut b = linear_tree.clone();
        let expected = Err(MergeError::SettingsMismatch {
            model: "Tree".to_string(),
        });
        assert_eq!(a.merge(linear_tree), expected);
        assert_eq!(b.merge(log_tree), expected);
        assert_eq!(a.settings().yscale, "log");
    }

    #[test]
    fn find_method_by_pretty_name() {
        let settings = Settings::from_json_str(
            r#"{"Tree": {"method_name": {"probe": "single probe"}}}"#,
        )
        .unwrap();
        let decoded = NameDecoder::new(&settings).decode("Tree/probe/1/10").unwrap();
        let model = Model::singleton(&decoded, settings.model_or_default("Tree"), 1.0);

        assert!(model.find_method("probe", "whatever").is_some());
        assert!(model.find_method("probing", "single probe").is_some());
        assert!(model.find_method("probing", "other").is_none());
    }
}
