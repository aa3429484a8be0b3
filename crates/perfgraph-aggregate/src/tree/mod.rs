//! The five-level aggregation tree
//!
//! ```text
//! Model ─▶ Method ─▶ PropagationModeGroup ─▶ InstanceCollection ─▶ Instance
//! (name)   (name)    (identifier)            (propagation mode)    (problem instance → runs)
//! ```
//!
//! Every level implements [`Merge`]: an incoming child with an unseen key is
//! adopted wholesale, a known key recurses, and instances concatenate their
//! runs. Children live in ordered maps, so the same records produce the same
//! tree in any arrival order.

mod collection;
mod group;
mod instance;
mod method;
mod model;

pub use collection::InstanceCollection;
pub use group::PropagationModeGroup;
pub use instance::Instance;
pub use method::Method;
pub use model::Model;

use crate::error::{MergeError, NodeKind};
use std::collections::btree_map::{BTreeMap, Entry};

/// Key-checked, recursive merge of two nodes of the same level
pub trait Merge: Sized {
    /// Key identifying the node within its parent
    type Key: Ord + Clone;

    /// Tree level
    const KIND: NodeKind;

    /// Key of this node
    fn key(&self) -> &Self::Key;

    /// Merge `other` into `self`
    ///
    /// # Errors
    /// Returns [`MergeError::KeyMismatch`] when the keys differ here or at any
    /// level below. The receiving tree may already hold part of `other` when
    /// that happens; the pass is expected to stop.
    fn merge(&mut self, other: Self) -> Result<(), MergeError>;
}

/// Adopt `child` into `children`, or merge it into the existing entry
pub(crate) fn merge_child<N: Merge>(
    children: &mut BTreeMap<N::Key, N>,
    child: N,
) -> Result<(), MergeError> {
    match children.entry(child.key().clone()) {
        Entry::Vacant(slot) => {
            slot.insert(child);
            Ok(())
        }
        Entry::Occupied(mut slot) => slot.get_mut().merge(child),
    }
}

/// Merge every child of `incoming` into `children`
pub(crate) fn merge_children<N: Merge>(
    children: &mut BTreeMap<N::Key, N>,
    incoming: BTreeMap<N::Key, N>,
) -> Result<(), MergeError> {
    incoming
        .into_values()
        .try_for_each(|child| merge_child(children, child))
}

/// Any node of the aggregation tree
///
/// Single entry point for merging nodes whose level is only known at run
/// time; same-level pairs dispatch to [`Merge::merge`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Model node
    Model(Model),
    /// Method node
    Method(Method),
    /// Propagation mode group node
    Group(PropagationModeGroup),
    /// Instance collection node
    Collection(InstanceCollection),
    /// Instance node
    Instance(Instance),
}

impl TreeNode {
    /// Level of this node
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Model(_) => NodeKind::Model,
            Self::Method(_) => NodeKind::Method,
            Self::Group(_) => NodeKind::Group,
            Self::Collection(_) => NodeKind::Collection,
            Self::Instance(_) => NodeKind::Instance,
        }
    }

    /// Merge a node of the same level into this one
    ///
    /// # Errors
    /// Returns [`MergeError::KindMismatch`] for nodes of different levels and
    /// [`MergeError::KeyMismatch`] for same-level nodes with different keys.
    pub fn merge(&mut self, other: TreeNode) -> Result<(), MergeError> {
        match (self, other) {
            (Self::Model(a), Self::Model(b)) => a.merge(b),
            (Self::Method(a), Self::Method(b)) => a.merge(b),
            (Self::Group(a), Self::Group(b)) => a.merge(b),
            (Self::Collection(a), Self::Collection(b)) => a.merge(b),
            (Self::Instance(a), Self::Instance(b)) => a.merge(b),
            (receiver, incoming) => Err(MergeError::KindMismatch {
                expected: receiver.kind(),
                found: incoming.kind(),
            }),
        }
    }
}

impl From<Model> for TreeNode {
    fn from(node: Model) -> Self {
        Self::Model(node)
    }
}

impl From<Method> for TreeNode {
    fn from(node: Method) -> Self {
        Self::Method(node)
    }
}

impl From<PropagationModeGroup> for TreeNode {
    fn from(node: PropagationModeGroup) -> Self {
        Self::Group(node)
    }
}

impl From<InstanceCollection> for TreeNode {
    fn from(node: InstanceCollection) -> Self {
        Self::Collection(node)
    }
}

impl From<Instance> for TreeNode {
    fn from(node: Instance) -> Self {
        Self::Instance(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfgraph_decode::{NameDecoder, PropagationMode, Settings};

    fn model(name: &str, run: f64) -> Model {
        let settings = Settings::default();
        let decoded = NameDecoder::new(&settings).decode(name).unwrap();
        Model::singleton(&decoded, settings.model_or_default(decoded.model()), run)
    }

    fn method(name: &str, run: f64) -> Method {
        model(name, run).methods().next().unwrap().clone()
    }

    fn group(name: &str, run: f64) -> PropagationModeGroup {
        method(name, run).groups().next().unwrap().clone()
    }

    fn collection(name: &str, run: f64) -> InstanceCollection {
        group(name, run).collections().next().unwrap().clone()
    }

    fn runs_of(node: &TreeNode) -> Vec<f64> {
        let collection = match node {
            TreeNode::Model(m) => m.method("Lookup").and_then(|m| m.group("Lookup/0")),
            TreeNode::Method(m) => m.group("Lookup/0"),
            TreeNode::Group(g) => Some(g),
            TreeNode::Collection(c) => return c.instance(100).unwrap().runs().to_vec(),
            TreeNode::Instance(i) => return i.runs().to_vec(),
        }
        .and_then(|g| g.collection(PropagationMode::new(1)))
        .unwrap();
        collection.instance(100).unwrap().runs().to_vec()
    }

    #[test]
    fn tree_node_merges_same_level() {
        let mut node = TreeNode::from(Instance::new(100, 5000.0));
        node.merge(Instance::new(100, 7000.0).into()).unwrap();

        let TreeNode::Instance(instance) = node else {
            panic!("expected instance node");
        };
        assert_eq!(instance.runs(), &[5000.0, 7000.0]);
    }

    #[test]
    fn tree_node_merges_every_level() {
        let name = "Tree/Lookup/0/1/100";
        let pairs: [(TreeNode, TreeNode); 4] = [
            (model(name, 1.0).into(), model(name, 3.0).into()),
            (method(name, 1.0).into(), method(name, 3.0).into()),
            (group(name, 1.0).into(), group(name, 3.0).into()),
            (collection(name, 1.0).into(), collection(name, 3.0).into()),
        ];

        for (mut node, incoming) in pairs {
            let kind = node.kind();
            node.merge(incoming).unwrap();
            assert_eq!(node.kind(), kind);
            assert_eq!(runs_of(&node), vec![1.0, 3.0], "{kind}");
        }
    }

    #[test]
    fn tree_node_rejects_different_keys_below_leaf() {
        let mut node = TreeNode::from(group("Tree/Lookup/1/1/100", 1.0));
        let result = node.merge(group("Tree/Lookup/0/1/100", 2.0).into());

        assert_eq!(
            result,
            Err(MergeError::KeyMismatch {
                kind: NodeKind::Group,
                expected: "Lookup/1".to_string(),
                found: "Lookup/0".to_string(),
            })
        );

        let mut node = TreeNode::from(method("Tree/Lookup/0/1/100", 1.0));
        let result = node.merge(method("Tree/Insert/0/1/100", 2.0).into());
        assert!(matches!(
            result,
            Err(MergeError::KeyMismatch {
                kind: NodeKind::Method,
                ..
            })
        ));
    }

    #[test]
    fn tree_node_rejects_different_levels() {
        let mut node = TreeNode::from(Instance::new(100, 5000.0));
        let incoming = TreeNode::from(InstanceCollection::new(
            PropagationMode::new(1),
            Instance::new(100, 1.0),
        ));

        assert_eq!(
            node.merge(incoming),
            Err(MergeError::KindMismatch {
                expected: NodeKind::Instance,
                found: NodeKind::Collection,
            })
        );
    }

    #[test]
    fn merge_child_adopts_unknown_keys() {
        let mut children = BTreeMap::new();
        merge_child(&mut children, Instance::new(50, 1.0)).unwrap();
        merge_child(&mut children, Instance::new(100, 2.0)).unwrap();
        merge_child(&mut children, Instance::new(50, 3.0)).unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[&50].runs(), &[1.0, 3.0]);
    }
}
