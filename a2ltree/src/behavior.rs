use fnv::FnvHashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::node::{NodeRef, Value};

/// Custom behavior that can be attached to all nodes of one tag
///
/// The fields of a node are always the same; a behavior only adds presentation logic on top.
/// Every method has a default implementation.
pub trait NodeBehavior: Debug + Send + Sync {
    /// A short name for the node. By default this is the tag
    fn node_name(&self, node: NodeRef<'_>) -> String {
        node.tag().to_string()
    }

    /// A one-line description: the tag, followed by the name of the node if it has one
    fn describe(&self, node: NodeRef<'_>) -> String {
        match node.field("name") {
            Some(Value::String(name) | Value::Ident(name)) => format!("{} {name}", node.tag()),
            _ => node.tag().to_string(),
        }
    }
}

/// The behavior of nodes that have no override
#[derive(Debug)]
pub struct DefaultBehavior;

impl NodeBehavior for DefaultBehavior {}

pub(crate) static DEFAULT_BEHAVIOR: DefaultBehavior = DefaultBehavior;

/// Creates the behavior for one node
pub type NodeConstructor = Box<dyn Fn() -> Arc<dyn NodeBehavior> + Send + Sync>;

/// Table of node tag -> behavior constructor
///
/// The parser calls the constructor once for each node with a matching tag.
#[derive(Default)]
pub struct NodeOverrides {
    constructors: FnvHashMap<String, NodeConstructor>,
}

impl NodeOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for the tag. An earlier constructor for the same tag is replaced
    pub fn insert<F>(&mut self, tag: &str, constructor: F)
    where
        F: Fn() -> Arc<dyn NodeBehavior> + Send + Sync + 'static,
    {
        self.constructors
            .insert(tag.to_string(), Box::new(constructor));
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub(crate) fn instantiate(&self, tag: &str) -> Option<Arc<dyn NodeBehavior>> {
        self.constructors.get(tag).map(|constructor| constructor())
    }
}

impl Debug for NodeOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&String> = self.constructors.keys().collect();
        tags.sort();
        f.debug_struct("NodeOverrides")
            .field("tags", &tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Custom;

    impl NodeBehavior for Custom {
        fn node_name(&self, _node: NodeRef<'_>) -> String {
            "custom".to_string()
        }
    }

    #[test]
    fn overrides() {
        let mut overrides = NodeOverrides::new();
        assert!(overrides.is_empty());
        overrides.insert("CHARACTERISTIC", || Arc::new(Custom));
        assert!(overrides.contains("CHARACTERISTIC"));
        assert!(!overrides.contains("MEASUREMENT"));
        assert!(overrides.instantiate("CHARACTERISTIC").is_some());
        assert!(overrides.instantiate("MEASUREMENT").is_none());
        assert_eq!(
            format!("{overrides:?}"),
            r#"NodeOverrides { tags: ["CHARACTERISTIC"] }"#
        );
    }
}
