use fnv::FnvHashMap;

use crate::node::{A2lTree, NodeId, NodeRef};

/// Tag -> nodes index of a parsed tree
///
/// Every node that is reachable from the root is listed exactly once, under its own tag.
/// Within a tag the nodes are in post-order: children come before their parents, and
/// siblings appear in field order.
#[derive(Debug, Default, Clone)]
pub struct NodeIndex {
    by_tag: FnvHashMap<&'static str, Vec<NodeId>>,
}

impl NodeIndex {
    pub(crate) fn build(tree: &A2lTree) -> Self {
        let mut by_tag: FnvHashMap<&'static str, Vec<NodeId>> = FnvHashMap::default();

        // iterative post-order traversal; the flag is set once the children of a node have been queued
        let mut stack: Vec<(NodeRef<'_>, bool)> = vec![(tree.root(), false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                by_tag.entry(node.tag()).or_default().push(node.id());
            } else {
                stack.push((node, true));
                for child in node.children().into_iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        Self { by_tag }
    }

    /// Ids of all nodes with the given tag
    #[must_use]
    pub fn get(&self, tag: &str) -> &[NodeId] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Total number of indexed nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// All tags that occur in the tree, sorted
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self.by_tag.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}
