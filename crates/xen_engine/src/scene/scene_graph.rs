//! Scene graph arena
//!
//! Owns every [`SceneNode`] in a generational slot map. Children are stored
//! as keys and parents as generation-checked back-links, so a link to a
//! removed node stops resolving instead of dangling. Traversals use an
//! explicit stack; hierarchy depth is not limited by the call stack.

use super::node::SceneNode;
use crate::ecs::EntityId;
use crate::foundation::collections::{HandleMap, NodeKey};
use crate::foundation::math::Mat4;
use std::collections::HashMap;

/// Tree of scene nodes indexed by entity
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: HandleMap<NodeKey, SceneNode>,
    lookup: HashMap<EntityId, NodeKey>,
    root: Option<NodeKey>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parentless node with identity transforms
    pub fn insert(&mut self, entity: EntityId) -> NodeKey {
        let key = self.nodes.insert(SceneNode::new(entity));
        self.lookup.insert(entity, key);
        key
    }

    /// Node handle for `entity`
    pub fn key_of(&self, entity: EntityId) -> Option<NodeKey> {
        self.lookup.get(&entity).copied()
    }

    /// Node behind `key`
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Node behind `entity`
    pub fn node_of(&self, entity: EntityId) -> Option<&SceneNode> {
        self.key_of(entity).and_then(|key| self.nodes.get(key))
    }

    /// Designated root, if any
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub(super) fn set_root(&mut self, root: Option<NodeKey>) {
        self.root = root;
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every live node
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> + '_ {
        self.nodes.iter()
    }

    pub(super) fn set_local_transform(&mut self, key: NodeKey, local: Mat4) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.local_transform = local;
        }
    }

    /// World transform of `key`'s parent, identity when parentless
    pub fn parent_world(&self, key: NodeKey) -> Mat4 {
        self.nodes
            .get(key)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(parent))
            .map_or_else(Mat4::identity, |parent| parent.world_transform)
    }

    /// Append `child` to `parent`'s children and set the back-link
    ///
    /// `child` must currently be unlinked.
    pub(super) fn link(&mut self, child: NodeKey, parent: NodeKey) {
        debug_assert!(self.nodes.get(child).is_some_and(|n| n.parent.is_none()));
        if !self.nodes.contains_key(child) {
            return;
        }
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return;
        };
        parent_node.children.push(child);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Remove `child` from its parent's children and clear the back-link
    pub(super) fn unlink(&mut self, child: NodeKey) {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&key| key != child);
        }
    }

    /// Whether `ancestor` is `node` or lies on `node`'s parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    /// `key` and all of its descendants, parents before children
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            order.push(current);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// Unlink and drop a single node
    ///
    /// Its children are left with a stale parent link; callers remove
    /// subtrees bottom-up so none survive.
    pub(super) fn remove_node(&mut self, key: NodeKey) -> Option<SceneNode> {
        self.unlink(key);
        let node = self.nodes.remove(key)?;
        self.lookup.remove(&node.entity);
        if self.root == Some(key) {
            self.root = None;
        }
        Some(node)
    }

    /// Drop every node
    pub(super) fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.root = None;
    }

    /// Recompute world transforms top-down from `start`
    ///
    /// `start` gets `parent_world * local`; every descendant then composes
    /// with its freshly updated parent. `visit` sees each node's entity and
    /// new world transform in that order.
    pub(super) fn propagate<F>(&mut self, start: NodeKey, parent_world: Mat4, mut visit: F)
    where
        F: FnMut(EntityId, &Mat4),
    {
        let mut stack = vec![(start, parent_world)];
        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };
            node.world_transform = parent_world * node.local_transform;
            visit(node.entity, &node.world_transform);

            let world = node.world_transform;
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn chain(graph: &mut SceneGraph, length: u64) -> Vec<NodeKey> {
        let keys: Vec<_> = (1..=length).map(|id| graph.insert(EntityId::new(id))).collect();
        for pair in keys.windows(2) {
            graph.link(pair[1], pair[0]);
        }
        keys
    }

    #[test]
    fn test_link_and_unlink() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(EntityId::new(1));
        let child = graph.insert(EntityId::new(2));

        graph.link(child, parent);
        assert_eq!(graph.node(child).unwrap().parent(), Some(parent));
        assert_eq!(graph.node(parent).unwrap().children(), &[child]);

        graph.unlink(child);
        assert_eq!(graph.node(child).unwrap().parent(), None);
        assert!(graph.node(parent).unwrap().children().is_empty());
    }

    #[test]
    fn test_subtree_is_preorder() {
        let mut graph = SceneGraph::new();
        let keys = chain(&mut graph, 3);
        let sibling = graph.insert(EntityId::new(4));
        graph.link(sibling, keys[0]);

        assert_eq!(graph.subtree(keys[0]), vec![keys[0], keys[1], keys[2], sibling]);
        assert_eq!(graph.subtree(keys[1]), vec![keys[1], keys[2]]);
    }

    #[test]
    fn test_ancestry() {
        let mut graph = SceneGraph::new();
        let keys = chain(&mut graph, 3);

        assert!(graph.is_ancestor_or_self(keys[0], keys[2]));
        assert!(graph.is_ancestor_or_self(keys[1], keys[1]));
        assert!(!graph.is_ancestor_or_self(keys[2], keys[0]));
    }

    #[test]
    fn test_removed_parent_link_is_detected() {
        let mut graph = SceneGraph::new();
        let keys = chain(&mut graph, 2);

        graph.remove_node(keys[0]);

        let stale = graph.node(keys[1]).unwrap().parent().unwrap();
        assert!(graph.node(stale).is_none());
        assert_eq!(graph.parent_world(keys[1]), Mat4::identity());
        assert!(graph.key_of(EntityId::new(1)).is_none());
    }

    #[test]
    fn test_propagate_composes_down_the_chain() {
        let mut graph = SceneGraph::new();
        let keys = chain(&mut graph, 3);
        for &key in &keys {
            graph.set_local_transform(key, Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)));
        }

        let mut visited = Vec::new();
        graph.propagate(keys[0], Mat4::identity(), |entity, _| visited.push(entity));

        assert_eq!(visited, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
        assert_relative_eq!(
            *graph.node(keys[2]).unwrap().world_transform(),
            Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0)),
            epsilon = 1e-6
        );
    }
}
