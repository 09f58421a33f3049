//! Scene - Bridge between the node tree and the ECS game state
//!
//! A [`Scene`] owns one [`GameState`] and a [`SceneGraph`] whose nodes mirror
//! the live entities one to one. Every hierarchy mutation ends with a
//! top-down propagation pass that recomputes world matrices and writes the
//! decomposed world pose into each entity's [`TransformComponent`].
//!
//! Operations naming an unknown entity are silent no-ops (or return the
//! identity / `None` / empty); they are logged at trace level only.

use super::{SceneError, SceneGraph};
use crate::config::SceneConfig;
use crate::ecs::components::TransformComponent;
use crate::ecs::{EntityId, GameState};
use crate::foundation::collections::NodeKey;
use crate::foundation::math::{self, DecomposedMatrix, Mat4};
use std::path::Path;

/// A world: component data plus the spatial hierarchy over it
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    state: GameState,
    graph: SceneGraph,
}

impl Scene {
    /// Create a named scene with default settings over `state`
    pub fn new(name: impl Into<String>, state: GameState) -> Self {
        Self::with_config(SceneConfig::new(name), state)
    }

    /// Create a scene with explicit configuration over `state`
    pub fn with_config(config: SceneConfig, state: GameState) -> Self {
        log::debug!("Creating scene '{}'", config.name);
        Self {
            config,
            state,
            graph: SceneGraph::new(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Component data of this scene
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Component data of this scene, mutably
    ///
    /// Entities must be created and destroyed through the scene, not here,
    /// or the node tree and the state drift apart.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The node tree
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Create an entity and place it in the hierarchy
    ///
    /// Without a known parent the entity becomes the root when there is none
    /// yet, otherwise a child of the root.
    pub fn create_entity(&mut self, parent: Option<EntityId>) -> EntityId {
        let entity = self.state.create_entity();
        if self.config.auto_transform_component {
            if let Err(err) = self.state.add_component::<TransformComponent>(entity) {
                log::warn!("Scene '{}': {err}", self.config.name);
            }
        }

        let key = self.graph.insert(entity);
        let parent_key = parent.filter(|p| p.is_valid()).and_then(|p| {
            let key = self.graph.key_of(p);
            if key.is_none() {
                log::trace!("Unknown parent {p} for new {entity}; falling back to root");
            }
            key
        });

        match parent_key.or_else(|| self.graph.root()) {
            Some(parent_key) => self.graph.link(key, parent_key),
            None => self.graph.set_root(Some(key)),
        }

        let parent_world = self.graph.parent_world(key);
        self.propagate(key, parent_world);
        log::trace!("Created {entity} in scene '{}'", self.config.name);
        entity
    }

    /// Destroy an entity together with all of its descendants
    ///
    /// Descendants go first, so every node is gone before its parent's
    /// bookkeeping is touched.
    pub fn remove_entity(&mut self, entity: EntityId) {
        let Some(key) = self.graph.key_of(entity) else {
            log::trace!("remove_entity: unknown {entity}");
            return;
        };

        let subtree = self.graph.subtree(key);
        let count = subtree.len();
        for node_key in subtree.into_iter().rev() {
            if let Some(node) = self.graph.remove_node(node_key) {
                self.state.destroy_entity(node.entity());
            }
        }
        log::trace!("Removed {entity} and {} descendant(s)", count - 1);
    }

    /// Reparent `child` under `parent`, keeping its world pose
    ///
    /// No-op when either entity is unknown, when `child` is the root, or
    /// when `parent` is `child` itself or one of its descendants.
    pub fn attach_entity(&mut self, child: EntityId, parent: EntityId) {
        let (Some(child_key), Some(parent_key)) = (self.graph.key_of(child), self.graph.key_of(parent)) else {
            log::trace!("attach_entity: unknown {child} or {parent}");
            return;
        };
        if self.graph.root() == Some(child_key) {
            log::warn!("attach_entity: {child} is the scene root and cannot be reparented");
            return;
        }
        if self.graph.is_ancestor_or_self(child_key, parent_key) {
            log::warn!("attach_entity: {parent} is inside the subtree of {child}");
            return;
        }

        let captured_world = self.world_of(child_key);
        self.graph.unlink(child_key);
        self.graph.link(child_key, parent_key);

        let parent_world = self.world_of(parent_key);
        self.graph
            .set_local_transform(child_key, math::inverse_or_identity(&parent_world) * captured_world);
        self.propagate(child_key, parent_world);
    }

    /// Detach `child` from its parent, keeping its world pose
    ///
    /// A detached node is put back under the root when one exists; otherwise
    /// it becomes a parentless transform root.
    pub fn detach_entity(&mut self, child: EntityId) {
        let Some(child_key) = self.graph.key_of(child) else {
            log::trace!("detach_entity: unknown {child}");
            return;
        };
        if self.graph.node(child_key).and_then(|node| node.parent()).is_none() {
            log::trace!("detach_entity: {child} has no parent");
            return;
        }

        let captured_world = self.world_of(child_key);
        self.graph.unlink(child_key);

        match self.graph.root() {
            Some(root_key) if root_key != child_key => {
                self.graph.link(child_key, root_key);
                let root_world = self.world_of(root_key);
                self.graph
                    .set_local_transform(child_key, math::inverse_or_identity(&root_world) * captured_world);
                self.propagate(child_key, root_world);
            }
            _ => {
                self.graph.set_local_transform(child_key, captured_world);
                self.propagate(child_key, Mat4::identity());
            }
        }
    }

    /// Place `entity` at `transform` in world space
    ///
    /// The local transform is back-solved against the parent; descendants
    /// follow.
    pub fn set_world_transform(&mut self, entity: EntityId, transform: &Mat4) {
        let Some(key) = self.graph.key_of(entity) else {
            log::trace!("set_world_transform: unknown {entity}");
            return;
        };

        let has_parent = self.graph.node(key).and_then(|node| node.parent()).is_some();
        let parent_world = self.graph.parent_world(key);
        let local = if has_parent {
            math::inverse_or_identity(&parent_world) * transform
        } else {
            *transform
        };

        self.graph.set_local_transform(key, local);
        self.propagate(key, parent_world);
    }

    /// Cached world transform, identity for unknown entities
    pub fn get_world_transform(&self, entity: EntityId) -> Mat4 {
        self.graph
            .node_of(entity)
            .map_or_else(Mat4::identity, |node| *node.world_transform())
    }

    /// Set `entity`'s pose relative to its parent; descendants follow
    pub fn set_local_transform(&mut self, entity: EntityId, transform: &Mat4) {
        let Some(key) = self.graph.key_of(entity) else {
            log::trace!("set_local_transform: unknown {entity}");
            return;
        };

        self.graph.set_local_transform(key, *transform);
        let parent_world = self.graph.parent_world(key);
        self.propagate(key, parent_world);
    }

    /// Pose relative to the parent, identity for unknown entities
    pub fn get_local_transform(&self, entity: EntityId) -> Mat4 {
        self.graph
            .node_of(entity)
            .map_or_else(Mat4::identity, |node| *node.local_transform())
    }

    /// The designated root entity
    pub fn root(&self) -> Option<EntityId> {
        self.graph.root().and_then(|key| self.entity_at(key))
    }

    /// Parent of `entity`
    pub fn parent_of(&self, entity: EntityId) -> Option<EntityId> {
        self.graph
            .node_of(entity)
            .and_then(|node| node.parent())
            .and_then(|key| self.entity_at(key))
    }

    /// Children of `entity` in insertion order; empty for unknown entities
    pub fn children_of(&self, entity: EntityId) -> Vec<EntityId> {
        self.graph.node_of(entity).map_or_else(Vec::new, |node| {
            node.children().iter().filter_map(|&key| self.entity_at(key)).collect()
        })
    }

    /// Whether `entity` is live in this scene
    pub fn contains(&self, entity: EntityId) -> bool {
        self.graph.key_of(entity).is_some()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.graph.len()
    }

    /// Every live entity, in no particular order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.graph.iter().map(|(_, node)| node.entity())
    }

    /// Destroy every entity and empty the tree
    pub fn unload(&mut self) {
        let count = self.graph.len();
        for entity in self.graph.iter().map(|(_, node)| node.entity()).collect::<Vec<_>>() {
            self.state.destroy_entity(entity);
        }
        self.graph.clear();
        log::debug!("Unloaded scene '{}' ({count} entities)", self.config.name);
    }

    /// Load scene contents from disk
    ///
    /// # Errors
    ///
    /// Always [`SceneError::PersistenceUnsupported`]: no scene file format
    /// exists yet.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref().display().to_string();
        log::warn!("Scene '{}': loading from {path} is not supported", self.config.name);
        Err(SceneError::PersistenceUnsupported(path))
    }

    /// Save scene contents to disk
    ///
    /// # Errors
    ///
    /// Always [`SceneError::PersistenceUnsupported`]: no scene file format
    /// exists yet.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref().display().to_string();
        log::warn!("Scene '{}': saving to {path} is not supported", self.config.name);
        Err(SceneError::PersistenceUnsupported(path))
    }

    /// Consume the scene, keeping its component data
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn entity_at(&self, key: NodeKey) -> Option<EntityId> {
        self.graph.node(key).map(super::SceneNode::entity)
    }

    fn world_of(&self, key: NodeKey) -> Mat4 {
        self.graph
            .node(key)
            .map_or_else(Mat4::identity, |node| *node.world_transform())
    }

    fn propagate(&mut self, start: NodeKey, parent_world: Mat4) {
        let state = &mut self.state;
        self.graph
            .propagate(start, parent_world, |entity, world| sync_transform_component(state, entity, world));
    }
}

/// Write a decomposed world pose into the entity's transform, if it has one
fn sync_transform_component(state: &mut GameState, entity: EntityId, world: &Mat4) {
    let Some(transform) = state.get_component_mut::<TransformComponent>(entity) else {
        return;
    };

    let decomposed = DecomposedMatrix::new(world);
    transform.set_position(decomposed.translation.cast::<f32>());
    transform.set_rotation(decomposed.euler_degrees().cast::<f32>());
    transform.set_scale(decomposed.scale.cast::<f32>());
}
