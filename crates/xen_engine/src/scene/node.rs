//! Scene node data

use crate::ecs::EntityId;
use crate::foundation::collections::NodeKey;
use crate::foundation::math::Mat4;

/// One spatial node of the scene tree
///
/// Invariant once a mutating scene call returns:
/// `world = (parent ? parent.world : identity) * local`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub(super) entity: EntityId,
    pub(super) children: Vec<NodeKey>,
    pub(super) parent: Option<NodeKey>,
    pub(super) local_transform: Mat4,
    pub(super) world_transform: Mat4,
}

impl SceneNode {
    pub(super) fn new(entity: EntityId) -> Self {
        Self {
            entity,
            children: Vec::new(),
            parent: None,
            local_transform: Mat4::identity(),
            world_transform: Mat4::identity(),
        }
    }

    /// Entity mirrored by this node
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Parent handle, if attached
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Pose relative to the parent
    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    /// Cached pose relative to the scene origin
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }
}
