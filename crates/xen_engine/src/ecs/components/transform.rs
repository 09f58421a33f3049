//! Transform component for the ECS system
//!
//! The entity-local TRS that gameplay code mutates directly. The scene graph
//! keeps its own authoritative local/world matrices and writes the decomposed
//! world pose back here after every propagation pass.

use crate::ecs::Component;
use crate::foundation::math::{self, Mat4, Vec3};

/// ECS Transform component
///
/// Rotation is stored as Euler degrees `(pitch, yaw, roll)`; see
/// [`math`](crate::foundation::math) for the axis convention. The composed
/// matrix is cached and only rebuilt by [`TransformComponent::update`] after
/// a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    transform: Mat4,
    needs_update: bool,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            transform: Mat4::identity(),
            needs_update: true,
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Builder pattern: Set rotation from Euler degrees
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.needs_update = true;
    }

    /// Set the rotation in Euler degrees `(pitch, yaw, roll)`
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.needs_update = true;
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.needs_update = true;
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current rotation in Euler degrees `(pitch, yaw, roll)`
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Current scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Offset the position
    pub fn translate(&mut self, translation: Vec3) {
        self.position += translation;
        self.needs_update = true;
    }

    /// Add to each Euler angle (degrees)
    pub fn rotate(&mut self, rotation: Vec3) {
        self.rotation += rotation;
        self.needs_update = true;
    }

    /// Add to each scale factor
    pub fn scale_by(&mut self, scale: Vec3) {
        self.scale += scale;
        self.needs_update = true;
    }

    /// Whether the cached matrix is stale
    pub fn is_dirty(&self) -> bool {
        self.needs_update
    }

    /// Rebuild the cached matrix if anything changed since the last call
    pub fn update(&mut self) {
        if self.needs_update {
            self.transform = math::compose_trs(&self.position, &self.rotation, &self.scale);
            self.needs_update = false;
        }
    }

    /// Cached composed matrix (`T * R * S`) as of the last [`Self::update`]
    pub fn transform_matrix(&self) -> Mat4 {
        self.transform
    }

    /// Inverse of the cached matrix, identity if singular
    pub fn inverse_transform_matrix(&self) -> Mat4 {
        math::inverse_or_identity(&self.transform)
    }
}
