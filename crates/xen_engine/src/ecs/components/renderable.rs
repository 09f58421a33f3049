//! Renderable component for entities that can be rendered
//!
//! Holds opaque handles into the external renderer. The scene core never
//! dereferences them; it only hands them back through [`Release`] when the
//! owning world is torn down.

use crate::ecs::{Component, Release};

/// Opaque handle to a mesh owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a material owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableComponent {
    /// Mesh to draw, `None` once released
    pub mesh: Option<MeshHandle>,

    /// Material to draw with, `None` once released
    pub material: Option<MaterialHandle>,

    /// Whether this object is visible
    pub visible: bool,

    /// Rendering layer for sorting (higher values render later)
    pub render_layer: u8,
}

impl Default for RenderableComponent {
    fn default() -> Self {
        Self {
            mesh: None,
            material: None,
            visible: true,
            render_layer: 0,
        }
    }
}

impl RenderableComponent {
    /// Create a new renderable component
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Default::default()
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible && self.mesh.is_some() && self.material.is_some()
    }

    /// Set render layer
    pub fn set_render_layer(&mut self, layer: u8) {
        self.render_layer = layer;
    }
}

impl Component for RenderableComponent {}

impl Release for RenderableComponent {
    fn release(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            log::trace!("Releasing mesh handle {}", mesh.0);
        }
        if let Some(material) = self.material.take() {
            log::trace!("Releasing material handle {}", material.0);
        }
    }
}
