//! Component traits and the closed set of known component kinds

use bitflags::bitflags;
use std::fmt;

/// Marker trait for components
///
/// Every component is default constructible (stores append `T::default()`)
/// and clonable (a [`GameState`](crate::ecs::GameState) snapshot copies every
/// store by value).
pub trait Component: Clone + Default + 'static {}

/// Capability for components that own something needing explicit cleanup.
///
/// Only stores whose component implements this trait expose
/// [`ComponentManager::release_resources`](crate::ecs::ComponentManager::release_resources);
/// calling it on any other store does not compile.
pub trait Release {
    /// Give back whatever this component holds. Must be total.
    fn release(&mut self);
}

/// The closed set of component types a [`GameState`](crate::ecs::GameState) stores.
///
/// Extending the set means adding a variant here, a store on `GameState`,
/// and a [`GameComponent`](crate::ecs::GameComponent) impl. Every `match` on
/// the kind in `GameState` then fails to compile until the new variant is
/// handled, including `release_all_resources` for types that implement
/// [`Release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// [`TransformComponent`](crate::ecs::components::TransformComponent)
    Transform,
    /// [`RenderableComponent`](crate::ecs::components::RenderableComponent)
    Renderable,
    /// [`TagComponent`](crate::ecs::components::TagComponent)
    Tag,
}

impl ComponentKind {
    /// Every known kind, in declaration order
    pub const ALL: [Self; 3] = [Self::Transform, Self::Renderable, Self::Tag];

    /// Mask bit for this kind
    pub const fn mask(self) -> ComponentMask {
        match self {
            Self::Transform => ComponentMask::TRANSFORM,
            Self::Renderable => ComponentMask::RENDERABLE,
            Self::Tag => ComponentMask::TAG,
        }
    }

    /// Short human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Renderable => "renderable",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of component kinds held by one entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u32 {
        /// Has a transform
        const TRANSFORM = 1 << 0;
        /// Has a renderable
        const RENDERABLE = 1 << 1;
        /// Has a tag
        const TAG = 1 << 2;
    }
}
