//! ECS Components module
//!
//! The closed set of component types a `GameState` stores.

pub mod transform;
pub mod renderable;
pub mod tag;

pub use transform::TransformComponent;
pub use renderable::{RenderableComponent, MeshHandle, MaterialHandle};
pub use tag::TagComponent;
