//! Scene management system
//!
//! A scene pairs the ECS game state with a spatial hierarchy. Every live
//! entity has exactly one node; nodes carry a local transform relative to
//! their parent and a cached world transform.
//!
//! ## Architecture
//!
//! ```text
//! Scene (Bridge)
//!   ├── GameState   (component stores, entity ids)
//!   └── SceneGraph  (node arena, parent/child links)
//! ```
//!
//! The Scene:
//! - Keeps `world = parent.world * local` for every node after each call
//! - Preserves world poses across reparenting
//! - Mirrors world poses into `TransformComponent` as position/rotation/scale
//! - Cascades entity removal down the subtree

mod error;
mod node;
mod scene_graph;
mod scene_manager;

pub use error::SceneError;
pub use node::SceneNode;
pub use scene_graph::SceneGraph;
pub use scene_manager::Scene;
