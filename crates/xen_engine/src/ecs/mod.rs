//! Entity-Component storage
//!
//! Dense per-type component stores keyed by [`EntityId`], aggregated into a
//! [`GameState`] per world.

pub mod entity;
pub mod component;
pub mod components;
pub mod storage;
pub mod game_state;
mod error;

pub use entity::EntityId;
pub use component::{Component, ComponentKind, ComponentMask, Release};
pub use storage::{ComponentManager, ComponentView};
pub use game_state::{GameComponent, GameState};
pub use error::EcsError;
