//! # Xen Engine
//!
//! Scene graph and entity-component core for a game engine.
//!
//! ## Features
//!
//! - **ECS Storage**: Dense per-type component stores with O(1) add/remove/lookup
//! - **Scene Graph**: Parent/child hierarchy with cached world transforms
//! - **Pose Preservation**: Reparenting keeps world placement intact
//! - **Configuration**: TOML/RON engine and scene settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xen_engine::prelude::*;
//!
//! let mut scene = Scene::new("Level 1", GameState::new());
//! let root = scene.create_entity(None);
//! let ship = scene.create_entity(Some(root));
//!
//! scene.set_world_transform(root, &Mat4::new_translation(&Vec3::new(0.0, 5.0, 0.0)));
//! let ship_world = scene.get_world_transform(ship);
//! assert_eq!(ship_world, scene.get_world_transform(root));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig, SceneConfig},
        ecs::{
            components::{MaterialHandle, MeshHandle, RenderableComponent, TagComponent, TransformComponent},
            Component, ComponentKind, ComponentManager, ComponentMask, EcsError, EntityId, GameComponent,
            GameState, Release,
        },
        foundation::math::{Mat4, Quat, Vec3},
        scene::{Scene, SceneError, SceneGraph},
    };
}
