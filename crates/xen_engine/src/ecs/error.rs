//! ECS error types

use super::EntityId;

/// Errors raised by component stores
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity already holds a component of this type
    #[error("{entity} already has a `{component}` component")]
    DuplicateComponent {
        /// Entity that was targeted
        entity: EntityId,
        /// Type name of the existing component
        component: &'static str,
    },

    /// The invalid sentinel cannot own components
    #[error("cannot attach a `{0}` component to the invalid entity")]
    InvalidEntity(&'static str),
}
