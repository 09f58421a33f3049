//! Tag component carrying a human-readable entity name

use crate::ecs::Component;

/// Name attached to an entity for debugging and lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagComponent {
    /// The name
    pub name: String,
}

impl TagComponent {
    /// Create a tag
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for TagComponent {}
