//! Entity implementation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier
///
/// An opaque, totally ordered 64-bit handle. `u64::MAX` is reserved as the
/// invalid sentinel and is what [`Default`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId {
    value: u64,
}

impl EntityId {
    /// The reserved invalid entity
    pub const INVALID: Self = Self { value: u64::MAX };

    /// Wrap a raw id value
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    /// Get the raw id value
    pub const fn value(self) -> u64 {
        self.value
    }

    /// Whether this is anything other than the sentinel
    pub const fn is_valid(self) -> bool {
        self.value != Self::INVALID.value
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Entity({})", self.value)
        } else {
            f.write_str("Entity(invalid)")
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
