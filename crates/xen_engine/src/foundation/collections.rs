//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generation-checked handle to a node in the scene arena.
    ///
    /// A key whose node has been removed no longer resolves, so a stale
    /// parent link is detected instead of dangling.
    pub struct NodeKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
