//! Dense Component Storage
//!
//! One [`ComponentManager`] exists per component type. Components live in a
//! packed `Vec` with no holes; removal swap-compacts, so lookups, inserts and
//! removals are all O(1) at the cost of a dense order that changes whenever a
//! non-last component is removed.
//!
//! Three co-indexed structures are kept in sync. For every live entity `e`
//! at dense index `i`: `entity_to_index[e] == i`, `index_to_entity[i] == e`
//! and `components[i]` is `e`'s component.

use super::{Component, EcsError, EntityId, Release};
use std::any::type_name;
use std::collections::HashMap;
use std::iter::{Copied, Zip};
use std::slice;

/// Mutable `(entity, component)` pair returned on insertion
#[derive(Debug)]
pub struct ComponentView<'a, T> {
    /// Owner of the component
    pub entity: EntityId,
    /// The freshly inserted component
    pub component: &'a mut T,
}

/// Immutable iterator over `(entity, component)` in dense order
pub type Iter<'a, T> = Zip<Copied<slice::Iter<'a, EntityId>>, slice::Iter<'a, T>>;

/// Mutable iterator over `(entity, component)` in dense order
pub type IterMut<'a, T> = Zip<Copied<slice::Iter<'a, EntityId>>, slice::IterMut<'a, T>>;

/// Packed store mapping [`EntityId`] to one component of type `T`
#[derive(Debug, Clone)]
pub struct ComponentManager<T: Component> {
    components: Vec<T>,
    entity_to_index: HashMap<EntityId, usize>,
    index_to_entity: Vec<EntityId>,
}

impl<T: Component> ComponentManager<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entity_to_index: HashMap::new(),
            index_to_entity: Vec::new(),
        }
    }

    /// Append a default component for `entity`
    ///
    /// # Errors
    ///
    /// [`EcsError::DuplicateComponent`] if the entity already has one (the
    /// store is left untouched), [`EcsError::InvalidEntity`] for the sentinel.
    pub fn add_component(&mut self, entity: EntityId) -> Result<ComponentView<'_, T>, EcsError> {
        self.insert_component(entity, T::default())
    }

    /// Append `component` for `entity`
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_component`].
    pub fn insert_component(&mut self, entity: EntityId, component: T) -> Result<ComponentView<'_, T>, EcsError> {
        if !entity.is_valid() {
            return Err(EcsError::InvalidEntity(type_name::<T>()));
        }
        if self.entity_to_index.contains_key(&entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }

        let index = self.components.len();
        self.components.push(component);
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, index);

        Ok(ComponentView {
            entity,
            component: &mut self.components[index],
        })
    }

    /// Remove `entity`'s component, returning it
    ///
    /// The last component is moved into the vacated slot. Returns `None`
    /// without touching the store when the entity has no component.
    pub fn remove_component(&mut self, entity: EntityId) -> Option<T> {
        let index = self.entity_to_index.remove(&entity)?;

        let removed = self.components.swap_remove(index);
        self.index_to_entity.swap_remove(index);
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }

        Some(removed)
    }

    /// Get `entity`'s component
    pub fn get_component(&self, entity: EntityId) -> Option<&T> {
        self.entity_to_index.get(&entity).map(|&index| &self.components[index])
    }

    /// Get `entity`'s component mutably
    pub fn get_component_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        let index = *self.entity_to_index.get(&entity)?;
        self.components.get_mut(index)
    }

    /// Reverse lookup: which entity owns this component?
    ///
    /// Works from the reference's address relative to the dense array, so it
    /// only answers correctly for a reference taken from this store with no
    /// add or remove in between. The borrow checker guarantees that for a
    /// live `&T`; an address smuggled out some other way gets no such help,
    /// since any mutation may reallocate or reorder the array. Returns `None`
    /// for references that do not point into this store.
    pub fn entity_of(&self, component: &T) -> Option<EntityId> {
        let size = std::mem::size_of::<T>();
        if size == 0 {
            return None;
        }

        let base = self.components.as_ptr() as usize;
        let address = std::ptr::from_ref(component) as usize;
        let offset = address.checked_sub(base)?;
        if offset % size != 0 {
            return None;
        }
        self.index_to_entity.get(offset / size).copied()
    }

    /// Dense index of `entity`'s component
    pub fn index_of(&self, entity: EntityId) -> Option<usize> {
        self.entity_to_index.get(&entity).copied()
    }

    /// Whether `entity` has a component here
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Owners in dense order
    pub fn entities(&self) -> &[EntityId] {
        &self.index_to_entity
    }

    /// Components in dense order
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Iterate `(entity, &component)` in dense order
    pub fn iter(&self) -> Iter<'_, T> {
        self.index_to_entity.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, &mut component)` in dense order
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.index_to_entity.iter().copied().zip(self.components.iter_mut())
    }
}

impl<T: Component + Release> ComponentManager<T> {
    /// Release every live component once
    pub fn release_resources(&mut self) {
        for component in &mut self.components {
            component.release();
        }
        log::debug!(
            "Released {} `{}` component(s)",
            self.components.len(),
            type_name::<T>()
        );
    }
}

impl<T: Component> Default for ComponentManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Component> IntoIterator for &'a ComponentManager<T> {
    type Item = (EntityId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Component> IntoIterator for &'a mut ComponentManager<T> {
    type Item = (EntityId, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Health(i32);

    impl Component for Health {}

    #[derive(Debug, Clone, Default)]
    struct GpuHandle {
        releases: u32,
    }

    impl Component for GpuHandle {}

    impl Release for GpuHandle {
        fn release(&mut self) {
            self.releases += 1;
        }
    }

    fn e(value: u64) -> EntityId {
        EntityId::new(value)
    }

    fn store_with(values: &[(u64, i32)]) -> ComponentManager<Health> {
        let mut store = ComponentManager::new();
        for &(entity, hp) in values {
            store.insert_component(e(entity), Health(hp)).unwrap();
        }
        store
    }

    fn assert_consistent(store: &ComponentManager<Health>) {
        assert_eq!(store.entities().len(), store.len());
        for (index, &entity) in store.entities().iter().enumerate() {
            assert_eq!(store.index_of(entity), Some(index));
        }
    }

    #[test]
    fn test_add_returns_default_view() {
        let mut store: ComponentManager<Health> = ComponentManager::new();
        let view = store.add_component(e(1)).unwrap();
        assert_eq!(view.entity, e(1));
        assert_eq!(*view.component, Health(0));
        view.component.0 = 10;

        assert_eq!(store.get_component(e(1)), Some(&Health(10)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_then_remove() {
        let mut store = store_with(&[(1, 10), (2, 20), (3, 30)]);
        let before = store.len();

        assert_eq!(store.remove_component(e(2)), Some(Health(20)));
        assert!(store.get_component(e(2)).is_none());
        assert_eq!(store.len(), before - 1);
        assert_consistent(&store);
    }

    #[test]
    fn test_swap_removal_moves_last_into_hole() {
        let mut store = store_with(&[(1, 10), (2, 20), (3, 30), (4, 40)]);
        assert_eq!(store.index_of(e(2)), Some(1));

        store.remove_component(e(2));

        assert_eq!(store.index_of(e(4)), Some(1));
        assert_eq!(store.entities()[1], e(4));
        assert_eq!(store.get_component(e(4)), Some(&Health(40)));
        assert_eq!(store.components()[1], Health(40));
        assert_consistent(&store);
    }

    #[test]
    fn test_remove_last_slot() {
        let mut store = store_with(&[(1, 10), (2, 20)]);

        store.remove_component(e(2));

        assert_eq!(store.entities(), &[e(1)]);
        assert_eq!(store.get_component(e(1)), Some(&Health(10)));
        assert_consistent(&store);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store_with(&[(1, 10)]);

        assert_eq!(store.remove_component(e(99)), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_component(e(1)), Some(&Health(10)));
    }

    #[test]
    fn test_missing_lookups_return_none() {
        let mut store: ComponentManager<Health> = ComponentManager::new();
        assert!(store.get_component(e(5)).is_none());
        assert!(store.get_component_mut(e(5)).is_none());
        assert!(store.get_component(EntityId::INVALID).is_none());
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut store = store_with(&[(1, 10), (2, 20)]);

        let err = store.add_component(e(1)).unwrap_err();
        assert!(matches!(err, EcsError::DuplicateComponent { entity, .. } if entity == e(1)));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_component(e(1)), Some(&Health(10)));
        assert_consistent(&store);

        // The original slot is still removable and nothing is orphaned
        store.remove_component(e(1));
        assert_eq!(store.len(), 1);
        assert!(store.get_component(e(1)).is_none());
    }

    #[test]
    fn test_invalid_entity_is_rejected() {
        let mut store: ComponentManager<Health> = ComponentManager::new();
        assert!(matches!(
            store.add_component(EntityId::INVALID),
            Err(EcsError::InvalidEntity(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_entity_of_reverse_lookup() {
        let store = store_with(&[(1, 10), (2, 20), (3, 30)]);

        let component = store.get_component(e(3)).unwrap();
        assert_eq!(store.entity_of(component), Some(e(3)));

        let foreign = Health(30);
        assert_eq!(store.entity_of(&foreign), None);
    }

    #[test]
    fn test_iteration_is_dense_and_restartable() {
        let mut store = store_with(&[(1, 10), (2, 20), (3, 30)]);

        let first: Vec<_> = store.iter().map(|(entity, hp)| (entity, hp.0)).collect();
        let second: Vec<_> = (&store).into_iter().map(|(entity, hp)| (entity, hp.0)).collect();
        assert_eq!(first, vec![(e(1), 10), (e(2), 20), (e(3), 30)]);
        assert_eq!(first, second);

        for (_, hp) in &mut store {
            hp.0 += 1;
        }
        assert_eq!(store.get_component(e(2)), Some(&Health(21)));

        store.remove_component(e(1));
        let after: Vec<_> = store.iter().map(|(entity, _)| entity).collect();
        assert_eq!(after, vec![e(3), e(2)]);
    }

    #[test]
    fn test_release_resources_once_per_live_component() {
        let mut store: ComponentManager<GpuHandle> = ComponentManager::new();
        for id in 1..=3 {
            store.add_component(e(id)).unwrap();
        }
        store.remove_component(e(2));

        store.release_resources();

        assert!(store.iter().all(|(_, handle)| handle.releases == 1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = store_with(&[(1, 10)]);
        let mut copy = original.clone();

        copy.get_component_mut(e(1)).unwrap().0 = 99;
        copy.remove_component(e(1));

        assert_eq!(original.get_component(e(1)), Some(&Health(10)));
        assert!(copy.is_empty());
    }
}
