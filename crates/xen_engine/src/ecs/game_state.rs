//! Game state: every component store of one world plus entity allocation

use super::components::{RenderableComponent, TagComponent, TransformComponent};
use super::{
    Component, ComponentKind, ComponentManager, ComponentMask, ComponentView, EcsError, EntityId,
    Release,
};

/// Registry entry tying a component type to its store on [`GameState`]
///
/// This is how generic accessors such as [`GameState::get_component`]
/// dispatch over the closed set of [`ComponentKind`]s.
pub trait GameComponent: Component {
    /// Enum tag of this component type
    const KIND: ComponentKind;

    /// The store holding this type
    fn store(state: &GameState) -> &ComponentManager<Self>;

    /// The store holding this type, mutably
    fn store_mut(state: &mut GameState) -> &mut ComponentManager<Self>;
}

macro_rules! register_component {
    ($component:ty, $kind:expr, $field:ident) => {
        impl GameComponent for $component {
            const KIND: ComponentKind = $kind;

            fn store(state: &GameState) -> &ComponentManager<Self> {
                &state.$field
            }

            fn store_mut(state: &mut GameState) -> &mut ComponentManager<Self> {
                &mut state.$field
            }
        }
    };
}

register_component!(TransformComponent, ComponentKind::Transform, transforms);
register_component!(RenderableComponent, ComponentKind::Renderable, renderables);
register_component!(TagComponent, ComponentKind::Tag, tags);

/// All component data of one world
///
/// Entity ids come from a monotonically increasing counter, so a destroyed
/// id is never handed out again. [`Clone`] produces a fully independent
/// snapshot: the counter and every store are copied by value.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    next_id: u64,
    transforms: ComponentManager<TransformComponent>,
    renderables: ComponentManager<RenderableComponent>,
    tags: ComponentManager<TagComponent>,
}

impl GameState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, never reused entity id
    pub fn create_entity(&mut self) -> EntityId {
        self.next_id += 1;
        debug_assert!(self.next_id != u64::MAX, "entity id space exhausted");
        EntityId::new(self.next_id)
    }

    /// The id the next [`Self::create_entity`] call will return
    pub const fn next_entity_id(&self) -> EntityId {
        EntityId::new(self.next_id + 1)
    }

    /// Remove the entity's component from every store
    pub fn destroy_entity(&mut self, entity: EntityId) {
        let mut removed = ComponentMask::empty();
        for kind in ComponentKind::ALL {
            if self.remove_kind(entity, kind) {
                removed |= kind.mask();
            }
        }
        log::trace!("Destroyed {entity} (components: {removed:?})");
    }

    /// Add a default `T` for `entity`
    ///
    /// # Errors
    ///
    /// See [`ComponentManager::add_component`].
    pub fn add_component<T: GameComponent>(&mut self, entity: EntityId) -> Result<ComponentView<'_, T>, EcsError> {
        T::store_mut(self).add_component(entity)
    }

    /// Add `component` for `entity`
    ///
    /// # Errors
    ///
    /// See [`ComponentManager::insert_component`].
    pub fn insert_component<T: GameComponent>(
        &mut self,
        entity: EntityId,
        component: T,
    ) -> Result<ComponentView<'_, T>, EcsError> {
        T::store_mut(self).insert_component(entity, component)
    }

    /// Remove `entity`'s `T`, if any
    pub fn remove_component<T: GameComponent>(&mut self, entity: EntityId) -> Option<T> {
        T::store_mut(self).remove_component(entity)
    }

    /// Get `entity`'s `T`
    pub fn get_component<T: GameComponent>(&self, entity: EntityId) -> Option<&T> {
        T::store(self).get_component(entity)
    }

    /// Get `entity`'s `T` mutably
    pub fn get_component_mut<T: GameComponent>(&mut self, entity: EntityId) -> Option<&mut T> {
        T::store_mut(self).get_component_mut(entity)
    }

    /// The whole store for `T`
    pub fn components<T: GameComponent>(&self) -> &ComponentManager<T> {
        T::store(self)
    }

    /// The whole store for `T`, mutably
    pub fn components_mut<T: GameComponent>(&mut self) -> &mut ComponentManager<T> {
        T::store_mut(self)
    }

    /// Whether `entity` holds a component of `kind`
    pub fn has_component_kind(&self, entity: EntityId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(entity),
            ComponentKind::Renderable => self.renderables.contains(entity),
            ComponentKind::Tag => self.tags.contains(entity),
        }
    }

    /// Every kind `entity` holds
    pub fn component_mask(&self, entity: EntityId) -> ComponentMask {
        ComponentKind::ALL
            .into_iter()
            .filter(|&kind| self.has_component_kind(entity, kind))
            .fold(ComponentMask::empty(), |mask, kind| mask | kind.mask())
    }

    /// Release every component type that has the release capability
    pub fn release_all_resources(&mut self) {
        for kind in ComponentKind::ALL {
            match kind {
                ComponentKind::Renderable => self.release_store::<RenderableComponent>(),
                ComponentKind::Transform | ComponentKind::Tag => {}
            }
        }
    }

    fn release_store<T: GameComponent + Release>(&mut self) {
        T::store_mut(self).release_resources();
    }

    fn remove_kind(&mut self, entity: EntityId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.remove_component(entity).is_some(),
            ComponentKind::Renderable => self.renderables.remove_component(entity).is_some(),
            ComponentKind::Tag => self.tags.remove_component(entity).is_some(),
        }
    }
}
