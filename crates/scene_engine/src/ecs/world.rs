//! ECS World implementation
//!
//! The world owns entity identity, one [`ComponentStorage`] per component
//! type, named resources, the event queues and the ordered system list.
//! Each `World` is self-contained; two worlds never share any of this state.

use std::any::TypeId;
use std::collections::HashMap;

use slotmap::SlotMap;

use super::component::component_name;
use super::query::{Query, QueryData};
use super::storage::{ComponentStorage, ErasedStorage};
use super::{Component, EcsError, Entity, EventQueue, Resources, System, SystemError};
use crate::config::WorldConfig;

/// Component types attached to a live entity
#[derive(Default)]
struct EntityRecord {
    components: Vec<TypeId>,
}

/// ECS World containing all entities and components
pub struct World {
    config: WorldConfig,
    entities: SlotMap<Entity, EntityRecord>,
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
    resources: Resources,
    events: EventQueue,
    systems: Vec<Box<dyn System>>,
}

impl World {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Create a world with custom configuration
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(config.initial_capacity),
            storages: HashMap::new(),
            resources: Resources::new(),
            events: EventQueue::new(),
            systems: Vec::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(EntityRecord::default())
    }

    /// Create an entity with one component already attached
    pub fn spawn<T: Component>(&mut self, component: T) -> Entity {
        let entity = self.create_entity();
        self.insert_component(entity, component);
        entity
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Destroying a dead or never-allocated entity does nothing. Returns
    /// whether an entity was actually destroyed.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(record) = self.entities.remove(entity) else {
            return false;
        };

        for type_id in record.components {
            match self.storages.get_mut(&type_id) {
                Some(storage) => {
                    storage.remove_entity(entity);
                }
                None => {
                    log::error!("{} listed a component type with no storage", entity);
                    debug_assert!(false, "entity record points at a missing storage");
                }
            }
        }
        true
    }

    /// Whether `entity` is alive in this world
    pub fn entity_exists(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Every live entity, including ones without components
    ///
    /// Built fresh on each call, so it can be walked while destroying.
    pub fn all_entities(&self) -> Vec<Entity> {
        self.entities.keys().collect()
    }

    /// Destroy every entity; resources, events and systems are kept
    pub fn clear(&mut self) {
        let count = self.entities.len();
        self.entities.clear();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
        log::debug!("Cleared {} entities", count);
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach `component` to `entity`, replacing any previous `T`
    ///
    /// Writing to a dead or never-allocated entity fails with
    /// [`EcsError::StaleEntity`] when `strict_entities` is set; otherwise the
    /// component is dropped and a warning is logged.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if !self.entity_exists(entity) {
            if self.config.strict_entities {
                return Err(EcsError::StaleEntity(entity));
            }
            log::warn!(
                "Ignoring {} added to {} which is not alive",
                component_name::<T>(),
                entity
            );
            return Ok(());
        }
        self.insert_component(entity, component);
        Ok(())
    }

    fn insert_component<T: Component>(&mut self, entity: Entity, component: T) {
        let replaced = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .and_then(|storage| storage.insert(entity, component));

        if replaced.is_none() {
            if let Some(record) = self.entities.get_mut(entity) {
                record.components.push(TypeId::of::<T>());
            }
        }
    }

    /// Get a component, or `None` if the entity lacks it (or is not alive)
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a component mutably
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Get a component the caller cannot do without
    pub fn get_required<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.get::<T>(entity).ok_or(EcsError::ComponentNotFound {
            entity,
            component: component_name::<T>(),
        })
    }

    /// Whether `entity` has a `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(entity))
    }

    /// Detach and return `entity`'s `T`
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let removed = self.storage_mut::<T>()?.remove(entity)?;
        if let Some(record) = self.entities.get_mut(entity) {
            record.components.retain(|&type_id| type_id != TypeId::of::<T>());
        }
        Some(removed)
    }

    /// Number of entities holding a `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, ComponentStorage::len)
    }

    pub(crate) fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Live view over entities owning every type in `Q`
    pub fn query<Q: QueryData>(&self) -> Query<'_, Q> {
        Query::new(self)
    }

    /// Snapshot of the entities currently matching `Q`
    pub fn query_entities<Q: QueryData>(&self) -> Vec<Entity> {
        self.query::<Q>().entities()
    }

    /// Mutable iteration over one component type
    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.storage_mut::<T>().into_iter().flat_map(|storage| storage.iter_mut())
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    /// Register a resource; an existing value under `key` is replaced
    pub fn add_resource<T: 'static>(&mut self, key: impl Into<String>, value: T) -> bool {
        self.resources.insert(key, value)
    }

    /// Required resource access, failing with [`EcsError::ResourceNotFound`]
    pub fn resource<T: 'static>(&self, key: &str) -> Result<&T, EcsError> {
        self.resources.get(key)
    }

    /// Required mutable resource access
    pub fn resource_mut<T: 'static>(&mut self, key: &str) -> Result<&mut T, EcsError> {
        self.resources.get_mut(key)
    }

    /// Optional resource access
    pub fn try_resource<T: 'static>(&self, key: &str) -> Option<&T> {
        self.resources.try_get(key)
    }

    /// Optional mutable resource access
    pub fn try_resource_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.resources.try_get_mut(key)
    }

    /// Unregister a resource and return it
    pub fn remove_resource<T: 'static>(&mut self, key: &str) -> Result<T, EcsError> {
        self.resources.remove(key)
    }

    /// Whether a resource is registered under `key`
    pub fn has_resource(&self, key: &str) -> bool {
        self.resources.contains(key)
    }

    /// Lift a resource out of the world for the duration of `f`
    ///
    /// Lets a resource be used together with `&mut World`. Inside `f` the key
    /// is vacant; the value is put back afterwards and wins over anything
    /// registered under the same key in the meantime.
    pub fn resource_scope<T: 'static, R>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut World, &mut T) -> R,
    ) -> Result<R, EcsError> {
        let mut value = self.resources.take_boxed::<T>(key)?;
        let result = f(self, &mut *value);
        if self.resources.contains(key) {
            log::warn!("Resource '{}' was registered inside its own scope; restoring the scoped value", key);
        }
        self.resources.restore(key.to_string(), value);
        Ok(result)
    }

    /// All resources
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Queue an event under `name`
    pub fn emit_event<T: 'static>(&mut self, name: impl Into<String>, payload: T) {
        self.events.emit(name, payload);
    }

    /// Consume pending `T` events for `name`, oldest first
    pub fn drain_events<T: 'static>(&mut self, name: &str) -> Vec<T> {
        self.events.drain(name)
    }

    /// Look at pending `T` events for `name` without consuming them
    pub fn peek_events<T: 'static>(&self, name: &str) -> impl Iterator<Item = &T> {
        self.events.peek(name)
    }

    /// Number of pending events for `name`
    pub fn event_count(&self, name: &str) -> usize {
        self.events.len(name)
    }

    /// Discard pending events for `name`
    pub fn clear_events(&mut self, name: &str) {
        self.events.clear(name);
    }

    // ------------------------------------------------------------------
    // Systems
    // ------------------------------------------------------------------

    /// Register a system; systems run in registration order
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        log::debug!("Registered system '{}'", system.name());
        self.systems.push(Box::new(system));
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run every system once, in registration order
    ///
    /// The first failing system stops the frame and its error is returned.
    /// Systems registered during the frame start running next frame.
    pub fn update_systems(&mut self, delta_time: f32) -> Result<(), SystemError> {
        let mut systems = std::mem::take(&mut self.systems);
        let mut outcome = Ok(());

        for system in &mut systems {
            if let Err(err) = system.run(self, delta_time) {
                log::error!("System '{}' failed: {}", system.name(), err);
                outcome = Err(err);
                break;
            }
        }

        systems.append(&mut self.systems);
        self.systems = systems;
        outcome
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
