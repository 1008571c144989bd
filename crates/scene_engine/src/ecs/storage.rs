//! Per-type component storage
//!
//! Every component type owns one dense store. Components sit in a packed
//! array next to the entity that owns them, so "every entity with X" walks
//! only the entities that actually have X.

use std::any::Any;
use std::collections::HashMap;

use super::{Component, Entity};

/// Dense storage for a single component type
pub struct ComponentStorage<T: Component> {
    entities: Vec<Entity>,
    components: Vec<T>,
    index: HashMap<Entity, usize>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            components: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a component, returning the one it replaced
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&slot) = self.index.get(&entity) {
            return Some(std::mem::replace(&mut self.components[slot], component));
        }
        self.index.insert(entity, self.entities.len());
        self.entities.push(entity);
        self.components.push(component);
        None
    }

    /// Remove the component owned by `entity`
    ///
    /// The last element is swapped into the hole, so iteration order changes.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        self.entities.swap_remove(slot);
        let removed = self.components.swap_remove(slot);
        if let Some(&moved) = self.entities.get(slot) {
            self.index.insert(moved, slot);
        }
        Some(removed)
    }

    /// Get a component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).map(|&slot| &self.components[slot])
    }

    /// Get a component mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.index.get(&entity) {
            Some(&slot) => Some(&mut self.components[slot]),
            None => None,
        }
    }

    /// Whether `entity` has a component in this storage
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Owning entities in storage order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(entity, component)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, component)` pairs mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`] held by the world
pub(crate) trait ErasedStorage {
    /// Drop whatever `entity` owns here; returns whether anything was removed
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Remove every component
    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.index.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
