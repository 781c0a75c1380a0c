//! World container for entities
//!
//! The World owns every entity's transform. Behaviours reach their own
//! transform (and any referenced entity) through generational keys.

use slotmap::{new_key_type, SlotMap};
use crate::Entity;

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Uses generational indexing: a key to a removed entity returns None
    /// instead of pointing at whatever reused the slot.
    pub struct EntityKey;
}

/// The world containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Add an entity, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    /// Get an entity by key
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable entity by key
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find an entity by name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Find an entity key by name
    pub fn key_by_name(&self, name: &str) -> Option<EntityKey> {
        self.get_by_name(name).map(|(k, _)| k)
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Names of all cameras that are currently enabled
    pub fn active_cameras(&self) -> Vec<&str> {
        self.entities
            .values()
            .filter(|e| e.is_active_camera())
            .map(|e| e.name.as_deref().unwrap_or("<unnamed>"))
            .collect()
    }
}
