//! Scene id to entity mapping used while loading scenes

use hecs::Entity;
use std::collections::HashMap;
use tracing::trace;

/// Maps scene-local ids to the entities created for them
///
/// Ids in a scene file are positions in its entity list. Loading spawns one
/// entity per id and records the pair here, so parent references can be
/// resolved and callers can find what was created.
#[derive(Debug, Default)]
pub struct EntityMapper {
    mapping: HashMap<u64, Entity>,
}

impl EntityMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entity created for `scene_id`, replacing any earlier one
    pub fn register(&mut self, scene_id: u64, entity: Entity) {
        trace!(scene_id, entity = ?entity, "Registering entity mapping");
        self.mapping.insert(scene_id, entity);
    }

    /// Entity created for a scene id
    pub fn remap(&self, scene_id: u64) -> Option<Entity> {
        self.mapping.get(&scene_id).copied()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// All entities created for the scene
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.mapping.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, Entity)> + '_ {
        self.mapping.iter().map(|(&id, &entity)| (id, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_mapper_basic() {
        let mut mapper = EntityMapper::new();
        assert!(mapper.is_empty());

        let entity = Entity::DANGLING;
        mapper.register(42, entity);

        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.remap(42), Some(entity));
        assert_eq!(mapper.remap(99), None);
    }

    #[test]
    fn test_entity_mapper_overwrite() {
        let mut world = hecs::World::new();
        let first = world.spawn(());
        let second = world.spawn(());

        let mut mapper = EntityMapper::new();
        mapper.register(1, first);
        mapper.register(1, second);

        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.remap(1), Some(second));
        assert_eq!(mapper.iter().collect::<Vec<_>>(), vec![(1, second)]);
    }
}
