//! Current world and entity factory handed to scripts
//!
//! Scripts reach "the" world and "the" entity factory through a [`SimContext`]
//! that the host creates and passes to the script engine. Several contexts can
//! coexist, for example one per test.

use crate::core::entity::World;
use crate::factory::EntityFactory;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// World shared between the host and scripts
pub type SharedWorld = Arc<RwLock<World>>;

/// Entity factory shared between the host and scripts
pub type SharedEntityFactory = Arc<EntityFactory>;

/// Wrap a world for sharing with scripts
pub fn shared_world(world: World) -> SharedWorld {
    Arc::new(RwLock::new(world))
}

/// Holder of the current world and entity factory
#[derive(Default)]
pub struct SimContext {
    world: RwLock<Option<SharedWorld>>,
    entity_factory: RwLock<Option<SharedEntityFactory>>,
}

impl SimContext {
    /// Context with neither a world nor a factory set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world_and_factory(world: SharedWorld, entity_factory: SharedEntityFactory) -> Self {
        Self {
            world: RwLock::new(Some(world)),
            entity_factory: RwLock::new(Some(entity_factory)),
        }
    }

    /// Current world, if one has been set
    pub fn world(&self) -> Option<SharedWorld> {
        self.world
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current world; `None` unsets it
    pub fn set_world(&self, world: Option<SharedWorld>) {
        debug!(present = world.is_some(), "Setting current world");
        *self.world.write().unwrap_or_else(PoisonError::into_inner) = world;
    }

    /// Current entity factory, if one has been set
    pub fn entity_factory(&self) -> Option<SharedEntityFactory> {
        self.entity_factory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current entity factory; `None` unsets it
    pub fn set_entity_factory(&self, entity_factory: Option<SharedEntityFactory>) {
        debug!(present = entity_factory.is_some(), "Setting current entity factory");
        *self
            .entity_factory
            .write()
            .unwrap_or_else(PoisonError::into_inner) = entity_factory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let context = SimContext::new();
        assert!(context.world().is_none());
        assert!(context.entity_factory().is_none());
    }

    #[test]
    fn test_set_and_replace_world() {
        let context = SimContext::new();
        let first = shared_world(World::new());
        let second = shared_world(World::new());

        context.set_world(Some(first.clone()));
        assert!(Arc::ptr_eq(&context.world().unwrap(), &first));

        context.set_world(Some(second.clone()));
        assert!(Arc::ptr_eq(&context.world().unwrap(), &second));

        context.set_world(None);
        assert!(context.world().is_none());
    }

    #[test]
    fn test_contexts_are_independent() {
        let factory = Arc::new(EntityFactory::new());
        let a = SimContext::with_world_and_factory(shared_world(World::new()), factory.clone());
        let b = SimContext::new();

        assert!(a.entity_factory().is_some());
        assert!(b.entity_factory().is_none());
        b.set_entity_factory(Some(factory));
        assert!(Arc::ptr_eq(
            &a.entity_factory().unwrap(),
            &b.entity_factory().unwrap()
        ));
    }
}
