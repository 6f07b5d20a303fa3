//! World: the authoritative set of live entities
//!
//! Entities live in a generational `hecs` arena. Handles ([`Entity`]) are
//! plain copyable values that any number of holders can keep; only the world
//! decides whether a handle is still live, and a removed entity's handle never
//! resolves again.

use super::builder::EntityBuilder;
use super::component_set::ComponentSet;
use super::components::{Component, ParentReferenceComponent};
use crate::core::math::{Quaternion, Vector3};
use crate::core::spatial::{
    to_geocentric_orientation, to_geocentric_position, to_lat_lon_alt, LatLonAlt, Orientation,
    Position,
};
use hecs::Entity;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, trace, warn};

static NEXT_WORLD_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a [`World`], distinct for every world created in the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(u64);

impl WorldId {
    fn next() -> Self {
        WorldId(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Whether external physics integration applies to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicsEnabled(pub bool);

/// Errors from operations addressed at a specific entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("entity {0:?} does not exist in this world")]
    NoSuchEntity(Entity),

    #[error("parent reference to {0:?} belongs to another world")]
    ForeignParentReference(Entity),
}

/// Collection of live entities with their spatial state and components
pub struct World {
    inner: hecs::World,
    id: WorldId,
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
            inner: hecs::World::new(),
            id: WorldId::next(),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    fn check_parent_reference(&self, component: &Component) -> Result<(), WorldError> {
        match component {
            Component::ParentReference(reference) if !reference.belongs_to(self.id) => {
                warn!(parent = ?reference.parent(), "Rejected parent reference from another world");
                Err(WorldError::ForeignParentReference(reference.parent()))
            }
            _ => Ok(()),
        }
    }

    /// Like [`add_entity`](Self::add_entity), but refuses a builder holding a
    /// parent reference taken from another world
    pub fn try_add_entity(&mut self, builder: EntityBuilder) -> Result<Entity, WorldError> {
        for component in builder.components().iter() {
            self.check_parent_reference(component)?;
        }
        Ok(self.add_entity(builder))
    }

    /// Adopt a configured entity and return its handle
    ///
    /// Parent references are stored as given; use
    /// [`try_add_entity`](Self::try_add_entity) for builders whose references
    /// may come from another world.
    pub fn add_entity(&mut self, builder: EntityBuilder) -> Entity {
        let (components, position, orientation, dynamics_enabled) = builder.into_parts();
        let component_count = components.len();
        let entity = self.inner.spawn((
            components,
            position,
            orientation,
            DynamicsEnabled(dynamics_enabled),
        ));
        debug!(entity = ?entity, component_count, "Added entity to world");
        entity
    }

    /// Remove an entity; removing one that is not present is a no-op
    ///
    /// Returns whether anything was removed.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        match self.inner.despawn(entity) {
            Ok(()) => {
                debug!(entity = ?entity, "Removed entity from world");
                true
            }
            Err(_) => {
                trace!(entity = ?entity, "Ignoring removal of absent entity");
                false
            }
        }
    }

    /// Remove every entity
    pub fn remove_all_entities(&mut self) {
        let count = self.len();
        self.inner.clear();
        debug!(count, "Removed all entities from world");
    }

    /// Snapshot of the handles of all live entities
    ///
    /// The order is unspecified. The snapshot stays valid to iterate while the
    /// world is mutated; handles of entities removed in the meantime simply
    /// stop resolving.
    pub fn entities(&self) -> Vec<Entity> {
        self.inner.iter().map(|entity| entity.entity()).collect()
    }

    /// Borrowing iterator over views of all live entities
    pub fn iter(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.inner
            .iter()
            .filter_map(|entity| EntityView::new(entity.entity(), entity))
    }

    /// Check if an entity is live in this world
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Read-only view of one entity
    pub fn entity(&self, entity: Entity) -> Result<EntityView<'_>, WorldError> {
        let entity_ref = self
            .inner
            .entity(entity)
            .map_err(|_| WorldError::NoSuchEntity(entity))?;
        EntityView::new(entity, entity_ref).ok_or(WorldError::NoSuchEntity(entity))
    }

    /// Replace the entity's position, keeping the variant the caller supplied
    pub fn set_position(
        &mut self,
        entity: Entity,
        position: impl Into<Position>,
    ) -> Result<(), WorldError> {
        let slot = self
            .inner
            .query_one_mut::<&mut Position>(entity)
            .map_err(|_| WorldError::NoSuchEntity(entity))?;
        *slot = position.into();
        trace!(entity = ?entity, position = ?*slot, "Set position");
        Ok(())
    }

    /// Replace the entity's orientation, keeping the variant the caller supplied
    pub fn set_orientation(
        &mut self,
        entity: Entity,
        orientation: impl Into<Orientation>,
    ) -> Result<(), WorldError> {
        let slot = self
            .inner
            .query_one_mut::<&mut Orientation>(entity)
            .map_err(|_| WorldError::NoSuchEntity(entity))?;
        *slot = orientation.into();
        trace!(entity = ?entity, orientation = ?*slot, "Set orientation");
        Ok(())
    }

    pub fn set_dynamics_enabled(&mut self, entity: Entity, enabled: bool) -> Result<(), WorldError> {
        let slot = self
            .inner
            .query_one_mut::<&mut DynamicsEnabled>(entity)
            .map_err(|_| WorldError::NoSuchEntity(entity))?;
        slot.0 = enabled;
        Ok(())
    }

    /// Append a component to an entity
    ///
    /// No de-duplication happens; adding a second component of the same kind
    /// keeps both.
    pub fn add_component(
        &mut self,
        entity: Entity,
        component: impl Into<Component>,
    ) -> Result<(), WorldError> {
        let component = component.into();
        self.check_parent_reference(&component)?;
        let kind = component.kind();
        self.components_mut(entity)?.push(component);
        debug!(entity = ?entity, kind = %kind, "Added component");
        Ok(())
    }

    /// Mutable access to an entity's components
    pub fn components_mut(&mut self, entity: Entity) -> Result<&mut ComponentSet, WorldError> {
        self.inner
            .query_one_mut::<&mut ComponentSet>(entity)
            .map_err(|_| WorldError::NoSuchEntity(entity))
    }

    /// First live entity whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        let mut query = self.inner.query::<&ComponentSet>();
        let found = query
            .iter()
            .find(|(_, components)| components.name() == name)
            .map(|(entity, _)| entity);
        found
    }

    /// Entities whose dynamics flag is set, for an external integrator
    pub fn dynamic_entities(&self) -> Vec<Entity> {
        let mut query = self.inner.query::<&DynamicsEnabled>();
        let entities = query
            .iter()
            .filter(|(_, dynamics)| dynamics.0)
            .map(|(entity, _)| entity)
            .collect();
        entities
    }

    /// Resolve a parent link, or `None` if the parent has been removed
    pub fn resolve_parent(&self, reference: &ParentReferenceComponent) -> Option<Entity> {
        let parent = reference.parent();
        self.contains(parent).then_some(parent)
    }

    /// Live parent of an entity, from its first parent reference
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        let view = self.entity(entity).ok()?;
        let reference = view.components().get::<ParentReferenceComponent>()?;
        self.resolve_parent(reference)
    }

    /// Live entities that reference `parent`
    pub fn children_of(&self, parent: Entity) -> Vec<Entity> {
        let mut query = self.inner.query::<&ComponentSet>();
        let children = query
            .iter()
            .filter(|(_, components)| {
                components
                    .iter_of::<ParentReferenceComponent>()
                    .any(|reference| reference.parent() == parent)
            })
            .map(|(entity, _)| entity)
            .collect();
        children
    }

    /// Save the current world state to a scene file
    pub fn save_scene<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), crate::io::SceneError> {
        use crate::io::Scene;

        let scene = Scene::from_world(self);
        scene.save_to_file(path)?;
        Ok(())
    }

    /// Load a scene from a file, replacing the current world content
    ///
    /// The world is left untouched if the file cannot be read or the scene
    /// fails to instantiate.
    pub fn load_scene<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<crate::io::EntityMapper, crate::io::SceneError> {
        use crate::io::Scene;

        let scene = Scene::load_from_file(path)?;
        let mut staged = World::new();
        let mapper = scene.instantiate(&mut staged)?;
        *self = staged;
        Ok(mapper)
    }

    /// Load a scene from a file additively, keeping existing entities
    pub fn load_scene_additive<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<crate::io::EntityMapper, crate::io::SceneError> {
        use crate::io::Scene;

        let scene = Scene::load_from_file(path)?;
        scene.instantiate(self)
    }
}

/// Read-only view of a live entity
///
/// Holds a borrow of the world, so the world cannot be mutated while a view
/// exists.
pub struct EntityView<'w> {
    entity: Entity,
    components: hecs::Ref<'w, ComponentSet>,
    position: Position,
    orientation: Orientation,
    dynamics_enabled: bool,
}

impl<'w> EntityView<'w> {
    fn new(entity: Entity, entity_ref: hecs::EntityRef<'w>) -> Option<Self> {
        let components = entity_ref.get::<&ComponentSet>()?;
        let position = entity_ref.get::<&Position>().map(|p| *p).unwrap_or_default();
        let orientation = entity_ref
            .get::<&Orientation>()
            .map(|o| *o)
            .unwrap_or_default();
        let dynamics_enabled = entity_ref
            .get::<&DynamicsEnabled>()
            .map(|d| d.0)
            .unwrap_or(true);
        Some(Self {
            entity,
            components,
            position,
            orientation,
            dynamics_enabled,
        })
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Entity name, or the empty string when it has no name component
    pub fn name(&self) -> &str {
        self.components.name()
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    /// Active position, in whichever representation was last set
    pub fn position(&self) -> Position {
        self.position
    }

    /// Active orientation, in whichever frame was last set
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn dynamics_enabled(&self) -> bool {
        self.dynamics_enabled
    }

    /// Position in the geocentric frame, whatever the active representation
    pub fn geocentric_position(&self) -> Vector3 {
        to_geocentric_position(&self.position).position
    }

    pub fn lat_lon_alt(&self) -> LatLonAlt {
        to_lat_lon_alt(&self.position).position
    }

    /// Orientation in the geocentric frame
    ///
    /// A local-tangent-plane orientation is resolved against the entity's own
    /// position.
    pub fn geocentric_orientation(&self) -> Quaternion {
        to_geocentric_orientation(&self.orientation, self.lat_lon_alt().lat_lon()).orientation
    }

    pub fn components_of_type(&self, type_name: &str) -> Vec<&Component> {
        self.components.components_of_type(type_name)
    }

    pub fn first_component_of_type(&self, type_name: &str) -> Option<&Component> {
        self.components.first_component_of_type(type_name)
    }
}
