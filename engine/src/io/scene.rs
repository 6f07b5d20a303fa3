//! Scene serialization and loading

use crate::core::entity::{EntityBuilder, World};
use crate::core::spatial::{Orientation, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::component_data::ComponentData;
use super::entity_mapper::EntityMapper;

/// Snapshot of the entities of a world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Entities in id order; an entity's id is its index in this list
    pub entities: Vec<SerializedEntity>,
}

/// A single serialized entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEntity {
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_dynamics_enabled")]
    pub dynamics_enabled: bool,
    #[serde(default)]
    pub components: Vec<ComponentData>,
}

fn default_dynamics_enabled() -> bool {
    true
}

/// Errors that can occur during scene operations
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity with ID {0} not found in scene")]
    EntityNotFound(u64),
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every entity of a world
    ///
    /// Parent references to entities that are no longer live are dropped.
    pub fn from_world(world: &World) -> Self {
        let views: Vec<_> = world.iter().collect();
        let ids: HashMap<_, _> = views
            .iter()
            .enumerate()
            .map(|(id, view)| (view.entity(), id as u64))
            .collect();

        debug!(entity_count = ids.len(), "Assigned IDs to entities");

        let entities = views
            .iter()
            .map(|view| {
                let components = view
                    .components()
                    .iter()
                    .filter_map(|component| {
                        let data =
                            ComponentData::from_component(component, |e| ids.get(&e).copied());
                        if data.is_none() {
                            warn!(
                                entity = ?view.entity(),
                                "Parent entity not found in world, dropping reference"
                            );
                        }
                        data
                    })
                    .collect();
                SerializedEntity {
                    position: view.position(),
                    orientation: view.orientation(),
                    dynamics_enabled: view.dynamics_enabled(),
                    components,
                }
            })
            .collect::<Vec<_>>();

        info!(entity_count = entities.len(), "Created scene from world");
        Scene { entities }
    }

    /// Add this scene's entities to a world
    ///
    /// Entities are spawned before any component is attached, so a parent
    /// reference may point at an entity later in the list. On error the
    /// entities spawned so far are removed again.
    pub fn instantiate(&self, world: &mut World) -> Result<EntityMapper, SceneError> {
        let mut mapper = EntityMapper::new();

        info!(entity_count = self.entities.len(), "Instantiating scene");

        for (id, serialized) in self.entities.iter().enumerate() {
            let builder = EntityBuilder::new()
                .with_position(serialized.position)
                .with_orientation(serialized.orientation)
                .with_dynamics_enabled(serialized.dynamics_enabled);
            let entity = world.add_entity(builder);
            mapper.register(id as u64, entity);
        }

        if let Err(e) = self.attach_components(world, &mapper) {
            for entity in mapper.entities() {
                world.remove_entity(entity);
            }
            return Err(e);
        }

        info!("Scene instantiation complete");
        Ok(mapper)
    }

    fn attach_components(&self, world: &mut World, mapper: &EntityMapper) -> Result<(), SceneError> {
        for (id, serialized) in self.entities.iter().enumerate() {
            let id = id as u64;
            let entity = mapper.remap(id).ok_or(SceneError::EntityNotFound(id))?;
            let components = world
                .components_mut(entity)
                .map_err(|_| SceneError::EntityNotFound(id))?;
            for data in &serialized.components {
                components.push(data.clone().into_component(|id| mapper.remap(id))?);
            }
        }
        Ok(())
    }

    /// Save this scene to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Saving scene to file");

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!(path = ?path, "Scene saved successfully");
        Ok(())
    }

    /// Load a scene from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading scene from file");

        let json = fs::read_to_string(path)?;
        let scene = serde_json::from_str(&json)?;

        info!(path = ?path, "Scene loaded successfully");
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{
        MainRotorComponent, NameComponent, OrbitComponent, ParentReferenceComponent,
    };
    use crate::core::math::{Quaternion, Vector3};
    use crate::core::spatial::{LatLonAlt, LtpNedOrientation, Orbit};

    #[test]
    fn test_scene_round_trip() {
        let mut world = World::new();
        let parent = world.add_entity(
            EntityBuilder::new()
                .with_component(NameComponent::new("parent"))
                .with_component(OrbitComponent::new(Orbit::circular(7.0e6, 0.3)))
                .with_position(Vector3::new(1.0, 2.0, 3.0)),
        );
        world.add_entity(
            EntityBuilder::new()
                .with_component(NameComponent::new("child"))
                .with_component(ParentReferenceComponent::new(parent))
                .with_position(LatLonAlt::from_degrees(10.0, 20.0, 500.0))
                .with_orientation(LtpNedOrientation::new(Quaternion::from_rotation_z(1.0)))
                .with_dynamics_enabled(false),
        );

        let scene = Scene::from_world(&world);
        let mut new_world = World::new();
        scene.instantiate(&mut new_world).unwrap();

        assert_eq!(new_world.len(), 2);
        let new_parent = new_world.find_by_name("parent").unwrap();
        let new_child = new_world.find_by_name("child").unwrap();
        assert_eq!(new_world.parent_of(new_child), Some(new_parent));

        let child_view = new_world.entity(new_child).unwrap();
        assert_eq!(
            child_view.position(),
            Position::from(LatLonAlt::from_degrees(10.0, 20.0, 500.0))
        );
        assert!(!child_view.orientation().is_geocentric());
        assert!(!child_view.dynamics_enabled());

        let parent_view = new_world.entity(new_parent).unwrap();
        assert_eq!(
            parent_view.components().get::<OrbitComponent>().unwrap().orbit,
            Orbit::circular(7.0e6, 0.3)
        );
    }

    #[test]
    fn test_forward_parent_reference() {
        let json = r#"{
            "entities": [
                {"components": [
                    {"type": "NameComponent", "name": "child"},
                    {"type": "ParentReferenceComponent", "entity_id": 1}
                ]},
                {"components": [{"type": "NameComponent", "name": "parent"}]}
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        let mut world = World::new();
        let mapper = scene.instantiate(&mut world).unwrap();

        let child = mapper.remap(0).unwrap();
        assert_eq!(world.parent_of(child), mapper.remap(1));
        assert!(world.entity(child).unwrap().dynamics_enabled());
    }

    #[test]
    fn test_missing_parent_id_rolls_back() {
        let json = r#"{
            "entities": [
                {"components": [{"type": "ParentReferenceComponent", "entity_id": 5}]}
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        let mut world = World::new();

        let result = scene.instantiate(&mut world);
        assert!(matches!(result, Err(SceneError::EntityNotFound(5))));
        assert!(world.is_empty());
    }

    #[test]
    fn test_unknown_component_type_is_rejected() {
        let json = r#"{"entities": [{"components": [{"type": "Camera"}]}]}"#;
        assert!(serde_json::from_str::<Scene>(json).is_err());
    }

    #[test]
    fn test_empty_scene() {
        let scene: Scene = serde_json::from_str(r#"{"entities": []}"#).unwrap();
        let mut world = World::new();
        let mapper = scene.instantiate(&mut world).unwrap();
        assert!(mapper.is_empty());
        assert!(world.is_empty());
    }

    #[test]
    fn test_dead_parent_dropped_on_save() {
        let mut world = World::new();
        let parent = world.add_entity(EntityBuilder::new());
        world.add_entity(
            EntityBuilder::new()
                .with_component(ParentReferenceComponent::new(parent))
                .with_component(MainRotorComponent::default()),
        );
        world.remove_entity(parent);

        let scene = Scene::from_world(&world);
        assert_eq!(scene.entities.len(), 1);
        assert_eq!(
            scene.entities[0].components,
            vec![ComponentData::MainRotorComponent(MainRotorComponent::default())]
        );
    }

    #[test]
    fn test_scene_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");

        let mut world = World::new();
        world.add_entity(EntityBuilder::new().with_position(Vector3::new(1.0, 2.0, 3.0)));
        let scene = Scene::from_world(&world);

        scene.save_to_file(&path).unwrap();
        let loaded = Scene::load_from_file(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Scene::load_from_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SceneError::Io(_))));
    }
}
