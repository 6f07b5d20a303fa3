//! Serializable form of components
//!
//! Parent references are stored as scene-local ids instead of entity handles,
//! since handles are only meaningful inside the world that issued them.

use crate::core::entity::{
    Component, ComponentKind, MainRotorComponent, NameComponent, OrbitComponent,
    ParentReferenceComponent, ProceduralLifetimeComponent,
};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::scene::SceneError;

/// A component as it appears in scene and template files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentData {
    OrbitComponent(OrbitComponent),
    MainRotorComponent(MainRotorComponent),
    ParentReferenceComponent { entity_id: u64 },
    ProceduralLifetimeComponent,
    NameComponent { name: String },
}

impl ComponentData {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::OrbitComponent(_) => ComponentKind::Orbit,
            ComponentData::MainRotorComponent(_) => ComponentKind::MainRotor,
            ComponentData::ParentReferenceComponent { .. } => ComponentKind::ParentReference,
            ComponentData::ProceduralLifetimeComponent => ComponentKind::ProceduralLifetime,
            ComponentData::NameComponent { .. } => ComponentKind::Name,
        }
    }

    /// Convert a live component, mapping a parent handle to its id
    ///
    /// Returns `None` for a parent reference whose parent has no id, i.e. it is
    /// not part of what is being serialized.
    pub fn from_component<F>(component: &Component, id_of: F) -> Option<Self>
    where
        F: Fn(Entity) -> Option<u64>,
    {
        let data = match component {
            Component::Orbit(orbit) => ComponentData::OrbitComponent(*orbit),
            Component::MainRotor(rotor) => ComponentData::MainRotorComponent(*rotor),
            Component::ParentReference(reference) => ComponentData::ParentReferenceComponent {
                entity_id: id_of(reference.parent())?,
            },
            Component::ProceduralLifetime(_) => ComponentData::ProceduralLifetimeComponent,
            Component::Name(name) => ComponentData::NameComponent {
                name: name.0.clone(),
            },
        };
        Some(data)
    }

    /// Convert back to a live component, resolving parent ids through `remap`
    pub fn into_component<F>(self, remap: F) -> Result<Component, SceneError>
    where
        F: Fn(u64) -> Option<Entity>,
    {
        let component = match self {
            ComponentData::OrbitComponent(orbit) => orbit.into(),
            ComponentData::MainRotorComponent(rotor) => rotor.into(),
            ComponentData::ParentReferenceComponent { entity_id } => {
                let parent = remap(entity_id).ok_or(SceneError::EntityNotFound(entity_id))?;
                ParentReferenceComponent::new(parent).into()
            }
            ComponentData::ProceduralLifetimeComponent => ProceduralLifetimeComponent.into(),
            ComponentData::NameComponent { name } => NameComponent(name).into(),
        };
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spatial::Orbit;

    #[test]
    fn test_json_shape() {
        let data = ComponentData::OrbitComponent(OrbitComponent::new(Orbit::circular(7.0e6, 0.5)));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "OrbitComponent");
        assert_eq!(json["orbit"]["semi_major_axis"], 7.0e6);

        let marker = serde_json::to_value(ComponentData::ProceduralLifetimeComponent).unwrap();
        assert_eq!(marker, serde_json::json!({"type": "ProceduralLifetimeComponent"}));
    }

    #[test]
    fn test_tags_match_kind_names() {
        let samples = [
            ComponentData::OrbitComponent(OrbitComponent::default()),
            ComponentData::MainRotorComponent(MainRotorComponent::default()),
            ComponentData::ParentReferenceComponent { entity_id: 3 },
            ComponentData::ProceduralLifetimeComponent,
            ComponentData::NameComponent {
                name: "n".to_string(),
            },
        ];
        for data in samples {
            let json = serde_json::to_value(&data).unwrap();
            assert_eq!(json["type"], data.kind().type_name());
        }
    }

    #[test]
    fn test_rotor_fields_default() {
        let json = r#"{"type": "MainRotorComponent"}"#;
        let data: ComponentData = serde_json::from_str(json).unwrap();
        assert_eq!(data, ComponentData::MainRotorComponent(MainRotorComponent::default()));
    }

    #[test]
    fn test_unresolved_parent_is_error() {
        let data = ComponentData::ParentReferenceComponent { entity_id: 9 };
        let result = data.into_component(|_| None);
        assert!(matches!(result, Err(SceneError::EntityNotFound(9))));
    }

    #[test]
    fn test_dead_parent_is_skipped() {
        let component = Component::from(ParentReferenceComponent::new(Entity::DANGLING));
        assert!(ComponentData::from_component(&component, |_| None).is_none());
        assert_eq!(
            ComponentData::from_component(&component, |_| Some(4)),
            Some(ComponentData::ParentReferenceComponent { entity_id: 4 })
        );
    }
}
