//! Entity templates and the factory that instantiates them
//!
//! A template names a set of components. The factory turns a template into an
//! [`EntityBuilder`] carrying those components plus a unique [`NameComponent`],
//! ready to be added to a [`World`](crate::core::entity::World).

use crate::core::entity::{
    ComponentKind, EntityBuilder, MainRotorComponent, NameComponent, OrbitComponent,
};
use crate::core::spatial::Orbit;
use crate::io::ComponentData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from template registration and entity creation
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Unknown entity template: {0}")]
    UnknownTemplate(String),

    #[error("Invalid entity template {name}: {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named recipe for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentData>,
    #[serde(default = "default_dynamics_enabled")]
    pub dynamics_enabled: bool,
}

fn default_dynamics_enabled() -> bool {
    true
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            dynamics_enabled: true,
        }
    }

    pub fn with_component(mut self, component: ComponentData) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_dynamics_enabled(mut self, enabled: bool) -> Self {
        self.dynamics_enabled = enabled;
        self
    }

    /// Check that the template can be instantiated on its own
    ///
    /// Parent references name entities in some world, which a template cannot
    /// know about. Names are assigned per instance.
    pub fn validate(&self) -> Result<(), FactoryError> {
        let invalid = |reason: &str| FactoryError::InvalidTemplate {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.is_empty() {
            return Err(invalid("template name is empty"));
        }
        for component in &self.components {
            match component.kind() {
                ComponentKind::ParentReference => {
                    return Err(invalid("templates cannot hold parent references"))
                }
                ComponentKind::Name => {
                    return Err(invalid("instance names are assigned by the factory"))
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Built-in templates available in every factory
pub fn builtin_templates() -> Vec<EntityTemplate> {
    vec![
        EntityTemplate::new("Orbiter").with_component(ComponentData::OrbitComponent(
            OrbitComponent::new(Orbit::default()),
        )),
        EntityTemplate::new("Helicopter").with_component(ComponentData::MainRotorComponent(
            MainRotorComponent::default(),
        )),
        EntityTemplate::new("Debris").with_component(ComponentData::ProceduralLifetimeComponent),
    ]
}

/// Creates entities from registered templates
pub struct EntityFactory {
    templates: HashMap<String, EntityTemplate>,
    next_instance: AtomicU64,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityFactory {
    /// Factory holding the built-in templates
    pub fn new() -> Self {
        let mut factory = Self::empty();
        for template in builtin_templates() {
            factory.templates.insert(template.name.clone(), template);
        }
        factory
    }

    /// Factory with no templates at all
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
            next_instance: AtomicU64::new(1),
        }
    }

    /// Register a template, replacing any template of the same name
    pub fn register_template(&mut self, template: EntityTemplate) -> Result<(), FactoryError> {
        template.validate()?;
        debug!(
            template = %template.name,
            component_count = template.components.len(),
            "Registered entity template"
        );
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Register every template in a JSON file holding an array of templates
    ///
    /// Nothing is registered if any template in the file is invalid.
    pub fn load_templates_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, FactoryError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading entity templates");

        let json = fs::read_to_string(path)?;
        let templates: Vec<EntityTemplate> = serde_json::from_str(&json)?;
        for template in &templates {
            template.validate()?;
        }

        let count = templates.len();
        for template in templates {
            self.register_template(template)?;
        }
        info!(path = ?path, count, "Entity templates loaded");
        Ok(count)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn template(&self, name: &str) -> Option<&EntityTemplate> {
        self.templates.get(name)
    }

    /// Names of all registered templates, sorted
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create an entity from a template with a generated unique name
    ///
    /// Names take the form `<template><n>`, with `n` counting up per factory.
    pub fn create_entity(&self, template_name: &str) -> Result<EntityBuilder, FactoryError> {
        let template = self.lookup(template_name)?;
        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        self.instantiate(template, format!("{template_name}{instance}"))
    }

    /// Create an entity from a template with a caller-chosen name
    pub fn create_named_entity(
        &self,
        template_name: &str,
        name: impl Into<String>,
    ) -> Result<EntityBuilder, FactoryError> {
        let template = self.lookup(template_name)?;
        self.instantiate(template, name.into())
    }

    fn lookup(&self, template_name: &str) -> Result<&EntityTemplate, FactoryError> {
        self.templates
            .get(template_name)
            .ok_or_else(|| FactoryError::UnknownTemplate(template_name.to_string()))
    }

    fn instantiate(&self, template: &EntityTemplate, name: String) -> Result<EntityBuilder, FactoryError> {
        let mut builder = EntityBuilder::new().with_dynamics_enabled(template.dynamics_enabled);
        for data in &template.components {
            let component = data
                .clone()
                .into_component(|_| None)
                .map_err(|e| FactoryError::InvalidTemplate {
                    name: template.name.clone(),
                    reason: e.to_string(),
                })?;
            builder.add_component(component);
        }
        debug!(template = %template.name, name = %name, "Created entity from template");
        builder.add_component(NameComponent::new(name));
        Ok(builder)
    }
}
