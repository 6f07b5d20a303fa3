//! Entity storage and the components that can be attached to entities

pub mod builder;
pub mod component_set;
pub mod components;
pub mod world;

pub use builder::EntityBuilder;
pub use component_set::ComponentSet;
pub use components::{
    Component, ComponentKind, ComponentVariant, MainRotorComponent, NameComponent,
    OrbitComponent, ParentReferenceComponent, ProceduralLifetimeComponent,
    DEFAULT_MAX_ROTOR_SPEED,
};
pub use world::{DynamicsEnabled, EntityView, World, WorldError, WorldId};

// Re-export hecs types that are commonly used
pub use hecs::Entity;
