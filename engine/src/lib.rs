//! Entity-component world with typed spatial state
//!
//! This crate provides a world of entities carrying geocentric or geodetic
//! positions, Earth-fixed or local-tangent-plane orientations and a closed set
//! of capability components, together with an entity factory, scene
//! serialization and a Rhai scripting surface over all of it.

pub mod config;
pub mod context;
pub mod core;
pub mod factory;
pub mod io;
pub mod scripting;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{
        Component, ComponentKind, ComponentSet, Entity, EntityBuilder, EntityView,
        MainRotorComponent, NameComponent, OrbitComponent, ParentReferenceComponent,
        ProceduralLifetimeComponent, World, WorldError, WorldId,
    };

    // Math and spatial types
    pub use crate::core::math::{cross, dot, normalize, quaternion_from_euler, Quaternion, Vector3};
    pub use crate::core::spatial::{
        to_geocentric_orientation, to_geocentric_position, to_lat_lon, to_lat_lon_alt,
        to_ltp_ned_orientation, GeocentricOrientation, GeocentricPosition, LatLon, LatLonAlt,
        LatLonAltPosition, LtpNedOrientation, Orbit, Orientation, Position, SpatialError,
    };

    // Factory and context types
    pub use crate::context::{shared_world, SharedEntityFactory, SharedWorld, SimContext};
    pub use crate::factory::{EntityFactory, EntityTemplate, FactoryError};

    // IO types
    pub use crate::io::{Scene, SceneError};

    // Config types
    pub use crate::config::{AssetConfig, ConfigError};

    // Scripting types
    pub use crate::scripting::ScriptEngine;
}

/// Initialize logging for the simulation
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
