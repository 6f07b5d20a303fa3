//! Rhai modules for exposing the simulation to scripts

pub mod components;
pub mod math;
pub mod spatial;
pub mod world;

use crate::context::{SharedWorld, SimContext};
use crate::core::entity::World;
use rhai::{Engine, EvalAltResult};
use std::sync::{Arc, PoisonError, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Register all modules with the Rhai engine
pub fn register_all_modules(engine: &mut Engine, context: Arc<SimContext>) {
    debug!("Registering scripting modules");

    math::register_math_types(engine);
    spatial::register_spatial_types(engine);
    components::register_component_types(engine);
    world::register_world_api(engine, context);

    debug!("All scripting modules registered");
}

pub(crate) fn read_world(world: &SharedWorld) -> RwLockReadGuard<'_, World> {
    world.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_world(world: &SharedWorld) -> RwLockWriteGuard<'_, World> {
    world.write().unwrap_or_else(PoisonError::into_inner)
}

/// Turn a host error into a script runtime error
pub(crate) fn script_error(error: impl std::fmt::Display) -> Box<EvalAltResult> {
    error.to_string().into()
}
