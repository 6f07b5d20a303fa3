//! Script-level tests of the registered simulation API

mod scenario_tests;

use crate::context::{shared_world, SharedWorld, SimContext};
use crate::core::entity::World;
use crate::factory::EntityFactory;
use crate::scripting::ScriptEngine;
use std::sync::Arc;

fn script_engine() -> (ScriptEngine, SharedWorld) {
    let world = shared_world(World::new());
    let context = SimContext::with_world_and_factory(world.clone(), Arc::new(EntityFactory::new()));
    (ScriptEngine::new(Arc::new(context)), world)
}
