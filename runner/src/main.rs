//! Runs a simulation script against a fresh world
//!
//! Usage: `geosim <script.rhai> [templates.json] [scene-out.json]`

use geosim::prelude::*;
use std::sync::Arc;
use std::{env, path::Path, process};
use tracing::{error, info};

fn main() {
    geosim::init_logging();

    let args: Vec<String> = env::args().collect();
    let Some(script_path) = args.get(1) else {
        let program = args.first().map(String::as_str).unwrap_or("geosim");
        error!("Usage: {program} <script.rhai> [templates.json] [scene-out.json]");
        process::exit(2);
    };

    let mut factory = EntityFactory::new();
    if let Some(templates_path) = args.get(2) {
        match factory.load_templates_from_file(templates_path) {
            Ok(count) => info!(count, path = %templates_path, "Loaded entity templates"),
            Err(e) => {
                error!(error = %e, path = %templates_path, "Failed to load entity templates");
                process::exit(1);
            }
        }
    }

    let world = shared_world(World::new());
    let context = Arc::new(SimContext::with_world_and_factory(
        world.clone(),
        Arc::new(factory),
    ));
    let engine = ScriptEngine::new(context);

    let script_name = Path::new(script_path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("main");

    if let Err(e) = engine.load_script(script_name, script_path) {
        error!(error = %e, "Failed to load script");
        process::exit(1);
    }
    match engine.run_script(script_name) {
        Ok(result) => info!(result = %result, "Script finished"),
        Err(e) => {
            error!(error = %e, "Script failed");
            process::exit(1);
        }
    }

    // The script may have replaced the current world
    let world = engine.context().world().unwrap_or(world);
    let world = world.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    info!(
        entity_count = world.len(),
        dynamic_count = world.dynamic_entities().len(),
        "Final world state"
    );
    for view in world.iter() {
        info!(
            name = view.name(),
            position = ?view.geocentric_position(),
            components = view.components().len(),
            "Entity"
        );
    }

    if let Some(scene_path) = args.get(3) {
        if let Err(e) = world.save_scene(scene_path) {
            error!(error = %e, path = %scene_path, "Failed to save scene");
            process::exit(1);
        }
        info!(path = %scene_path, "Saved scene");
    }
}
