//! Scripting system using Rhai
//!
//! Scripts see the simulation through the types and functions registered by
//! [`modules::register_all_modules`]: vectors and quaternions, geodetic
//! positions, orientations, components, entities, the world and the entity
//! factory. The current world and factory come from the
//! [`SimContext`](crate::context::SimContext) the [`ScriptEngine`] was built
//! with.

pub mod engine;
pub mod modules;

pub use engine::ScriptEngine;
pub use modules::components::ComponentRef;
pub use modules::world::{EntityHandle, FactoryHandle, WorldHandle};

// Re-export commonly used types
pub use rhai::{Dynamic, EvalAltResult};

#[cfg(test)]
mod tests;
