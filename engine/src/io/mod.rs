//! Scene serialization and the serializable component form

mod component_data;
mod entity_mapper;
mod scene;

pub use component_data::ComponentData;
pub use entity_mapper::EntityMapper;
pub use scene::{Scene, SceneError, SerializedEntity};
