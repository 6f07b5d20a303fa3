//! Core simulation model: spatial value types and the entity/component world

pub mod entity;
pub mod math;
pub mod spatial;
