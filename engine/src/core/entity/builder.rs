//! Entities that have been configured but not yet added to a world

use super::component_set::ComponentSet;
use super::components::Component;
use crate::core::spatial::{Orientation, Position};

/// A fully configured entity waiting to be adopted by a [`World`](super::World)
///
/// Produced by the entity factory or assembled by hand. It carries the same
/// state a live entity does, so it can be adjusted before it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBuilder {
    components: ComponentSet,
    position: Position,
    orientation: Orientation,
    dynamics_enabled: bool,
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self {
            components: ComponentSet::new(),
            position: Position::default(),
            orientation: Orientation::default(),
            dynamics_enabled: true,
        }
    }
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<Orientation>) -> Self {
        self.orientation = orientation.into();
        self
    }

    pub fn with_dynamics_enabled(mut self, enabled: bool) -> Self {
        self.dynamics_enabled = enabled;
        self
    }

    pub fn add_component(&mut self, component: impl Into<Component>) {
        self.components.push(component);
    }

    /// Replace the position wholesale, keeping the variant the caller supplied
    pub fn set_position(&mut self, position: impl Into<Position>) {
        self.position = position.into();
    }

    /// Replace the orientation wholesale, keeping the variant the caller supplied
    pub fn set_orientation(&mut self, orientation: impl Into<Orientation>) {
        self.orientation = orientation.into();
    }

    pub fn set_dynamics_enabled(&mut self, enabled: bool) {
        self.dynamics_enabled = enabled;
    }

    pub fn name(&self) -> &str {
        self.components.name()
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentSet {
        &mut self.components
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn dynamics_enabled(&self) -> bool {
        self.dynamics_enabled
    }

    pub(crate) fn into_parts(self) -> (ComponentSet, Position, Orientation, bool) {
        (
            self.components,
            self.position,
            self.orientation,
            self.dynamics_enabled,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::components::{NameComponent, OrbitComponent};
    use crate::core::math::{Quaternion, Vector3};
    use crate::core::spatial::LatLonAlt;

    #[test]
    fn test_defaults() {
        let builder = EntityBuilder::new();
        assert!(builder.components().is_empty());
        assert_eq!(builder.position(), Position::default());
        assert_eq!(builder.orientation(), Orientation::default());
        assert!(builder.dynamics_enabled());
        assert_eq!(builder.name(), "");
    }

    #[test]
    fn test_chained_configuration() {
        let builder = EntityBuilder::new()
            .with_component(NameComponent::new("Probe"))
            .with_component(OrbitComponent::default())
            .with_position(LatLonAlt::new(0.1, 0.2, 3.0))
            .with_orientation(Quaternion::from_rotation_z(1.0))
            .with_dynamics_enabled(false);

        assert_eq!(builder.name(), "Probe");
        assert_eq!(builder.components().len(), 2);
        assert!(!builder.position().is_geocentric());
        assert!(builder.orientation().is_geocentric());
        assert!(!builder.dynamics_enabled());
    }

    #[test]
    fn test_set_position_replaces_variant() {
        let mut builder = EntityBuilder::new().with_position(LatLonAlt::default());
        builder.set_position(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(builder.position(), Position::from(Vector3::new(1.0, 2.0, 3.0)));
    }
}
