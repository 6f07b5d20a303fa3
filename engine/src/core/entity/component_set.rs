//! Ordered collection of the components owned by one entity

use super::components::{Component, ComponentKind, ComponentVariant, NameComponent};

/// Components owned by a single entity, in insertion order
///
/// Duplicates are allowed: two [`OrbitComponent`](super::OrbitComponent)s are
/// both stored and both returned by kind queries. Keeping a single instance of
/// a kind is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    components: Vec<Component>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component without de-duplication
    pub fn push(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    pub fn as_slice(&self) -> &[Component] {
        &self.components
    }

    /// Component at `index` in insertion order
    pub fn get_index(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Component> {
        self.components.get_mut(index)
    }

    /// All components of the given kind
    pub fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().filter(move |c| c.kind() == kind)
    }

    pub fn first_of_kind(&self, kind: ComponentKind) -> Option<&Component> {
        self.of_kind(kind).next()
    }

    pub fn count_of_kind(&self, kind: ComponentKind) -> usize {
        self.of_kind(kind).count()
    }

    /// First component of type `T`
    pub fn get<T: ComponentVariant>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_component)
    }

    /// First component of type `T`, mutably
    pub fn get_mut<T: ComponentVariant>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_component_mut)
    }

    /// Every component of type `T`
    pub fn iter_of<T: ComponentVariant>(&self) -> impl Iterator<Item = &T> + '_ {
        self.components.iter().filter_map(T::from_component)
    }

    pub fn iter_of_mut<T: ComponentVariant>(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.components.iter_mut().filter_map(T::from_component_mut)
    }

    /// Components whose kind tag equals `type_name` exactly
    ///
    /// Unknown names match nothing.
    pub fn components_of_type(&self, type_name: &str) -> Vec<&Component> {
        match ComponentKind::from_type_name(type_name) {
            Some(kind) => self.of_kind(kind).collect(),
            None => Vec::new(),
        }
    }

    /// First component whose kind tag equals `type_name`, if any
    pub fn first_component_of_type(&self, type_name: &str) -> Option<&Component> {
        ComponentKind::from_type_name(type_name).and_then(|kind| self.first_of_kind(kind))
    }

    /// Name from the first [`NameComponent`], or the empty string
    pub fn name(&self) -> &str {
        self.get::<NameComponent>()
            .map(|name| name.0.as_str())
            .unwrap_or("")
    }
}

impl FromIterator<Component> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ComponentSet {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::components::{
        MainRotorComponent, OrbitComponent, ProceduralLifetimeComponent,
    };
    use crate::core::spatial::Orbit;

    #[test]
    fn test_absent_kind_is_none() {
        let mut set = ComponentSet::new();
        set.push(ProceduralLifetimeComponent);
        assert!(set.first_component_of_type("OrbitComponent").is_none());
        assert!(set.components_of_type("OrbitComponent").is_empty());
        assert!(set.get::<OrbitComponent>().is_none());
    }

    #[test]
    fn test_added_component_is_queryable() {
        let mut set = ComponentSet::new();
        let rotor = MainRotorComponent::default();
        set.push(rotor);
        let found = set.components_of_type("MainRotorComponent");
        assert_eq!(found, vec![&Component::MainRotor(rotor)]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut set = ComponentSet::new();
        set.push(OrbitComponent::new(Orbit::circular(1.0, 0.0)));
        set.push(OrbitComponent::new(Orbit::circular(2.0, 0.0)));

        assert_eq!(set.count_of_kind(ComponentKind::Orbit), 2);
        let radii: Vec<f64> = set
            .iter_of::<OrbitComponent>()
            .map(|c| c.orbit.semi_major_axis)
            .collect();
        assert_eq!(radii, vec![1.0, 2.0]);
        assert_eq!(set.get::<OrbitComponent>().unwrap().orbit.semi_major_axis, 1.0);
    }

    #[test]
    fn test_unknown_type_name_matches_nothing() {
        let mut set = ComponentSet::new();
        set.push(OrbitComponent::default());
        assert!(set.components_of_type("Transform").is_empty());
        assert!(set.first_component_of_type("orbitComponent").is_none());
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut set = ComponentSet::new();
        set.push(OrbitComponent::default());
        set.get_mut::<OrbitComponent>().unwrap().orbit.eccentricity = 0.3;
        assert_eq!(set.get::<OrbitComponent>().unwrap().orbit.eccentricity, 0.3);
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let mut set = ComponentSet::new();
        assert_eq!(set.name(), "");
        set.push(NameComponent::new("Falcon"));
        set.push(NameComponent::new("Ignored"));
        assert_eq!(set.name(), "Falcon");
    }
}
