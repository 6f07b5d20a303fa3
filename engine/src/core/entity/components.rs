//! Capability components that can be attached to entities
//!
//! The set of component kinds is closed. Lookups inside the crate dispatch on
//! [`ComponentKind`] or through [`ComponentVariant`]; the string tags exist for
//! callers that only know a kind by name, such as scripts.

use super::world::WorldId;
use crate::core::math::Quaternion;
use crate::core::spatial::Orbit;
use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use tracing::trace;

/// Discriminant of [`Component`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Orbit,
    MainRotor,
    ParentReference,
    ProceduralLifetime,
    Name,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Orbit,
        ComponentKind::MainRotor,
        ComponentKind::ParentReference,
        ComponentKind::ProceduralLifetime,
        ComponentKind::Name,
    ];

    /// Short unqualified tag used by name-based lookups
    pub fn type_name(self) -> &'static str {
        match self {
            ComponentKind::Orbit => "OrbitComponent",
            ComponentKind::MainRotor => "MainRotorComponent",
            ComponentKind::ParentReference => "ParentReferenceComponent",
            ComponentKind::ProceduralLifetime => "ProceduralLifetimeComponent",
            ComponentKind::Name => "NameComponent",
        }
    }

    /// Exact, case-sensitive match against [`ComponentKind::type_name`]
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Keplerian orbit state of an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitComponent {
    #[serde(default)]
    pub orbit: Orbit,
}

impl OrbitComponent {
    pub fn new(orbit: Orbit) -> Self {
        Self { orbit }
    }
}

/// Default rotor angular speed at full normalized RPM, radians per second
pub const DEFAULT_MAX_ROTOR_SPEED: f64 = 27.0;

/// Helicopter main rotor state
///
/// The blade pitch and tip-path-plane orientation are produced by an external
/// dynamics model through [`MainRotorComponent::set_derived_state`]. The only
/// control input is the normalized RPM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainRotorComponent {
    pitch_angle: f64,
    rotation_angle: f64,
    tpp_orientation_rel_body: Quaternion,
    normalized_rpm: f64,
    max_angular_speed: f64,
}

impl Default for MainRotorComponent {
    fn default() -> Self {
        Self {
            pitch_angle: 0.0,
            rotation_angle: 0.0,
            tpp_orientation_rel_body: Quaternion::IDENTITY,
            normalized_rpm: 0.0,
            max_angular_speed: DEFAULT_MAX_ROTOR_SPEED,
        }
    }
}

impl MainRotorComponent {
    pub fn with_max_angular_speed(max_angular_speed: f64) -> Self {
        Self {
            max_angular_speed,
            ..Default::default()
        }
    }

    /// Collective blade pitch in radians
    pub fn pitch_angle(&self) -> f64 {
        self.pitch_angle
    }

    /// Rotor azimuth in radians, within [0, 2pi)
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Tip-path-plane orientation relative to the body
    pub fn tpp_orientation_rel_body(&self) -> Quaternion {
        self.tpp_orientation_rel_body
    }

    pub fn normalized_rpm(&self) -> f64 {
        self.normalized_rpm
    }

    pub fn max_angular_speed(&self) -> f64 {
        self.max_angular_speed
    }

    /// Set the RPM control input, clamped to [0, 1]
    pub fn set_normalized_rpm(&mut self, rpm: f64) {
        let clamped = if rpm.is_nan() { 0.0 } else { rpm.clamp(0.0, 1.0) };
        if clamped != rpm {
            trace!(requested = rpm, applied = clamped, "Clamped normalized rotor RPM");
        }
        self.normalized_rpm = clamped;
    }

    /// Store the angles computed by the rotor dynamics model
    pub fn set_derived_state(&mut self, pitch_angle: f64, tpp_orientation_rel_body: Quaternion) {
        self.pitch_angle = pitch_angle;
        self.tpp_orientation_rel_body = tpp_orientation_rel_body;
    }

    /// Spin the rotor forward by `dt` seconds at the current RPM
    pub fn advance(&mut self, dt: f64) {
        let delta = self.normalized_rpm * self.max_angular_speed * dt;
        self.rotation_angle = (self.rotation_angle + delta).rem_euclid(TAU);
    }
}

/// Non-owning link to a parent entity
///
/// The parent's lifetime is not affected. Resolve through
/// [`World::resolve_parent`](super::World::resolve_parent), which reports a
/// parent that has since been removed as absent.
///
/// A reference built with [`in_world`](Self::in_world) remembers which world
/// the parent lives in, and only that world accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentReferenceComponent {
    parent: Entity,
    world: Option<WorldId>,
}

impl ParentReferenceComponent {
    pub fn new(parent: Entity) -> Self {
        Self {
            parent,
            world: None,
        }
    }

    pub fn in_world(parent: Entity, world: WorldId) -> Self {
        Self {
            parent,
            world: Some(world),
        }
    }

    /// Handle of the parent; it may be stale
    pub fn parent(&self) -> Entity {
        self.parent
    }

    /// World the parent was taken from, if known
    pub fn world(&self) -> Option<WorldId> {
        self.world
    }

    /// Whether this reference may be stored in the world `id`
    pub fn belongs_to(&self, id: WorldId) -> bool {
        self.world.map_or(true, |world| world == id)
    }
}

/// Marker for entities whose lifetime is managed procedurally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralLifetimeComponent;

/// Human-readable entity name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponent(pub String);

impl NameComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Any capability that can be attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Orbit(OrbitComponent),
    MainRotor(MainRotorComponent),
    ParentReference(ParentReferenceComponent),
    ProceduralLifetime(ProceduralLifetimeComponent),
    Name(NameComponent),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Orbit(_) => ComponentKind::Orbit,
            Component::MainRotor(_) => ComponentKind::MainRotor,
            Component::ParentReference(_) => ComponentKind::ParentReference,
            Component::ProceduralLifetime(_) => ComponentKind::ProceduralLifetime,
            Component::Name(_) => ComponentKind::Name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Typed view of this component, if it is a `T`
    pub fn downcast_ref<T: ComponentVariant>(&self) -> Option<&T> {
        T::from_component(self)
    }

    pub fn downcast_mut<T: ComponentVariant>(&mut self) -> Option<&mut T> {
        T::from_component_mut(self)
    }
}

/// Compile-time access to one variant of [`Component`]
pub trait ComponentVariant: Into<Component> + Sized + 'static {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_variant {
    ($ty:ty, $variant:ident) => {
        impl ComponentVariant for $ty {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$variant(value)
            }
        }
    };
}

component_variant!(OrbitComponent, Orbit);
component_variant!(MainRotorComponent, MainRotor);
component_variant!(ParentReferenceComponent, ParentReference);
component_variant!(ProceduralLifetimeComponent, ProceduralLifetime);
component_variant!(NameComponent, Name);
