//! Component values and live component references for scripts
//!
//! Constructors such as `OrbitComponent()` produce detached [`Component`]
//! values for `addComponent`. Queries on an entity return [`ComponentRef`]s,
//! which read and write the component inside the world.

use super::world::EntityHandle;
use super::{read_world, script_error, write_world};
use crate::context::SharedWorld;
use crate::core::entity::{
    Component, ComponentVariant, Entity, MainRotorComponent, NameComponent, OrbitComponent,
    ParentReferenceComponent, ProceduralLifetimeComponent,
};
use crate::core::math::Quaternion;
use crate::core::spatial::Orbit;
use rhai::{Dynamic, Engine, EvalAltResult};
use tracing::debug;

type ScriptResult<T> = Result<T, Box<EvalAltResult>>;

/// A component attached to an entity, addressed by its position in the
/// entity's component list
#[derive(Clone)]
pub struct ComponentRef {
    world: SharedWorld,
    entity: Entity,
    index: usize,
}

impl ComponentRef {
    pub fn new(world: SharedWorld, entity: Entity, index: usize) -> Self {
        Self {
            world,
            entity,
            index,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Copy of the referenced component
    ///
    /// A parent reference in the copy stays tied to this component's world.
    pub fn get(&self) -> ScriptResult<Component> {
        let world_id = read_world(&self.world).id();
        self.with(|component| {
            Ok(match component {
                Component::ParentReference(reference) => {
                    ParentReferenceComponent::in_world(reference.parent(), world_id).into()
                }
                other => other.clone(),
            })
        })
    }

    fn with<R>(&self, f: impl FnOnce(&Component) -> ScriptResult<R>) -> ScriptResult<R> {
        let world = read_world(&self.world);
        let view = world.entity(self.entity).map_err(script_error)?;
        let component = view
            .components()
            .get_index(self.index)
            .ok_or_else(|| script_error("component no longer exists"))?;
        f(component)
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut Component) -> ScriptResult<R>) -> ScriptResult<R> {
        let mut world = write_world(&self.world);
        let component = world
            .components_mut(self.entity)
            .map_err(script_error)?
            .get_index_mut(self.index)
            .ok_or_else(|| script_error("component no longer exists"))?;
        f(component)
    }
}

fn expect<T: ComponentVariant>(component: &Component) -> ScriptResult<&T> {
    let kind = component.kind();
    component.downcast_ref::<T>().ok_or_else(|| {
        script_error(format!("expected {}, got {kind}", T::KIND))
    })
}

fn expect_mut<T: ComponentVariant>(component: &mut Component) -> ScriptResult<&mut T> {
    let kind = component.kind();
    component.downcast_mut::<T>().ok_or_else(|| {
        script_error(format!("expected {}, got {kind}", T::KIND))
    })
}

fn orbit(component: &Component) -> ScriptResult<Orbit> {
    expect::<OrbitComponent>(component).map(|c| c.orbit)
}

fn set_orbit(component: &mut Component, orbit: Orbit) -> ScriptResult<()> {
    expect_mut::<OrbitComponent>(component)?.orbit = orbit;
    Ok(())
}

fn rotor(component: &Component) -> ScriptResult<MainRotorComponent> {
    expect::<MainRotorComponent>(component).copied()
}

fn set_normalized_rpm(component: &mut Component, rpm: f64) -> ScriptResult<()> {
    expect_mut::<MainRotorComponent>(component)?.set_normalized_rpm(rpm);
    Ok(())
}

/// Register component constructors and accessors with Rhai
pub fn register_component_types(engine: &mut Engine) {
    debug!("Registering component types");

    engine
        .register_type_with_name::<Component>("Component")
        .register_fn("OrbitComponent", || Component::from(OrbitComponent::default()))
        .register_fn("OrbitComponent", |orbit: Orbit| {
            Component::from(OrbitComponent::new(orbit))
        })
        .register_fn("MainRotorComponent", || {
            Component::from(MainRotorComponent::default())
        })
        .register_fn("ParentReferenceComponent", |parent: EntityHandle| {
            let world = read_world(parent.world()).id();
            Component::from(ParentReferenceComponent::in_world(parent.entity(), world))
        })
        .register_fn("ProceduralLifetimeComponent", || {
            Component::from(ProceduralLifetimeComponent)
        })
        .register_fn("NameComponent", |name: &str| Component::from(NameComponent::new(name)))
        .register_get("typeName", |c: &mut Component| c.type_name().to_string())
        .register_get("orbit", |c: &mut Component| orbit(c))
        .register_set("orbit", |c: &mut Component, o: Orbit| set_orbit(c, o))
        .register_fn("getPitchAngle", |c: &mut Component| rotor(c).map(|m| m.pitch_angle()))
        .register_fn("getRotationAngle", |c: &mut Component| {
            rotor(c).map(|m| m.rotation_angle())
        })
        .register_fn("getTppOrientationRelBody", |c: &mut Component| {
            rotor(c).map(|m| m.tpp_orientation_rel_body())
        })
        .register_fn("getNormalizedRpm", |c: &mut Component| {
            rotor(c).map(|m| m.normalized_rpm())
        })
        .register_fn("setNormalizedRpm", |c: &mut Component, rpm: f64| {
            set_normalized_rpm(c, rpm)
        })
        .register_fn("to_string", |c: &mut Component| c.type_name().to_string())
        .register_fn("to_debug", |c: &mut Component| format!("{c:?}"));

    engine
        .register_type_with_name::<ComponentRef>("ComponentRef")
        .register_get("typeName", |r: &mut ComponentRef| {
            r.with(|c| Ok(c.type_name().to_string()))
        })
        .register_get("orbit", |r: &mut ComponentRef| r.with(orbit))
        .register_set("orbit", |r: &mut ComponentRef, o: Orbit| {
            r.with_mut(|c| set_orbit(c, o))
        })
        .register_fn("getPitchAngle", |r: &mut ComponentRef| {
            r.with(|c| rotor(c).map(|m| m.pitch_angle()))
        })
        .register_fn("getRotationAngle", |r: &mut ComponentRef| {
            r.with(|c| rotor(c).map(|m| m.rotation_angle()))
        })
        .register_fn("getTppOrientationRelBody", |r: &mut ComponentRef| -> ScriptResult<Quaternion> {
            r.with(|c| rotor(c).map(|m| m.tpp_orientation_rel_body()))
        })
        .register_fn("getNormalizedRpm", |r: &mut ComponentRef| {
            r.with(|c| rotor(c).map(|m| m.normalized_rpm()))
        })
        .register_fn("setNormalizedRpm", |r: &mut ComponentRef, rpm: f64| {
            r.with_mut(|c| set_normalized_rpm(c, rpm))
        })
        .register_fn("getParent", |r: &mut ComponentRef| -> ScriptResult<Dynamic> {
            let parent = r.with(|c| expect::<ParentReferenceComponent>(c).map(|p| p.parent()))?;
            let live = read_world(&r.world).contains(parent);
            Ok(if live {
                Dynamic::from(EntityHandle::new(r.world.clone(), parent))
            } else {
                Dynamic::UNIT
            })
        })
        .register_fn("getEntity", |r: &mut ComponentRef| {
            EntityHandle::new(r.world.clone(), r.entity)
        })
        .register_fn("toComponent", |r: &mut ComponentRef| r.get())
        .register_fn("to_string", |r: &mut ComponentRef| {
            r.with(|c| Ok(c.type_name().to_string()))
                .unwrap_or_else(|_| "<removed>".to_string())
        });

    debug!("Component types registered");
}
