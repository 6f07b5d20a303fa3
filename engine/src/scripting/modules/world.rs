//! World, entity and entity factory API for scripts
//!
//! Script values hold handles, not entities: an [`EntityHandle`] names an
//! entity inside a shared world and every call re-checks that it is still live.

use super::components::ComponentRef;
use super::{read_world, script_error, write_world};
use crate::context::{shared_world, SharedEntityFactory, SharedWorld, SimContext};
use crate::core::entity::{Component, Entity, EntityBuilder, EntityView, World, WorldError};
use crate::core::math::{Quaternion, Vector3};
use crate::core::spatial::{LatLonAlt, Orientation, Position};
use crate::factory::EntityFactory;
use rhai::{Array, Dynamic, Engine, EvalAltResult};
use std::sync::Arc;
use tracing::{debug, trace};

type ScriptResult<T> = Result<T, Box<EvalAltResult>>;

/// Script-side reference to an entity in a shared world
#[derive(Clone)]
pub struct EntityHandle {
    world: SharedWorld,
    entity: Entity,
}

impl EntityHandle {
    pub fn new(world: SharedWorld, entity: Entity) -> Self {
        Self { world, entity }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    fn read<R>(&self, f: impl FnOnce(&EntityView<'_>) -> R) -> ScriptResult<R> {
        let world = read_world(&self.world);
        let view = world.entity(self.entity).map_err(script_error)?;
        Ok(f(&view))
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut World, Entity) -> Result<R, WorldError>,
    ) -> ScriptResult<R> {
        let mut world = write_world(&self.world);
        f(&mut world, self.entity).map_err(script_error)
    }

    fn component_refs(&self, type_name: Option<&str>) -> ScriptResult<Array> {
        self.read(|view| {
            view.components()
                .iter()
                .enumerate()
                .filter(|(_, c)| type_name.map_or(true, |name| c.type_name() == name))
                .map(|(index, _)| {
                    Dynamic::from(ComponentRef::new(self.world.clone(), self.entity, index))
                })
                .collect()
        })
    }
}

impl PartialEq for EntityHandle {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity && Arc::ptr_eq(&self.world, &other.world)
    }
}

/// Script-side reference to a shared world
#[derive(Clone)]
pub struct WorldHandle(pub SharedWorld);

/// Script-side reference to a shared entity factory
#[derive(Clone)]
pub struct FactoryHandle(pub SharedEntityFactory);

fn optional<T: Clone + Send + Sync + 'static>(value: Option<T>) -> Dynamic {
    value.map_or(Dynamic::UNIT, Dynamic::from)
}

/// Register world API with Rhai engine
///
/// `getWorld`, `setWorld`, `getEntityFactory` and `setEntityFactory` read and
/// replace the world and factory held by `context`.
pub fn register_world_api(engine: &mut Engine, context: Arc<SimContext>) {
    debug!("Registering world API");

    register_entity(engine);
    register_entity_builder(engine);
    register_world(engine);
    register_entity_factory(engine);

    let ctx = context.clone();
    engine.register_fn("getWorld", move || optional(ctx.world().map(WorldHandle)));
    let ctx = context.clone();
    engine.register_fn("setWorld", move |world: WorldHandle| ctx.set_world(Some(world.0)));
    let ctx = context.clone();
    engine.register_fn("setWorld", move |_: ()| ctx.set_world(None));

    let ctx = context.clone();
    engine.register_fn("getEntityFactory", move || {
        optional(ctx.entity_factory().map(FactoryHandle))
    });
    let ctx = context.clone();
    engine.register_fn("setEntityFactory", move |factory: FactoryHandle| {
        ctx.set_entity_factory(Some(factory.0))
    });
    let ctx = context;
    engine.register_fn("setEntityFactory", move |_: ()| ctx.set_entity_factory(None));

    debug!("World API registered");
}

fn register_entity(engine: &mut Engine) {
    engine
        .register_type_with_name::<EntityHandle>("Entity")
        .register_fn("getName", |e: &mut EntityHandle| {
            e.read(|view| view.name().to_string())
        })
        .register_fn("getPosition", |e: &mut EntityHandle| {
            e.read(|view| view.geocentric_position())
        })
        .register_fn("getLatLonAlt", |e: &mut EntityHandle| e.read(|view| view.lat_lon_alt()))
        .register_fn("setPosition", |e: &mut EntityHandle, p: Vector3| {
            e.write(|world, entity| world.set_position(entity, p))
        })
        .register_fn("setPosition", |e: &mut EntityHandle, p: LatLonAlt| {
            e.write(|world, entity| world.set_position(entity, p))
        })
        .register_fn("setPosition", |e: &mut EntityHandle, p: Position| {
            e.write(|world, entity| world.set_position(entity, p))
        })
        .register_fn("getOrientation", |e: &mut EntityHandle| {
            e.read(|view| view.geocentric_orientation())
        })
        .register_fn("setOrientation", |e: &mut EntityHandle, o: Quaternion| {
            e.write(|world, entity| world.set_orientation(entity, o))
        })
        .register_fn("setOrientation", |e: &mut EntityHandle, o: Orientation| {
            e.write(|world, entity| world.set_orientation(entity, o))
        })
        .register_fn("getComponents", |e: &mut EntityHandle| e.component_refs(None))
        .register_fn("getComponentsOfType", |e: &mut EntityHandle, type_name: &str| {
            e.component_refs(Some(type_name))
        })
        .register_fn(
            "getFirstComponentOfType",
            |e: &mut EntityHandle, type_name: &str| -> ScriptResult<Dynamic> {
                let mut refs = e.component_refs(Some(type_name))?;
                Ok(if refs.is_empty() {
                    Dynamic::UNIT
                } else {
                    refs.swap_remove(0)
                })
            },
        )
        .register_fn("addComponent", |e: &mut EntityHandle, c: Component| {
            e.write(|world, entity| world.add_component(entity, c))
        })
        .register_get_set(
            "dynamicsEnabled",
            |e: &mut EntityHandle| e.read(|view| view.dynamics_enabled()),
            |e: &mut EntityHandle, enabled: bool| {
                e.write(|world, entity| world.set_dynamics_enabled(entity, enabled))
            },
        )
        .register_fn("getParent", |e: &mut EntityHandle| {
            let parent = read_world(&e.world).parent_of(e.entity);
            optional(parent.map(|p| EntityHandle::new(e.world.clone(), p)))
        })
        .register_get("isValid", |e: &mut EntityHandle| {
            read_world(&e.world).contains(e.entity)
        })
        .register_fn("==", |a: &mut EntityHandle, b: EntityHandle| *a == b)
        .register_fn("!=", |a: &mut EntityHandle, b: EntityHandle| *a != b)
        .register_fn("to_string", |e: &mut EntityHandle| {
            match e.read(|view| view.name().to_string()) {
                Ok(name) => format!("Entity({name})"),
                Err(_) => "Entity(<removed>)".to_string(),
            }
        });
}

fn register_entity_builder(engine: &mut Engine) {
    engine
        .register_type_with_name::<EntityBuilder>("EntityBuilder")
        .register_fn("EntityBuilder", EntityBuilder::new)
        .register_fn("getName", |b: &mut EntityBuilder| b.name().to_string())
        .register_fn("setPosition", |b: &mut EntityBuilder, p: Vector3| b.set_position(p))
        .register_fn("setPosition", |b: &mut EntityBuilder, p: LatLonAlt| b.set_position(p))
        .register_fn("setPosition", |b: &mut EntityBuilder, p: Position| b.set_position(p))
        .register_fn("setOrientation", |b: &mut EntityBuilder, o: Quaternion| {
            b.set_orientation(o)
        })
        .register_fn("setOrientation", |b: &mut EntityBuilder, o: Orientation| {
            b.set_orientation(o)
        })
        .register_fn("addComponent", |b: &mut EntityBuilder, c: Component| b.add_component(c))
        .register_get_set(
            "dynamicsEnabled",
            |b: &mut EntityBuilder| b.dynamics_enabled(),
            |b: &mut EntityBuilder, enabled: bool| b.set_dynamics_enabled(enabled),
        );
}

fn register_world(engine: &mut Engine) {
    engine
        .register_type_with_name::<WorldHandle>("World")
        .register_fn("World", || WorldHandle(shared_world(World::new())))
        .register_fn("getEntities", |w: &mut WorldHandle| -> Array {
            read_world(&w.0)
                .entities()
                .into_iter()
                .map(|entity| Dynamic::from(EntityHandle::new(w.0.clone(), entity)))
                .collect()
        })
        .register_fn(
            "addEntity",
            |w: &mut WorldHandle, builder: EntityBuilder| -> ScriptResult<EntityHandle> {
                let entity = write_world(&w.0)
                    .try_add_entity(builder)
                    .map_err(script_error)?;
                Ok(EntityHandle::new(w.0.clone(), entity))
            },
        )
        .register_fn("removeEntity", |w: &mut WorldHandle, e: EntityHandle| {
            // Handles from another world never name an entity here
            if !Arc::ptr_eq(&w.0, &e.world) {
                trace!(entity = ?e.entity, "Ignoring removal of entity from another world");
                return false;
            }
            write_world(&w.0).remove_entity(e.entity)
        })
        .register_fn("removeAllEntities", |w: &mut WorldHandle| {
            write_world(&w.0).remove_all_entities()
        })
        .register_fn("findObjectByName", |w: &mut WorldHandle, name: &str| {
            let found = read_world(&w.0).find_by_name(name);
            optional(found.map(|entity| EntityHandle::new(w.0.clone(), entity)))
        })
        .register_get("entityCount", |w: &mut WorldHandle| {
            read_world(&w.0).len() as i64
        })
        .register_fn("==", |a: &mut WorldHandle, b: WorldHandle| Arc::ptr_eq(&a.0, &b.0));
}

fn register_entity_factory(engine: &mut Engine) {
    engine
        .register_type_with_name::<FactoryHandle>("EntityFactory")
        .register_fn("EntityFactory", || FactoryHandle(Arc::new(EntityFactory::new())))
        .register_fn(
            "createEntity",
            |f: &mut FactoryHandle, template: &str| -> ScriptResult<EntityBuilder> {
                f.0.create_entity(template).map_err(script_error)
            },
        )
        .register_fn(
            "createNamedEntity",
            |f: &mut FactoryHandle, template: &str, name: &str| -> ScriptResult<EntityBuilder> {
                f.0.create_named_entity(template, name).map_err(script_error)
            },
        )
        .register_fn("getTemplateNames", |f: &mut FactoryHandle| -> Array {
            f.0.template_names()
                .into_iter()
                .map(|name| Dynamic::from(name.to_string()))
                .collect()
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::OrbitComponent;
    use crate::scripting::modules::register_all_modules;

    fn setup() -> (Engine, SharedWorld) {
        let world = shared_world(World::new());
        let context = Arc::new(SimContext::with_world_and_factory(
            world.clone(),
            Arc::new(EntityFactory::new()),
        ));
        let mut engine = Engine::new();
        register_all_modules(&mut engine, context);
        (engine, world)
    }

    #[test]
    fn test_create_and_add_entity() {
        let (engine, world) = setup();
        let name: String = engine
            .eval(
                r#"
            let e = getWorld().addEntity(getEntityFactory().createEntity("Orbiter"));
            e.getName()
        "#,
            )
            .unwrap();
        assert_eq!(name, "Orbiter1");

        let world = read_world(&world);
        let entity = world.find_by_name("Orbiter1").unwrap();
        assert!(world
            .entity(entity)
            .unwrap()
            .components()
            .get::<OrbitComponent>()
            .is_some());
    }

    #[test]
    fn test_first_component_of_type_absent_is_unit() {
        let (engine, _world) = setup();
        let absent: bool = engine
            .eval(
                r#"
            let e = getWorld().addEntity(EntityBuilder());
            e.getFirstComponentOfType("OrbitComponent") == ()
        "#,
            )
            .unwrap();
        assert!(absent);
    }

    #[test]
    fn test_stale_entity_is_error() {
        let (engine, _world) = setup();
        let result = engine.eval::<Vector3>(
            r#"
            let w = getWorld();
            let e = w.addEntity(EntityBuilder());
            w.removeEntity(e);
            e.getPosition()
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_entity_from_other_world_is_noop() {
        let (engine, world) = setup();
        let removed: bool = engine
            .eval(
                r#"
            let other = World();
            let e = other.addEntity(EntityBuilder());
            getWorld().addEntity(EntityBuilder());
            getWorld().removeEntity(e)
        "#,
            )
            .unwrap();
        assert!(!removed);
        assert_eq!(read_world(&world).len(), 1);
    }

    #[test]
    fn test_parent_reference_from_other_world_is_rejected() {
        let (engine, world) = setup();
        let result = engine.eval::<Dynamic>(
            r#"
            let other = World();
            let foreign = EntityBuilder();
            foreign.addComponent(NameComponent("Foreign"));
            let foreign = other.addEntity(foreign);

            let unrelated = EntityBuilder();
            unrelated.addComponent(NameComponent("Unrelated"));
            getWorld().addEntity(unrelated);

            let child = getWorld().addEntity(EntityBuilder());
            child.addComponent(ParentReferenceComponent(foreign));
        "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("another world"), "unexpected error: {err}");

        let world = read_world(&world);
        assert_eq!(world.len(), 2);
        for entity in world.entities() {
            assert_eq!(world.parent_of(entity), None);
        }
    }

    #[test]
    fn test_builder_with_foreign_parent_is_rejected() {
        let (engine, world) = setup();
        let result = engine.eval::<Dynamic>(
            r#"
            let other = World();
            let foreign = other.addEntity(EntityBuilder());
            let child = EntityBuilder();
            child.addComponent(ParentReferenceComponent(foreign));
            getWorld().addEntity(child);
        "#,
        );
        assert!(result.is_err());
        assert!(read_world(&world).is_empty());
    }

    #[test]
    fn test_copied_parent_reference_stays_in_its_world() {
        let (engine, world) = setup();
        let result = engine.eval::<Dynamic>(
            r#"
            let parent = getWorld().addEntity(EntityBuilder());
            let child = getWorld().addEntity(EntityBuilder());
            child.addComponent(ParentReferenceComponent(parent));
            let copy = child.getFirstComponentOfType("ParentReferenceComponent").toComponent();

            let other = World();
            let stranger = other.addEntity(EntityBuilder());
            stranger.addComponent(copy);
        "#,
        );
        assert!(result.is_err());
        let world = read_world(&world);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_set_world_replaces_context_world() {
        let (engine, world) = setup();
        let count: i64 = engine
            .eval(
                r#"
            let fresh = World();
            setWorld(fresh);
            getWorld().addEntity(EntityBuilder());
            getWorld().entityCount
        "#,
            )
            .unwrap();
        assert_eq!(count, 1);
        assert!(read_world(&world).is_empty());

        let unset: bool = engine.eval("setWorld(()); getWorld() == ()").unwrap();
        assert!(unset);
    }
}
