//! End-to-end script scenarios

use super::script_engine;
use crate::core::entity::OrbitComponent;
use crate::core::spatial::Orbit;
use crate::scripting::modules::read_world;
use std::fs;

#[test]
fn test_orbiter_scenario_from_file() {
    let (engine, world) = script_engine();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orbiter.rhai");
    fs::write(
        &path,
        r#"
        let world = getWorld();
        let orbiter = world.addEntity(getEntityFactory().createEntity("Orbiter"));
        let orbit = orbiter.getFirstComponentOfType("OrbitComponent").orbit;
        orbit == Orbit()
    "#,
    )
    .unwrap();

    engine.load_script("orbiter", &path).unwrap();
    let default_orbit = engine.run_script("orbiter").unwrap().as_bool().unwrap();
    assert!(default_orbit);

    let world = read_world(&world);
    let entity = world.find_by_name("Orbiter1").unwrap();
    let view = world.entity(entity).unwrap();
    let orbits: Vec<_> = view.components().iter_of::<OrbitComponent>().collect();
    assert_eq!(orbits.len(), 1);
    assert_eq!(orbits[0].orbit, Orbit::default());
}

#[test]
fn test_ltp_ned_scenario() {
    let (engine, _world) = script_engine();
    let recovered: bool = engine
        .eval(
            r#"
        let reference = LatLon(math::rad(45.0), math::rad(10.0));
        let q = quaternionFromEuler(Vector3(0.3, -0.2, 1.1));
        let geo = toGeocentricOrientation(LtpNedOrientation(q), reference);
        let back = toLtpNedOrientation(geo, reference).orientation;
        let d = dot(Vector3(back.x, back.y, back.z), Vector3(q.x, q.y, q.z)) + back.w * q.w;
        (1.0 - d.abs()) < 0.000000001
    "#,
        )
        .unwrap();
    assert!(recovered);
}

#[test]
fn test_entity_uses_own_position_for_ltp_orientation() {
    let (engine, _world) = script_engine();
    let matches: bool = engine
        .eval(
            r#"
        let lla = LatLonAlt(math::rad(30.0), math::rad(-60.0), 0.0);
        let e = getWorld().addEntity(EntityBuilder());
        e.setPosition(lla);
        e.setOrientation(LtpNedOrientation(Quaternion()));
        let expected = toGeocentricOrientation(LtpNedOrientation(Quaternion()), toLatLon(lla)).orientation;
        let actual = e.getOrientation();
        (actual.x - expected.x).abs() < 0.000000000001 && (actual.w - expected.w).abs() < 0.000000000001
    "#,
        )
        .unwrap();
    assert!(matches);
}
