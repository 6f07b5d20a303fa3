//! Vector and quaternion types for Rhai scripts

use crate::core::math::{self, Quaternion, Vector3};
use rhai::{Engine, EvalAltResult, Module};
use tracing::debug;

/// Register math types with Rhai
pub fn register_math_types(engine: &mut Engine) {
    debug!("Registering math types");

    engine
        .register_type_with_name::<Vector3>("Vector3")
        .register_fn("Vector3", || Vector3::ZERO)
        .register_fn("Vector3", |x: f64, y: f64, z: f64| Vector3::new(x, y, z))
        .register_get_set("x", |v: &mut Vector3| v.x, |v: &mut Vector3, x: f64| v.x = x)
        .register_get_set("y", |v: &mut Vector3| v.y, |v: &mut Vector3, y: f64| v.y = y)
        .register_get_set("z", |v: &mut Vector3| v.z, |v: &mut Vector3, z: f64| v.z = z)
        .register_fn("+", |a: Vector3, b: Vector3| a + b)
        .register_fn("-", |a: Vector3, b: Vector3| a - b)
        .register_fn("-", |a: Vector3| -a)
        .register_fn("*", |a: Vector3, b: f64| a * b)
        .register_fn("*", |a: f64, b: Vector3| b * a)
        .register_fn("/", |a: Vector3, b: f64| a / b)
        .register_fn("+=", |a: &mut Vector3, b: Vector3| *a += b)
        .register_fn("*=", |a: &mut Vector3, b: f64| *a *= b)
        .register_fn("==", |a: &mut Vector3, b: Vector3| *a == b)
        .register_fn("!=", |a: &mut Vector3, b: Vector3| *a != b)
        .register_fn("length", |v: &mut Vector3| v.length())
        .register_fn("to_string", |v: &mut Vector3| {
            format!("Vector3({}, {}, {})", v.x, v.y, v.z)
        })
        .register_fn("to_debug", |v: &mut Vector3| format!("{v:?}"));

    engine
        .register_type_with_name::<Quaternion>("Quaternion")
        .register_fn("Quaternion", || Quaternion::IDENTITY)
        .register_fn("Quaternion", |x: f64, y: f64, z: f64, w: f64| {
            Quaternion::from_xyzw(x, y, z, w)
        })
        .register_get_set("x", |q: &mut Quaternion| q.x, |q: &mut Quaternion, x: f64| q.x = x)
        .register_get_set("y", |q: &mut Quaternion| q.y, |q: &mut Quaternion, y: f64| q.y = y)
        .register_get_set("z", |q: &mut Quaternion| q.z, |q: &mut Quaternion, z: f64| q.z = z)
        .register_get_set("w", |q: &mut Quaternion| q.w, |q: &mut Quaternion, w: f64| q.w = w)
        .register_fn("*", |a: Quaternion, b: Quaternion| a * b)
        .register_fn("*", |q: Quaternion, v: Vector3| q * v)
        .register_fn("==", |a: &mut Quaternion, b: Quaternion| *a == b)
        .register_fn("!=", |a: &mut Quaternion, b: Quaternion| *a != b)
        .register_fn("inverse", |q: &mut Quaternion| q.inverse())
        .register_fn("to_string", |q: &mut Quaternion| {
            format!("Quaternion({}, {}, {}, {})", q.x, q.y, q.z, q.w)
        })
        .register_fn("to_debug", |q: &mut Quaternion| format!("{q:?}"));

    // Free functions, also callable in method style
    engine
        .register_fn("dot", math::dot)
        .register_fn("cross", math::cross)
        .register_fn(
            "normalize",
            |v: Vector3| -> Result<Vector3, Box<EvalAltResult>> {
                math::normalize(v).map_err(|e| e.to_string().into())
            },
        )
        .register_fn("quaternionFromEuler", math::quaternion_from_euler);

    let mut math_module = Module::new();
    math_module.set_native_fn("rad", |degrees: f64| Ok(degrees.to_radians()));
    math_module.set_native_fn("deg", |radians: f64| Ok(radians.to_degrees()));
    math_module.set_native_fn("clamp", |x: f64, min: f64, max: f64| Ok(x.clamp(min, max)));
    math_module.set_var("PI", std::f64::consts::PI);
    math_module.set_var("TAU", std::f64::consts::TAU);
    engine.register_static_module("math", math_module.into());

    debug!("Math types registered");
}
