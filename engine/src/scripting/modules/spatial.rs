//! Geodetic values, orbits and the position/orientation sum types for scripts
//!
//! Angles are radians. `math::rad` converts from degrees.

use crate::core::math::{Quaternion, Vector3};
use crate::core::spatial::{
    to_geocentric_orientation, to_geocentric_position, to_lat_lon, to_lat_lon_alt,
    to_ltp_ned_orientation, GeocentricOrientation, GeocentricPosition, LatLon, LatLonAlt,
    LatLonAltPosition, LtpNedOrientation, Orbit, Orientation, Position,
};
use rhai::{Dynamic, Engine};
use tracing::debug;

/// Register spatial types and conversion functions with Rhai
pub fn register_spatial_types(engine: &mut Engine) {
    debug!("Registering spatial types");

    engine
        .register_type_with_name::<LatLon>("LatLon")
        .register_fn("LatLon", LatLon::default)
        .register_fn("LatLon", LatLon::new)
        .register_get_set("lat", |l: &mut LatLon| l.lat, |l: &mut LatLon, v: f64| l.lat = v)
        .register_get_set("lon", |l: &mut LatLon| l.lon, |l: &mut LatLon, v: f64| l.lon = v)
        .register_fn("==", |a: &mut LatLon, b: LatLon| *a == b)
        .register_fn("to_string", |l: &mut LatLon| format!("LatLon({}, {})", l.lat, l.lon));

    engine
        .register_type_with_name::<LatLonAlt>("LatLonAlt")
        .register_fn("LatLonAlt", LatLonAlt::default)
        .register_fn("LatLonAlt", LatLonAlt::new)
        .register_get_set("lat", |l: &mut LatLonAlt| l.lat, |l: &mut LatLonAlt, v: f64| l.lat = v)
        .register_get_set("lon", |l: &mut LatLonAlt| l.lon, |l: &mut LatLonAlt, v: f64| l.lon = v)
        .register_get_set("alt", |l: &mut LatLonAlt| l.alt, |l: &mut LatLonAlt, v: f64| l.alt = v)
        .register_fn("==", |a: &mut LatLonAlt, b: LatLonAlt| *a == b)
        .register_fn("to_string", |l: &mut LatLonAlt| {
            format!("LatLonAlt({}, {}, {})", l.lat, l.lon, l.alt)
        });

    register_orbit(engine);
    register_position(engine);
    register_orientation(engine);

    engine
        .register_fn("toGeocentricPosition", |p: Position| {
            Position::from(to_geocentric_position(&p))
        })
        .register_fn("toLatLonAlt", |p: Position| Position::from(to_lat_lon_alt(&p)))
        .register_fn("toLatLon", |p: LatLonAlt| to_lat_lon(&p))
        .register_fn("toGeocentricOrientation", |o: Orientation, reference: LatLon| {
            Orientation::from(to_geocentric_orientation(&o, reference))
        })
        .register_fn("toLtpNedOrientation", |o: Orientation, reference: LatLon| {
            Orientation::from(to_ltp_ned_orientation(&o, reference))
        });

    debug!("Spatial types registered");
}

fn register_orbit(engine: &mut Engine) {
    engine
        .register_type_with_name::<Orbit>("Orbit")
        .register_fn("Orbit", Orbit::default)
        .register_get_set(
            "semiMajorAxis",
            |o: &mut Orbit| o.semi_major_axis,
            |o: &mut Orbit, v: f64| o.semi_major_axis = v,
        )
        .register_get_set(
            "eccentricity",
            |o: &mut Orbit| o.eccentricity,
            |o: &mut Orbit, v: f64| o.eccentricity = v,
        )
        .register_get_set(
            "inclination",
            |o: &mut Orbit| o.inclination,
            |o: &mut Orbit, v: f64| o.inclination = v,
        )
        .register_get_set(
            "rightAscension",
            |o: &mut Orbit| o.right_ascension,
            |o: &mut Orbit, v: f64| o.right_ascension = v,
        )
        .register_get_set(
            "argumentOfPeriapsis",
            |o: &mut Orbit| o.argument_of_periapsis,
            |o: &mut Orbit, v: f64| o.argument_of_periapsis = v,
        )
        .register_get_set(
            "trueAnomaly",
            |o: &mut Orbit| o.true_anomaly,
            |o: &mut Orbit, v: f64| o.true_anomaly = v,
        )
        .register_fn("==", |a: &mut Orbit, b: Orbit| *a == b)
        .register_fn("to_debug", |o: &mut Orbit| format!("{o:?}"));
}

fn register_position(engine: &mut Engine) {
    engine
        .register_type_with_name::<Position>("Position")
        .register_fn("GeocentricPosition", |v: Vector3| {
            Position::from(GeocentricPosition::new(v))
        })
        .register_fn("LatLonAltPosition", |l: LatLonAlt| {
            Position::from(LatLonAltPosition::new(l))
        })
        // Vector3 for geocentric positions, LatLonAlt otherwise
        .register_get("position", |p: &mut Position| match p {
            Position::Geocentric(g) => Dynamic::from(g.position),
            Position::LatLonAlt(l) => Dynamic::from(l.position),
        })
        .register_set("position", |p: &mut Position, v: Vector3| *p = Position::from(v))
        .register_set("position", |p: &mut Position, l: LatLonAlt| *p = Position::from(l))
        .register_get("isGeocentric", |p: &mut Position| p.is_geocentric())
        .register_fn("==", |a: &mut Position, b: Position| *a == b)
        .register_fn("to_debug", |p: &mut Position| format!("{p:?}"));
}

fn register_orientation(engine: &mut Engine) {
    engine
        .register_type_with_name::<Orientation>("Orientation")
        .register_fn("GeocentricOrientation", |q: Quaternion| {
            Orientation::from(GeocentricOrientation::new(q))
        })
        .register_fn("LtpNedOrientation", |q: Quaternion| {
            Orientation::from(LtpNedOrientation::new(q))
        })
        .register_get_set(
            "orientation",
            |o: &mut Orientation| match o {
                Orientation::Geocentric(g) => g.orientation,
                Orientation::LtpNed(l) => l.orientation,
            },
            |o: &mut Orientation, q: Quaternion| match o {
                Orientation::Geocentric(g) => g.orientation = q,
                Orientation::LtpNed(l) => l.orientation = q,
            },
        )
        .register_get("isGeocentric", |o: &mut Orientation| o.is_geocentric())
        .register_fn("==", |a: &mut Orientation, b: Orientation| *a == b)
        .register_fn("to_debug", |o: &mut Orientation| format!("{o:?}"));
}
