//! Spatial state: geodetic coordinates, orbits, positions and orientations
//!
//! The planet is modelled as a sphere of radius [`EARTH_RADIUS`]. The
//! Earth-fixed ("geocentric") frame has its origin at the planet centre, +Z
//! through the north pole and +X through latitude 0, longitude 0. Angles are
//! always radians.
//!
//! Conversions between representations are free functions; the only one that
//! needs extra context is the local-tangent-plane orientation, which is
//! meaningless without the surface point that defines its North-East-Down
//! axes. That reference point is an explicit argument everywhere.

pub mod geodetic;
pub mod orbit;
pub mod orientation;
pub mod position;


pub use geodetic::{LatLon, LatLonAlt};
pub use orbit::Orbit;
pub use orientation::{
    ltp_ned_basis, to_geocentric_orientation, to_ltp_ned_orientation, GeocentricOrientation,
    LtpNedOrientation, Orientation,
};
pub use position::{
    to_geocentric_position, to_lat_lon, to_lat_lon_alt, GeocentricPosition, LatLonAltPosition,
    Position,
};

use thiserror::Error;

/// Mean planet radius in metres used by every geodetic conversion
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Errors raised by geometric operations on degenerate input
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpatialError {
    /// A direction was requested from a vector with no length
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
    /// Orbital eccentricity below zero or not a number
    #[error("eccentricity must be non-negative, got {0}")]
    NegativeEccentricity(f64),
    /// Closed orbit whose semi-major axis is not positive
    #[error("bound orbit requires a positive semi-major axis, got {0}")]
    NonPositiveSemiMajorAxis(f64),
}
