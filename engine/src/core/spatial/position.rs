//! Position representations and conversions between them

use serde::{Deserialize, Serialize};

use super::geodetic::{LatLon, LatLonAlt};
use super::EARTH_RADIUS;
use crate::core::math::Vector3;

/// Position in the Earth-fixed Cartesian frame, metres from the planet centre
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocentricPosition {
    pub position: Vector3,
}

impl GeocentricPosition {
    pub fn new(position: Vector3) -> Self {
        Self { position }
    }
}

/// Position as latitude, longitude and altitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLonAltPosition {
    pub position: LatLonAlt,
}

impl LatLonAltPosition {
    pub fn new(position: LatLonAlt) -> Self {
        Self { position }
    }
}

/// Where an entity is, in exactly one of the supported representations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Position {
    Geocentric(GeocentricPosition),
    LatLonAlt(LatLonAltPosition),
}

impl Default for Position {
    fn default() -> Self {
        Position::Geocentric(GeocentricPosition::default())
    }
}

impl Position {
    /// Equivalent position in the geocentric frame
    pub fn to_geocentric(&self) -> GeocentricPosition {
        to_geocentric_position(self)
    }

    /// Equivalent position as latitude, longitude and altitude
    pub fn to_lat_lon_alt(&self) -> LatLonAltPosition {
        to_lat_lon_alt(self)
    }

    pub fn is_geocentric(&self) -> bool {
        matches!(self, Position::Geocentric(_))
    }
}

impl From<Vector3> for Position {
    fn from(value: Vector3) -> Self {
        Position::Geocentric(GeocentricPosition::new(value))
    }
}

impl From<LatLonAlt> for Position {
    fn from(value: LatLonAlt) -> Self {
        Position::LatLonAlt(LatLonAltPosition::new(value))
    }
}

impl From<GeocentricPosition> for Position {
    fn from(value: GeocentricPosition) -> Self {
        Position::Geocentric(value)
    }
}

impl From<LatLonAltPosition> for Position {
    fn from(value: LatLonAltPosition) -> Self {
        Position::LatLonAlt(value)
    }
}

/// Convert any position to the geocentric frame
///
/// Geocentric input is returned unchanged.
pub fn to_geocentric_position(position: &Position) -> GeocentricPosition {
    match position {
        Position::Geocentric(p) => *p,
        Position::LatLonAlt(p) => GeocentricPosition::new(lat_lon_alt_to_geocentric(p.position)),
    }
}

/// Convert any position to latitude, longitude and altitude
///
/// Lat/lon/alt input is returned unchanged. Longitudes produced from geocentric
/// input lie in [-pi, pi]; at the planet centre both angles are zero.
pub fn to_lat_lon_alt(position: &Position) -> LatLonAltPosition {
    match position {
        Position::Geocentric(p) => LatLonAltPosition::new(geocentric_to_lat_lon_alt(p.position)),
        Position::LatLonAlt(p) => *p,
    }
}

/// Drop the altitude from a lat/lon/alt triple
pub fn to_lat_lon(position: &LatLonAlt) -> LatLon {
    position.lat_lon()
}

fn lat_lon_alt_to_geocentric(lla: LatLonAlt) -> Vector3 {
    let radius = EARTH_RADIUS + lla.alt;
    let (sin_lat, cos_lat) = lla.lat.sin_cos();
    let (sin_lon, cos_lon) = lla.lon.sin_cos();
    Vector3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

fn geocentric_to_lat_lon_alt(position: Vector3) -> LatLonAlt {
    let equatorial = position.x.hypot(position.y);
    LatLonAlt::new(
        position.z.atan2(equatorial),
        position.y.atan2(position.x),
        position.length() - EARTH_RADIUS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_longitude_at_antimeridian() {
        let east = geocentric_to_lat_lon_alt(Vector3::new(-EARTH_RADIUS, 0.0, 0.0));
        let west = geocentric_to_lat_lon_alt(Vector3::new(-EARTH_RADIUS, -0.0, 0.0));
        assert_eq!(east.lon, PI);
        assert_eq!(west.lon, -PI);
        assert!((-PI..=PI).contains(&west.lon));
    }

    #[test]
    fn test_geocentric_is_identity() {
        let p = Position::from(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(to_geocentric_position(&p).position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_lat_lon_alt_is_identity() {
        let lla = LatLonAlt::new(0.1, 0.2, 300.0);
        let p = Position::from(lla);
        assert_eq!(to_lat_lon_alt(&p).position, lla);
    }

    #[test]
    fn test_equator_prime_meridian() {
        let p = Position::from(LatLonAlt::new(0.0, 0.0, 100.0));
        let geo = to_geocentric_position(&p).position;
        assert!((geo - Vector3::new(EARTH_RADIUS + 100.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_north_pole() {
        let p = Position::from(Vector3::new(0.0, 0.0, EARTH_RADIUS + 10.0));
        let lla = to_lat_lon_alt(&p).position;
        assert!((lla.lat - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((lla.alt - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_variant_is_preserved_by_from() {
        assert!(Position::from(Vector3::ZERO).is_geocentric());
        assert!(!Position::from(LatLonAlt::default()).is_geocentric());
        assert!(Position::default().is_geocentric());
    }

    #[test]
    fn test_serialization_is_tagged() {
        let p = Position::from(LatLonAlt::new(0.5, 0.25, 10.0));
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["type"], "LatLonAlt");
        let back: Position = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
