//! Orientation representations and conversions between them

use glam::DMat3;
use serde::{Deserialize, Serialize};

use super::geodetic::LatLon;
use crate::core::math::Quaternion;

/// Rotation relative to the Earth-fixed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocentricOrientation {
    pub orientation: Quaternion,
}

impl GeocentricOrientation {
    pub fn new(orientation: Quaternion) -> Self {
        Self { orientation }
    }
}

impl Default for GeocentricOrientation {
    fn default() -> Self {
        Self::new(Quaternion::IDENTITY)
    }
}

/// Rotation relative to the North-East-Down frame at some surface point
///
/// The surface point is not stored; every conversion must be told which point
/// the frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtpNedOrientation {
    pub orientation: Quaternion,
}

impl LtpNedOrientation {
    pub fn new(orientation: Quaternion) -> Self {
        Self { orientation }
    }
}

impl Default for LtpNedOrientation {
    fn default() -> Self {
        Self::new(Quaternion::IDENTITY)
    }
}

/// How an entity is rotated, in exactly one of the supported frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Orientation {
    Geocentric(GeocentricOrientation),
    LtpNed(LtpNedOrientation),
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Geocentric(GeocentricOrientation::default())
    }
}

impl Orientation {
    /// Equivalent rotation in the Earth-fixed frame, given the local frame origin
    pub fn to_geocentric(&self, reference: LatLon) -> GeocentricOrientation {
        to_geocentric_orientation(self, reference)
    }

    /// Equivalent rotation in the NED frame at `reference`
    pub fn to_ltp_ned(&self, reference: LatLon) -> LtpNedOrientation {
        to_ltp_ned_orientation(self, reference)
    }

    pub fn is_geocentric(&self) -> bool {
        matches!(self, Orientation::Geocentric(_))
    }
}

impl From<Quaternion> for Orientation {
    fn from(value: Quaternion) -> Self {
        Orientation::Geocentric(GeocentricOrientation::new(value))
    }
}

impl From<GeocentricOrientation> for Orientation {
    fn from(value: GeocentricOrientation) -> Self {
        Orientation::Geocentric(value)
    }
}

impl From<LtpNedOrientation> for Orientation {
    fn from(value: LtpNedOrientation) -> Self {
        Orientation::LtpNed(value)
    }
}

/// North, East and Down unit vectors at `reference`, expressed in the
/// Earth-fixed frame, as the columns of a rotation matrix
pub fn ltp_ned_basis(reference: LatLon) -> DMat3 {
    let (sin_lat, cos_lat) = reference.lat.sin_cos();
    let (sin_lon, cos_lon) = reference.lon.sin_cos();

    let north = glam::DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let east = glam::DVec3::new(-sin_lon, cos_lon, 0.0);
    let down = glam::DVec3::new(-cos_lat * cos_lon, -cos_lat * sin_lon, -sin_lat);

    DMat3::from_cols(north, east, down)
}

fn ltp_ned_frame(reference: LatLon) -> Quaternion {
    Quaternion::from_mat3(&ltp_ned_basis(reference))
}

/// Convert any orientation to the Earth-fixed frame
///
/// `reference` is the origin of the local frame an LTP-NED orientation is
/// expressed in. Geocentric input is returned unchanged.
pub fn to_geocentric_orientation(
    orientation: &Orientation,
    reference: LatLon,
) -> GeocentricOrientation {
    match orientation {
        Orientation::Geocentric(o) => *o,
        Orientation::LtpNed(o) => {
            GeocentricOrientation::new(ltp_ned_frame(reference) * o.orientation)
        }
    }
}

/// Convert any orientation to the NED frame at `reference`
///
/// LTP-NED input is assumed to already be relative to `reference` and is
/// returned unchanged.
pub fn to_ltp_ned_orientation(orientation: &Orientation, reference: LatLon) -> LtpNedOrientation {
    match orientation {
        Orientation::Geocentric(o) => {
            LtpNedOrientation::new(ltp_ned_frame(reference).conjugate() * o.orientation)
        }
        Orientation::LtpNed(o) => *o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_basis_at_origin() {
        let basis = ltp_ned_basis(LatLon::new(0.0, 0.0));
        assert!((basis.x_axis - DVec3::Z).length() < 1e-12);
        assert!((basis.y_axis - DVec3::Y).length() < 1e-12);
        assert!((basis.z_axis + DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_basis_is_right_handed() {
        let basis = ltp_ned_basis(LatLon::from_degrees(-33.0, 151.0));
        let down = basis.x_axis.cross(basis.y_axis);
        assert!((down - basis.z_axis).length() < 1e-12);
        assert!((basis.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_level_north_facing_body_points_north() {
        let ned = Orientation::from(LtpNedOrientation::default());
        let geo = to_geocentric_orientation(&ned, LatLon::new(0.0, 0.0));
        let forward = geo.orientation * DVec3::X;
        assert!((forward - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_geocentric_ignores_reference() {
        let q = Quaternion::from_rotation_y(0.4);
        let o = Orientation::from(q);
        let geo = to_geocentric_orientation(&o, LatLon::from_degrees(10.0, 20.0));
        assert_eq!(geo.orientation, q);
    }

    #[test]
    fn test_reference_changes_result() {
        let ned = Orientation::from(LtpNedOrientation::default());
        let a = to_geocentric_orientation(&ned, LatLon::from_degrees(0.0, 0.0));
        let b = to_geocentric_orientation(&ned, LatLon::from_degrees(45.0, 10.0));
        assert!(!a.orientation.abs_diff_eq(b.orientation, 1e-6));
    }
}
