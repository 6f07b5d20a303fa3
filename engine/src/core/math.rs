//! Vector and quaternion helpers shared by the spatial model
//!
//! All spatial quantities use double precision. `Vector3` and `Quaternion` are
//! the glam `f64` types so they carry the usual operator overloads.

use glam::{DQuat, DVec3, EulerRot};

use super::spatial::SpatialError;

/// Three-component double precision vector
pub type Vector3 = DVec3;

/// Double precision rotation quaternion (x, y, z, w)
pub type Quaternion = DQuat;

/// Dot product of two vectors
pub fn dot(a: Vector3, b: Vector3) -> f64 {
    a.dot(b)
}

/// Cross product of two vectors
pub fn cross(a: Vector3, b: Vector3) -> Vector3 {
    a.cross(b)
}

/// Unit vector pointing the same way as `v`
///
/// Zero-length and non-finite vectors have no direction and are rejected.
pub fn normalize(v: Vector3) -> Result<Vector3, SpatialError> {
    v.try_normalize().ok_or(SpatialError::ZeroLengthVector)
}

/// Build a rotation from Euler angles packed as (roll, pitch, yaw) in radians
///
/// Yaw is applied about Z, then pitch about Y, then roll about X.
pub fn quaternion_from_euler(euler: Vector3) -> Quaternion {
    DQuat::from_euler(EulerRot::ZYX, euler.z, euler.y, euler.x)
}
