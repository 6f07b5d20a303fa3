//! Geodetic coordinates on the reference sphere

use serde::{Deserialize, Serialize};

/// Latitude and longitude in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create from angles given in degrees
    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }

    /// Attach an altitude to this point
    pub fn with_altitude(self, alt: f64) -> LatLonAlt {
        LatLonAlt::new(self.lat, self.lon, alt)
    }
}

/// Latitude and longitude in radians plus altitude in metres above the sphere
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLonAlt {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl LatLonAlt {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Create from angles given in degrees and an altitude in metres
    pub fn from_degrees(lat_deg: f64, lon_deg: f64, alt: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians(), alt)
    }

    /// The surface point below this position
    pub fn lat_lon(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

impl From<LatLonAlt> for LatLon {
    fn from(value: LatLonAlt) -> Self {
        value.lat_lon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_degrees() {
        let ll = LatLon::from_degrees(180.0, -90.0);
        assert!((ll.lat - std::f64::consts::PI).abs() < 1e-15);
        assert!((ll.lon + std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn test_altitude_is_dropped_and_attached() {
        let lla = LatLonAlt::new(0.5, 1.5, 1200.0);
        let ll: LatLon = lla.into();
        assert_eq!(ll, LatLon::new(0.5, 1.5));
        assert_eq!(ll.with_altitude(1200.0), lla);
    }
}
