//! Keplerian orbital elements

use serde::{Deserialize, Serialize};

use super::SpatialError;

/// Keplerian element set at a single instant
///
/// Distances are metres and angles radians. The type does not enforce that the
/// elements describe a bound orbit; use [`Orbit::is_bound`] or
/// [`Orbit::validate`] where that matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub right_ascension: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
}

impl Orbit {
    /// Circular orbit of the given radius and inclination
    pub fn circular(radius: f64, inclination: f64) -> Self {
        Self {
            semi_major_axis: radius,
            inclination,
            ..Default::default()
        }
    }

    /// True when the elements describe a closed (elliptical) orbit
    pub fn is_bound(&self) -> bool {
        self.semi_major_axis > 0.0 && (0.0..1.0).contains(&self.eccentricity)
    }

    /// Check the element invariants callers are expected to uphold
    pub fn validate(&self) -> Result<(), SpatialError> {
        if !(self.eccentricity >= 0.0) {
            return Err(SpatialError::NegativeEccentricity(self.eccentricity));
        }
        if self.eccentricity < 1.0 && !(self.semi_major_axis > 0.0) {
            return Err(SpatialError::NonPositiveSemiMajorAxis(
                self.semi_major_axis,
            ));
        }
        Ok(())
    }

    /// Distance from the focus at the current true anomaly
    pub fn radius(&self) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e) / (1.0 + e * self.true_anomaly.cos())
    }
}
