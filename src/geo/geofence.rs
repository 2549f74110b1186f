//! Proximity gate for visiting points.

use serde::Serialize;

use crate::geo::distance::haversine_km;
use crate::model::Coordinates;

/// Default visit radius: 50 meters.
pub const DEFAULT_VISIT_RADIUS_KM: f64 = 0.05;

/// Outcome of a proximity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Proximity {
    /// The user stands close enough to visit the point.
    Within { distance_km: f64 },
    /// The user must come closer; distance left in whole meters.
    TooFar { remaining_m: u64 },
}

impl Proximity {
    pub fn is_within(&self) -> bool {
        matches!(self, Proximity::Within { .. })
    }
}

/// Circular geofence around each target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    radius_km: f64,
}

impl Geofence {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Compare the user's position against a target. The boundary counts as inside.
    pub fn check(&self, user: Coordinates, target: Coordinates) -> Proximity {
        let distance_km = haversine_km(user, target);
        if distance_km <= self.radius_km {
            Proximity::Within { distance_km }
        } else {
            Proximity::TooFar {
                remaining_m: (distance_km * 1000.0).round() as u64,
            }
        }
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self::new(DEFAULT_VISIT_RADIUS_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_spot_is_within() {
        let here = Coordinates::new(56.1439, 47.2489);
        assert!(Geofence::default().check(here, here).is_within());
    }

    #[test]
    fn test_thirty_meters_is_within() {
        // ~0.00027 deg latitude is ~30 m.
        let target = Coordinates::new(56.1439, 47.2489);
        let user = Coordinates::new(56.14417, 47.2489);
        assert!(Geofence::default().check(user, target).is_within());
    }

    #[test]
    fn test_far_reports_rounded_meters() {
        let target = Coordinates::new(0.0, 0.0);
        let user = Coordinates::new(0.001, 0.0);
        // 0.001 deg latitude is ~111.19 m.
        match Geofence::default().check(user, target) {
            Proximity::TooFar { remaining_m } => assert_eq!(remaining_m, 111),
            other => panic!("expected TooFar, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_radius() {
        let target = Coordinates::new(0.0, 0.0);
        let user = Coordinates::new(0.001, 0.0);
        assert!(Geofence::new(0.2).check(user, target).is_within());
    }
}
