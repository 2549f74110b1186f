//! Geographic helpers: great-circle distance and the visit geofence.

pub mod distance;
pub mod geofence;

pub use distance::{haversine_km, planar_distance, EARTH_RADIUS_KM};
pub use geofence::{Geofence, Proximity, DEFAULT_VISIT_RADIUS_KM};
