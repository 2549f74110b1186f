//! Quest/route data model.
//!
//! # Data Flow
//! ```text
//! /api/routes/{id}/ JSON
//!     → serde (Quest, RoutePoint, Point)
//!     → Quest::normalized (validate + dense 1..N order)
//!     → progress tracker / route editor
//! ```

pub mod ids;
pub mod point;
pub mod quest;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub use ids::{PointId, QuestId};
pub use point::{Coordinates, Point, RoutePoint};
pub use quest::Quest;

/// Errors raised when a payload violates the point schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Coordinates out of range: lat={latitude}, lng={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Point {0} appears more than once in the route")]
    DuplicatePoint(PointId),
}

/// Read an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
