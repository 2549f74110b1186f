//! Quests: named tours over an ordered list of points.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::geo::distance::haversine_km;
use crate::model::ids::{PointId, QuestId};
use crate::model::point::{resolve_media_url, Coordinates, RoutePoint};
use crate::model::{null_as_default, ModelError};
use crate::route::ordering::reindex;

/// A quest as served by `/api/routes/{id}/`.
///
/// Unmodelled fields (`coordinates` and the like) ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<RoutePoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quest {
    pub fn new(id: impl Into<QuestId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image_url: None,
            points: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Check coordinates and point-id uniqueness.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::with_capacity(self.points.len());
        for rp in &self.points {
            rp.point.coordinates().validate()?;
            if !seen.insert(&rp.point.id) {
                return Err(ModelError::DuplicatePoint(rp.point.id.clone()));
            }
        }
        Ok(())
    }

    /// Validate, then order points by their incoming `order` and reindex.
    ///
    /// Wire order values may have gaps or duplicates; ties keep their
    /// array position.
    pub fn normalized(mut self) -> Result<Self, ModelError> {
        self.validate()?;
        self.points.sort_by_key(|rp| rp.order);
        reindex(&mut self.points);
        Ok(self)
    }

    /// Points the user is expected to visit.
    pub fn visitable_points(&self) -> impl Iterator<Item = &RoutePoint> {
        self.points.iter().filter(|rp| rp.point.is_visitable())
    }

    pub fn visitable_count(&self) -> usize {
        self.visitable_points().count()
    }

    pub fn find_point(&self, id: &PointId) -> Option<&RoutePoint> {
        self.points.iter().find(|rp| &rp.point.id == id)
    }

    /// Ordered coordinates of every point, intermediate ones included.
    pub fn polyline(&self) -> Vec<Coordinates> {
        self.points.iter().map(|rp| rp.point.coordinates()).collect()
    }

    /// Great-circle length of the route in kilometers.
    pub fn route_length_km(&self) -> f64 {
        self.polyline()
            .windows(2)
            .map(|w| haversine_km(w[0], w[1]))
            .sum()
    }

    /// Cover image: explicit image, else first point's photo, else `default`.
    pub fn cover_image(&self, media_base: &str, default: &str) -> String {
        self.image_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.points.first().and_then(|rp| rp.point.photo.as_deref()))
            .map(|p| resolve_media_url(p, media_base))
            .unwrap_or_else(|| default.to_string())
    }
}
