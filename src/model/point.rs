//! Geo-tagged points and their position within a route.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::ids::PointId;
use crate::model::{null_as_default, ModelError};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that both components are finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(ModelError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// A waypoint with its media attachments.
///
/// Fields the backend sends that are not modelled here are kept in `extra`
/// and written back unchanged, since updates replace the whole quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    /// Shapes the path without being a visitable waypoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_intermediate: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Point {
    pub fn new(id: impl Into<PointId>, name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            latitude: coords.latitude,
            longitude: coords.longitude,
            photo: None,
            audio_file: None,
            video: None,
            is_intermediate: false,
            extra: Map::new(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = coords.latitude;
        self.longitude = coords.longitude;
    }

    pub fn is_visitable(&self) -> bool {
        !self.is_intermediate
    }

    pub fn photo_url(&self, media_base: &str) -> Option<String> {
        self.photo.as_deref().map(|p| resolve_media_url(p, media_base))
    }

    pub fn audio_url(&self, media_base: &str) -> Option<String> {
        self.audio_file.as_deref().map(|p| resolve_media_url(p, media_base))
    }

    pub fn video_url(&self, media_base: &str) -> Option<String> {
        self.video.as_deref().map(|p| resolve_media_url(p, media_base))
    }
}

/// A point together with its 1-based position in the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub order: u32,
    pub point: Point,
    /// Backend row fields such as the route-point `id`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoutePoint {
    pub fn new(order: u32, point: Point) -> Self {
        Self {
            order,
            point,
            extra: Map::new(),
        }
    }
}

/// Resolve a media path served by the backend.
///
/// Absolute `http(s)` URLs pass through untouched; anything else is joined
/// onto `media_base` with exactly one slash in between.
pub fn resolve_media_url(path: &str, media_base: &str) -> String {
    if path.starts_with("http") || media_base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        media_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
