//! Location-based quest tours: route model, point ordering, geofenced
//! visits, completion gate, password-gated route editing and a client for
//! the routes API.

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod geo;
pub mod model;
pub mod observability;
pub mod progress;
pub mod route;

pub use api::{QuestStore, RoutesClient};
pub use config::QuestConfig;
pub use model::{Coordinates, Point, PointId, Quest, QuestId, RoutePoint};
pub use progress::QuestProgress;
pub use route::RouteEditor;
