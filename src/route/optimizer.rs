//! Naive route optimizer.
//!
//! Keeps the first and last points fixed and sorts everything in between
//! by straight-line distance from the first point. Distances are planar on
//! raw lat/lng degrees, so this is a heuristic for short city routes and
//! not a TSP solver: it gives no optimality guarantee and distorts east-west
//! spacing away from the equator.

use std::cmp::Ordering;

use crate::geo::distance::planar_distance;
use crate::model::RoutePoint;
use crate::route::ordering::reindex;

/// Reorder `points` in place. Lists shorter than three are only reindexed.
pub fn optimize(points: &mut [RoutePoint]) {
    if points.len() >= 3 {
        let origin = points[0].point.coordinates();
        let last = points.len() - 1;
        // Stable: equidistant points keep their current relative order.
        points[1..last].sort_by(|a, b| {
            let da = planar_distance(origin, a.point.coordinates());
            let db = planar_distance(origin, b.point.coordinates());
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
    }
    reindex(points);
}
