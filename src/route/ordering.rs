//! Point ordering operations.
//!
//! Every mutation leaves the list with `order == index + 1` for each
//! element. Index errors leave the list untouched.

use crate::model::{Coordinates, Point, PointId, RoutePoint};
use crate::route::{RouteError, RouteResult};

/// Recompute `order` so it matches array position (1-based).
pub fn reindex(points: &mut [RoutePoint]) {
    for (index, rp) in points.iter_mut().enumerate() {
        rp.order = index as u32 + 1;
    }
}

fn check_index(points: &[RoutePoint], index: usize) -> RouteResult<()> {
    if index < points.len() {
        Ok(())
    } else {
        Err(RouteError::IndexOutOfRange { index, len: points.len() })
    }
}

/// Drag-and-drop: take the element at `from` and reinsert it at `to`.
///
/// Other elements keep their relative order. Returns `false` when
/// `from == to`.
pub fn move_to(points: &mut Vec<RoutePoint>, from: usize, to: usize) -> RouteResult<bool> {
    check_index(points, from)?;
    check_index(points, to)?;
    if from == to {
        return Ok(false);
    }
    let dragged = points.remove(from);
    points.insert(to, dragged);
    reindex(points);
    Ok(true)
}

/// Swap with the previous neighbour. No-op on the first element.
pub fn move_up(points: &mut [RoutePoint], index: usize) -> RouteResult<bool> {
    check_index(points, index)?;
    if index == 0 {
        return Ok(false);
    }
    points.swap(index, index - 1);
    reindex(points);
    Ok(true)
}

/// Swap with the next neighbour. No-op on the last element.
pub fn move_down(points: &mut [RoutePoint], index: usize) -> RouteResult<bool> {
    check_index(points, index)?;
    if index + 1 == points.len() {
        return Ok(false);
    }
    points.swap(index, index + 1);
    reindex(points);
    Ok(true)
}

/// Insert a new point at `index` (`0..=len`).
pub fn insert_at(points: &mut Vec<RoutePoint>, index: usize, point: Point) -> RouteResult<()> {
    if index > points.len() {
        return Err(RouteError::IndexOutOfRange { index, len: points.len() });
    }
    point.coordinates().validate()?;
    if points.iter().any(|rp| rp.point.id == point.id) {
        return Err(RouteError::DuplicatePoint(point.id));
    }
    points.insert(index, RoutePoint::new(0, point));
    reindex(points);
    Ok(())
}

/// Remove the element at `index`; later elements shift down by one.
pub fn delete_at(points: &mut Vec<RoutePoint>, index: usize) -> RouteResult<RoutePoint> {
    check_index(points, index)?;
    let removed = points.remove(index);
    reindex(points);
    Ok(removed)
}

/// Remove the element holding point `id`.
pub fn delete_point(points: &mut Vec<RoutePoint>, id: &PointId) -> RouteResult<RoutePoint> {
    let index = position_of(points, id)?;
    delete_at(points, index)
}

/// Move a point to new coordinates. Order is unchanged.
pub fn relocate(points: &mut [RoutePoint], id: &PointId, coords: Coordinates) -> RouteResult<()> {
    coords.validate()?;
    let index = position_of(points, id)?;
    points[index].point.set_coordinates(coords);
    Ok(())
}

pub fn position_of(points: &[RoutePoint], id: &PointId) -> RouteResult<usize> {
    points
        .iter()
        .position(|rp| &rp.point.id == id)
        .ok_or_else(|| RouteError::PointNotFound(id.clone()))
}

/// True when `order` is exactly `1..=N` in array order.
pub fn is_dense(points: &[RoutePoint]) -> bool {
    points
        .iter()
        .enumerate()
        .all(|(index, rp)| rp.order as usize == index + 1)
}
