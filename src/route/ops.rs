//! Textual edit operations, as typed on the command line.
//!
//! Positions are 1-based route orders, matching what `show` prints.
//!
//! ```text
//! move:FROM:TO                 drag the point at FROM to TO
//! up:POS | down:POS            swap with the neighbour
//! delete:POS                   remove by position
//! delete-point:ID              remove by point id
//! relocate:ID:LAT:LNG          move a point on the map
//! insert:POS:ID:LAT:LNG:NAME   add a new point at POS
//! optimize                     nearest-from-first reordering
//! ```

use std::fmt;
use std::str::FromStr;

use crate::model::{Coordinates, Point, PointId};
use crate::route::editor::RouteEditor;
use crate::route::RouteResult;

#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Move { from: usize, to: usize },
    Up(usize),
    Down(usize),
    Delete(usize),
    DeletePoint(PointId),
    Relocate { id: PointId, coords: Coordinates },
    Insert { position: usize, point: Point },
    Optimize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOpError(String);

impl fmt::Display for ParseOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid edit operation: {}", self.0)
    }
}

impl std::error::Error for ParseOpError {}

fn position(raw: &str, op: &str) -> Result<usize, ParseOpError> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(ParseOpError(format!("{op}: '{raw}' is not a 1-based position"))),
        Ok(n) => Ok(n - 1),
    }
}

fn degrees(raw: &str, op: &str) -> Result<f64, ParseOpError> {
    raw.parse::<f64>()
        .map_err(|_| ParseOpError(format!("{op}: '{raw}' is not a coordinate")))
}

impl FromStr for EditOp {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            ["move", from, to] => Ok(EditOp::Move {
                from: position(from, "move")?,
                to: position(to, "move")?,
            }),
            ["up", pos] => Ok(EditOp::Up(position(pos, "up")?)),
            ["down", pos] => Ok(EditOp::Down(position(pos, "down")?)),
            ["delete", pos] => Ok(EditOp::Delete(position(pos, "delete")?)),
            ["delete-point", id] if !id.is_empty() => Ok(EditOp::DeletePoint(PointId::from(*id))),
            ["relocate", id, lat, lng] if !id.is_empty() => Ok(EditOp::Relocate {
                id: PointId::from(*id),
                coords: Coordinates::new(degrees(lat, "relocate")?, degrees(lng, "relocate")?),
            }),
            ["insert", pos, id, lat, lng, name] if !id.is_empty() => Ok(EditOp::Insert {
                position: position(pos, "insert")?,
                point: Point::new(
                    PointId::from(*id),
                    *name,
                    Coordinates::new(degrees(lat, "insert")?, degrees(lng, "insert")?),
                ),
            }),
            ["optimize"] => Ok(EditOp::Optimize),
            _ => Err(ParseOpError(s.to_string())),
        }
    }
}

impl EditOp {
    /// Apply to an editing session.
    pub fn apply(&self, editor: &mut RouteEditor) -> RouteResult<()> {
        match self {
            EditOp::Move { from, to } => editor.move_to(*from, *to).map(|_| ()),
            EditOp::Up(index) => editor.move_up(*index).map(|_| ()),
            EditOp::Down(index) => editor.move_down(*index).map(|_| ()),
            EditOp::Delete(index) => editor.delete_at(*index).map(|_| ()),
            EditOp::DeletePoint(id) => editor.delete_point(id).map(|_| ()),
            EditOp::Relocate { id, coords } => editor.relocate(id, *coords),
            EditOp::Insert { position, point } => editor.insert_at(*position, point.clone()),
            EditOp::Optimize => {
                editor.optimize();
                Ok(())
            }
        }
    }
}
