//! Route editing subsystem.
//!
//! # Data Flow
//! ```text
//! Quest (normalized)
//!     → editor.rs (working copy of points and details + pending-changes flag)
//!         → ordering.rs (drag, swap, insert, delete, relocate; reindex 1..N)
//!         → optimizer.rs (nearest-from-first heuristic)
//!         ← ops.rs (textual operations from the CLI)
//!     → save: PUT full quest via api::QuestStore
//! ```

pub mod editor;
pub mod ops;
pub mod optimizer;
pub mod ordering;

use thiserror::Error;

use crate::api::ApiError;
use crate::model::{ModelError, PointId};

pub use editor::{QuestDetails, RouteEditor};
pub use ops::EditOp;

/// Errors from route editing.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Index {index} out of range for route of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Point {0} is not part of this route")]
    PointNotFound(PointId),

    #[error("Point {0} is already part of this route")]
    DuplicatePoint(PointId),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Quest {0} must not be empty")]
    EmptyField(&'static str),

    #[error("No changes to save")]
    NoChanges,

    #[error("Save failed: {0}")]
    Save(#[source] ApiError),
}

pub type RouteResult<T> = Result<T, RouteError>;
