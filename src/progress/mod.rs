//! Quest-taking subsystem.
//!
//! # Data Flow
//! ```text
//! user position + point id
//!     → tracker.rs (geofence check, visited set)
//!     → complete: visited == visitable points → CompletionSummary
//!     → store.rs (snapshot between CLI runs)
//! ```

pub mod store;
pub mod tracker;

use thiserror::Error;

use crate::model::{PointId, QuestId};

pub use store::ProgressStore;
pub use tracker::{CompletionSummary, ProgressSnapshot, QuestProgress, VisitOutcome};

/// Errors from the quest-taking flow.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Not all quest points have been visited ({visited} of {total})")]
    Incomplete { visited: usize, total: usize },

    #[error("Point {0} is not part of this quest")]
    UnknownPoint(PointId),

    #[error("Point {0} only shapes the route and cannot be visited")]
    NotVisitable(PointId),

    #[error("Saved progress belongs to quest {found}, not {expected}")]
    QuestMismatch { expected: QuestId, found: QuestId },

    #[error("Progress storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProgressResult<T> = Result<T, ProgressError>;
