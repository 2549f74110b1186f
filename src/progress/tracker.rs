//! Quest-taking state: which points were visited and whether the quest may
//! be completed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::geo::{Geofence, Proximity};
use crate::model::{Coordinates, PointId, Quest, QuestId};
use crate::observability::metrics;
use crate::progress::{ProgressError, ProgressResult};

/// Result of trying to visit a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VisitOutcome {
    /// Newly marked as visited.
    Visited { point_id: PointId },
    /// Within range but already visited; nothing changed.
    AlreadyVisited { point_id: PointId },
    /// Out of range; the user should come closer.
    TooFar { point_id: PointId, remaining_m: u64 },
    /// No user position available.
    LocationRequired,
}

impl VisitOutcome {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            VisitOutcome::Visited { .. } => "Point visited".to_string(),
            VisitOutcome::AlreadyVisited { .. } => "Point already visited".to_string(),
            VisitOutcome::TooFar { remaining_m, .. } => {
                format!("Come closer to the point. {} meters to go", remaining_m)
            }
            VisitOutcome::LocationRequired => {
                "Location access is required to visit points".to_string()
            }
        }
    }
}

/// Statistics reported when a quest is completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionSummary {
    pub quest_id: QuestId,
    pub quest_name: String,
    pub points_visited: usize,
    /// Route length in kilometers, rounded to two decimals.
    pub distance_km: f64,
    pub elapsed_secs: u64,
}

impl CompletionSummary {
    /// Elapsed time formatted as `HH:MM:SS`.
    pub fn elapsed_hms(&self) -> String {
        let s = self.elapsed_secs;
        format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
    }
}

/// Serializable form of [`QuestProgress`] for persistence between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub quest_id: QuestId,
    pub visited: Vec<PointId>,
    pub started_at_ms: u64,
}

/// Progress through one quest.
#[derive(Debug, Clone)]
pub struct QuestProgress {
    quest: Quest,
    geofence: Geofence,
    visited: BTreeSet<PointId>,
    started_at_ms: u64,
}

impl QuestProgress {
    pub fn start(quest: Quest, geofence: Geofence, now_ms: u64) -> Self {
        tracing::info!(quest_id = %quest.id, points = quest.visitable_count(), "Quest started");
        Self {
            quest,
            geofence,
            visited: BTreeSet::new(),
            started_at_ms: now_ms,
        }
    }

    /// Rebuild from a snapshot. Ids no longer in the quest are dropped.
    pub fn restore(quest: Quest, geofence: Geofence, snapshot: ProgressSnapshot) -> ProgressResult<Self> {
        if snapshot.quest_id != quest.id {
            return Err(ProgressError::QuestMismatch {
                expected: quest.id.clone(),
                found: snapshot.quest_id,
            });
        }
        let visited = snapshot
            .visited
            .into_iter()
            .filter(|id| quest.find_point(id).is_some_and(|rp| rp.point.is_visitable()))
            .collect();
        Ok(Self {
            quest,
            geofence,
            visited,
            started_at_ms: snapshot.started_at_ms,
        })
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            quest_id: self.quest.id.clone(),
            visited: self.visited.iter().cloned().collect(),
            started_at_ms: self.started_at_ms,
        }
    }

    pub fn quest(&self) -> &Quest {
        &self.quest
    }

    pub fn is_visited(&self, id: &PointId) -> bool {
        self.visited.contains(id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn total_points(&self) -> usize {
        self.quest.visitable_count()
    }

    pub fn can_complete(&self) -> bool {
        self.visited_count() == self.total_points()
    }

    /// Try to visit `point_id` from the user's position.
    pub fn visit(&mut self, point_id: &PointId, location: Option<Coordinates>) -> ProgressResult<VisitOutcome> {
        let rp = self
            .quest
            .find_point(point_id)
            .ok_or_else(|| ProgressError::UnknownPoint(point_id.clone()))?;
        if !rp.point.is_visitable() {
            return Err(ProgressError::NotVisitable(point_id.clone()));
        }

        let Some(user) = location else {
            metrics::record_visit_rejected("no_location");
            return Ok(VisitOutcome::LocationRequired);
        };

        match self.geofence.check(user, rp.point.coordinates()) {
            Proximity::Within { distance_km } => {
                if self.visited.insert(point_id.clone()) {
                    metrics::record_point_visited();
                    tracing::info!(
                        quest_id = %self.quest.id,
                        point_id = %point_id,
                        distance_m = (distance_km * 1000.0).round() as u64,
                        "Point visited"
                    );
                    Ok(VisitOutcome::Visited { point_id: point_id.clone() })
                } else {
                    Ok(VisitOutcome::AlreadyVisited { point_id: point_id.clone() })
                }
            }
            Proximity::TooFar { remaining_m } => {
                metrics::record_visit_rejected("too_far");
                tracing::debug!(point_id = %point_id, remaining_m, "Point out of range");
                Ok(VisitOutcome::TooFar {
                    point_id: point_id.clone(),
                    remaining_m,
                })
            }
        }
    }

    /// Complete the quest if every visitable point was visited.
    pub fn complete(&self, now_ms: u64) -> ProgressResult<CompletionSummary> {
        let visited = self.visited_count();
        let total = self.total_points();
        if visited != total {
            metrics::record_completion("incomplete");
            return Err(ProgressError::Incomplete { visited, total });
        }

        metrics::record_completion("completed");
        let elapsed = Duration::from_millis(now_ms.saturating_sub(self.started_at_ms));
        let summary = CompletionSummary {
            quest_id: self.quest.id.clone(),
            quest_name: self.quest.name.clone(),
            points_visited: visited,
            distance_km: (self.quest.route_length_km() * 100.0).round() / 100.0,
            elapsed_secs: elapsed.as_secs(),
        };
        tracing::info!(quest_id = %summary.quest_id, elapsed_secs = summary.elapsed_secs, "Quest completed");
        Ok(summary)
    }
}
