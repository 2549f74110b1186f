//! Route editing session.
//!
//! Holds the last saved quest next to a working copy of its points and
//! details (name, description, cover). Edits stay in memory until
//! [`RouteEditor::save`] succeeds; a failed save keeps both the edits and the
//! pending-changes flag.

use crate::api::QuestStore;
use crate::model::{Coordinates, Point, PointId, Quest, RoutePoint};
use crate::observability::metrics;
use crate::route::optimizer::optimize;
use crate::route::ordering;
use crate::route::{RouteError, RouteResult};

/// Quest metadata editable next to the route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestDetails {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl QuestDetails {
    fn of(quest: &Quest) -> Self {
        Self {
            name: quest.name.clone(),
            description: quest.description.clone(),
            image_url: quest.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteEditor {
    saved: Quest,
    details: QuestDetails,
    points: Vec<RoutePoint>,
    has_changes: bool,
}

impl RouteEditor {
    /// Start editing. The quest is normalized first so orders are dense.
    pub fn new(quest: Quest) -> RouteResult<Self> {
        let saved = quest.normalized()?;
        let points = saved.points.clone();
        let details = QuestDetails::of(&saved);
        Ok(Self {
            saved,
            details,
            points,
            has_changes: false,
        })
    }

    pub fn quest(&self) -> &Quest {
        &self.saved
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn details(&self) -> &QuestDetails {
        &self.details
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    fn touched(&mut self, changed: bool) -> bool {
        self.has_changes |= changed;
        changed
    }

    pub fn move_to(&mut self, from: usize, to: usize) -> RouteResult<bool> {
        let changed = ordering::move_to(&mut self.points, from, to)?;
        Ok(self.touched(changed))
    }

    pub fn move_up(&mut self, index: usize) -> RouteResult<bool> {
        let changed = ordering::move_up(&mut self.points, index)?;
        Ok(self.touched(changed))
    }

    pub fn move_down(&mut self, index: usize) -> RouteResult<bool> {
        let changed = ordering::move_down(&mut self.points, index)?;
        Ok(self.touched(changed))
    }

    pub fn insert_at(&mut self, index: usize, point: Point) -> RouteResult<()> {
        ordering::insert_at(&mut self.points, index, point)?;
        self.touched(true);
        Ok(())
    }

    pub fn delete_at(&mut self, index: usize) -> RouteResult<RoutePoint> {
        let removed = ordering::delete_at(&mut self.points, index)?;
        self.touched(true);
        Ok(removed)
    }

    pub fn delete_point(&mut self, id: &PointId) -> RouteResult<RoutePoint> {
        let removed = ordering::delete_point(&mut self.points, id)?;
        self.touched(true);
        Ok(removed)
    }

    pub fn relocate(&mut self, id: &PointId, coords: Coordinates) -> RouteResult<()> {
        ordering::relocate(&mut self.points, id, coords)?;
        self.touched(true);
        Ok(())
    }

    /// Replace name, description and cover image.
    ///
    /// Name and description are required; an empty image URL clears the
    /// cover. Reports whether anything changed.
    pub fn set_details(&mut self, details: QuestDetails) -> RouteResult<bool> {
        let name = details.name.trim();
        if name.is_empty() {
            return Err(RouteError::EmptyField("name"));
        }
        let description = details.description.trim();
        if description.is_empty() {
            return Err(RouteError::EmptyField("description"));
        }
        let details = QuestDetails {
            name: name.to_string(),
            description: description.to_string(),
            image_url: details
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        };

        let changed = details != self.details;
        self.details = details;
        Ok(self.touched(changed))
    }

    /// Apply the naive optimizer. Reports whether the sequence changed.
    pub fn optimize(&mut self) -> bool {
        let before: Vec<PointId> = self.points.iter().map(|rp| rp.point.id.clone()).collect();
        optimize(&mut self.points);
        let changed = self
            .points
            .iter()
            .map(|rp| &rp.point.id)
            .ne(before.iter());
        self.touched(changed)
    }

    /// Throw away unsaved edits.
    pub fn discard(&mut self) {
        self.points = self.saved.points.clone();
        self.details = QuestDetails::of(&self.saved);
        self.has_changes = false;
    }

    /// The full quest as it would be sent on save.
    pub fn payload(&self) -> Quest {
        Quest {
            name: self.details.name.clone(),
            description: self.details.description.clone(),
            image_url: self.details.image_url.clone(),
            points: self.points.clone(),
            ..self.saved.clone()
        }
    }

    /// PUT the working copy to the backend.
    pub async fn save<S: QuestStore>(&mut self, store: &S) -> RouteResult<()> {
        if !self.has_changes {
            return Err(RouteError::NoChanges);
        }

        let payload = self.payload();
        match store.update_quest(&payload).await {
            Ok(()) => {
                metrics::record_route_save("ok");
                tracing::info!(quest_id = %payload.id, points = payload.points.len(), "Route saved");
                self.saved = payload;
                self.has_changes = false;
                Ok(())
            }
            Err(e) => {
                metrics::record_route_save("error");
                tracing::error!(quest_id = %payload.id, error = %e, "Route save failed, edits kept");
                Err(RouteError::Save(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use crate::model::QuestId;
    use crate::route::ordering::is_dense;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        fail: AtomicBool,
        saved: Mutex<Vec<Quest>>,
    }

    impl QuestStore for RecordingStore {
        async fn list_quests(&self) -> ApiResult<Vec<Quest>> {
            Ok(self.saved.lock().unwrap().clone())
        }
        async fn get_quest(&self, id: &QuestId) -> ApiResult<Quest> {
            Err(ApiError::NotFound(id.to_string()))
        }
        async fn update_quest(&self, quest: &Quest) -> ApiResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Status { status: 500, body: "boom".into() });
            }
            self.saved.lock().unwrap().push(quest.clone());
            Ok(())
        }
    }

    fn quest() -> Quest {
        let mut q = Quest::new(5u64, "walk");
        q.points = (1..=4u64)
            .map(|i| RoutePoint::new(i as u32, Point::new(i, format!("p{i}"), Coordinates::new(0.0, i as f64))))
            .collect();
        q
    }

    #[test]
    fn test_noop_moves_leave_clean_state() {
        let mut editor = RouteEditor::new(quest()).unwrap();
        assert!(!editor.move_up(0).unwrap());
        assert!(!editor.move_to(2, 2).unwrap());
        assert!(!editor.has_changes());
        assert!(editor.move_down(0).unwrap());
        assert!(editor.has_changes());
    }

    #[test]
    fn test_discard_restores_saved_points() {
        let mut editor = RouteEditor::new(quest()).unwrap();
        editor.delete_at(1).unwrap();
        assert_eq!(editor.points().len(), 3);
        editor.discard();
        assert_eq!(editor.points(), editor.quest().points.as_slice());
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_optimize_already_sorted_is_clean() {
        let mut editor = RouteEditor::new(quest()).unwrap();
        assert!(!editor.optimize());
        assert!(!editor.has_changes());
    }

    #[tokio::test]
    async fn test_save_without_changes_rejected() {
        let store = RecordingStore::default();
        let mut editor = RouteEditor::new(quest()).unwrap();
        assert!(matches!(editor.save(&store).await, Err(RouteError::NoChanges)));
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits_for_retry() {
        let store = RecordingStore::default();
        store.fail.store(true, Ordering::SeqCst);

        let mut editor = RouteEditor::new(quest()).unwrap();
        editor.move_to(3, 0).unwrap();
        assert!(matches!(editor.save(&store).await, Err(RouteError::Save(_))));
        assert!(editor.has_changes());
        assert_eq!(editor.points()[0].point.id, PointId::from(4u64));

        store.fail.store(false, Ordering::SeqCst);
        editor.save(&store).await.unwrap();
        assert!(!editor.has_changes());

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, QuestId::from(5u64));
        assert_eq!(saved[0].points[0].point.id, PointId::from(4u64));
        assert!(is_dense(&saved[0].points));
        assert_eq!(editor.quest(), &saved[0]);
    }

    #[test]
    fn test_set_details() {
        let mut editor = RouteEditor::new(quest()).unwrap();
        let unchanged = editor.details().clone();

        let renamed = QuestDetails {
            name: "  Riverside walk ".into(),
            description: "Along the river".into(),
            image_url: Some(String::new()),
        };
        assert!(editor.set_details(renamed.clone()).unwrap());
        assert!(editor.has_changes());
        assert_eq!(editor.details().name, "Riverside walk");
        assert_eq!(editor.details().image_url, None);
        assert!(!editor.set_details(renamed).unwrap());

        let payload = editor.payload();
        assert_eq!(payload.name, "Riverside walk");
        assert_eq!(payload.description, "Along the river");
        assert_eq!(payload.points, editor.points());

        editor.discard();
        assert_eq!(editor.details(), &unchanged);
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_set_details_requires_name_and_description() {
        let mut editor = RouteEditor::new(quest()).unwrap();
        let blank_name = QuestDetails {
            name: "   ".into(),
            description: "d".into(),
            image_url: None,
        };
        assert!(matches!(editor.set_details(blank_name), Err(RouteError::EmptyField("name"))));

        let blank_description = QuestDetails {
            name: "walk".into(),
            description: String::new(),
            image_url: None,
        };
        assert!(matches!(
            editor.set_details(blank_description),
            Err(RouteError::EmptyField("description"))
        ));
        assert!(!editor.has_changes());
    }
}
