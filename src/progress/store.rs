//! Progress snapshots on disk, one JSON file per quest.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::model::QuestId;
use crate::progress::tracker::ProgressSnapshot;
use crate::progress::ProgressResult;

#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a quest. Bytes outside `[A-Za-z0-9_-]` are written as
    /// `%XX`, so distinct ids never share a file.
    fn path_for(&self, quest_id: &QuestId) -> PathBuf {
        let mut name = String::from("quest-");
        for byte in quest_id.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }

    /// Load a snapshot. Missing or unreadable snapshots read as `None`.
    pub fn load(&self, quest_id: &QuestId) -> ProgressResult<Option<ProgressSnapshot>> {
        let path = self.path_for(quest_id);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Ignoring corrupt progress snapshot");
                Ok(None)
            }
        }
    }

    pub fn save(&self, snapshot: &ProgressSnapshot) -> ProgressResult<()> {
        fs::create_dir_all(&self.dir)?;
        let file = File::create(self.path_for(&snapshot.quest_id))?;
        serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
            .map_err(std::io::Error::from)?;
        Ok(())
    }

    pub fn remove(&self, quest_id: &QuestId) -> ProgressResult<()> {
        let path = self.path_for(quest_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PointId;

    #[test]
    fn test_save_load_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path());
        let id = QuestId::new("old/town");
        assert_eq!(store.load(&id).unwrap(), None);

        let snapshot = ProgressSnapshot {
            quest_id: id.clone(),
            visited: vec![PointId::from(1u64)],
            started_at_ms: 5,
        };
        store.save(&snapshot).unwrap();
        assert!(dir.path().join("quest-old%2Ftown.json").exists());
        assert_eq!(store.load(&id).unwrap(), Some(snapshot));

        store.remove(&id).unwrap();
        assert_eq!(store.load(&id).unwrap(), None);
    }

    #[test]
    fn test_similar_ids_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path());
        let ids = ["old/town", "old_town", "old%2Ftown", "old town"].map(QuestId::new);

        for (i, id) in ids.iter().enumerate() {
            store
                .save(&ProgressSnapshot {
                    quest_id: id.clone(),
                    visited: Vec::new(),
                    started_at_ms: i as u64,
                })
                .unwrap();
        }
        for (i, id) in ids.iter().enumerate() {
            let loaded = store.load(id).unwrap().unwrap();
            assert_eq!(&loaded.quest_id, id);
            assert_eq!(loaded.started_at_ms, i as u64);
        }
    }

    #[test]
    fn test_corrupt_snapshot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path());
        let id = QuestId::from(7u64);
        fs::write(dir.path().join("quest-7.json"), "{ not json").unwrap();
        assert_eq!(store.load(&id).unwrap(), None);
    }
}
