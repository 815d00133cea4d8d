//! Session mood log with whole-file JSON persistence.
//!
//! The on-disk copy and the in-memory copy are independent: nothing is
//! written until [`MoodLogStore::persist`] and nothing is read until
//! [`MoodLogStore::restore`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::models::mood::{Mood, MoodEntry};

#[derive(Debug, thiserror::Error)]
pub enum MoodLogError {
    #[error("Failed to access mood log at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed mood log at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode mood log: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct MoodLogStore {
    path: PathBuf,
    entries: Vec<MoodEntry>,
}

impl MoodLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp today's date and append.
    pub fn append(&mut self, mood: Mood) -> MoodEntry {
        self.append_on(Utc::now().date_naive(), mood)
    }

    pub fn append_on(&mut self, date: NaiveDate, mood: Mood) -> MoodEntry {
        let entry = MoodEntry { date, mood };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` means there is no data to show or analyze.
    pub fn to_table(&self) -> Option<MoodTable> {
        if self.is_empty() {
            return None;
        }
        Some(MoodTable {
            rows: self.entries.clone(),
        })
    }

    /// Overwrite the file with the full in-memory sequence.
    pub async fn persist(&self) -> Result<(), MoodLogError> {
        let json = serde_json::to_vec(&self.entries)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| MoodLogError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "Mood log saved");
        Ok(())
    }

    /// Replace the in-memory sequence with the file's contents. A missing
    /// file is a cold start and yields an empty log.
    pub async fn restore(&mut self) -> Result<&[MoodEntry], MoodLogError> {
        self.entries = load_entries(&self.path).await?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "Mood log loaded");
        Ok(&self.entries)
    }
}

async fn load_entries(path: &Path) -> Result<Vec<MoodEntry>, MoodLogError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(MoodLogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes).map_err(|source| MoodLogError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-empty tabular view of a mood log.
#[derive(Debug, Clone)]
pub struct MoodTable {
    rows: Vec<MoodEntry>,
}

impl MoodTable {
    pub fn rows(&self) -> &[MoodEntry] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<MoodEntry> {
        self.rows
    }

    /// Plain-text grid with a row index, one line per entry.
    pub fn render(&self) -> String {
        let index_width = (self.rows.len() - 1).to_string().len();
        let mood_width = self
            .rows
            .iter()
            .map(|r| r.mood.as_str().len())
            .max()
            .unwrap_or(0)
            .max("mood".len());

        let mut out = format!(
            "{:iw$}  {:>10}  {:>mw$}",
            "",
            "date",
            "mood",
            iw = index_width,
            mw = mood_width
        );
        for (i, row) in self.rows.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!(
                "{:<iw$}  {:>10}  {:>mw$}",
                i,
                row.date.format("%Y-%m-%d").to_string(),
                row.mood.as_str(),
                iw = index_width,
                mw = mood_width
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_append_keeps_insertion_order_and_duplicates() {
        let mut store = MoodLogStore::new("unused.json");
        store.append_on(date(2), Mood::Calm);
        store.append_on(date(1), Mood::Sad);
        store.append_on(date(1), Mood::Sad);

        let moods: Vec<_> = store.entries().iter().map(|e| (e.date, e.mood)).collect();
        assert_eq!(
            moods,
            vec![(date(2), Mood::Calm), (date(1), Mood::Sad), (date(1), Mood::Sad)]
        );
    }

    #[test]
    fn test_append_stamps_today() {
        let mut store = MoodLogStore::new("unused.json");
        let entry = store.append(Mood::Happy);
        assert_eq!(entry.date, Utc::now().date_naive());
    }

    #[test]
    fn test_empty_log_has_no_table() {
        let store = MoodLogStore::new("unused.json");
        assert!(store.to_table().is_none());
    }

    #[test]
    fn test_table_render() {
        let mut store = MoodLogStore::new("unused.json");
        store.append_on(date(3), Mood::Happy);
        store.append_on(date(4), Mood::Stressed);

        let rendered = store.to_table().unwrap().render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("date") && lines[0].contains("mood"));
        assert!(lines[1].starts_with('0') && lines[1].ends_with("Happy"));
        assert!(lines[2].contains("2024-06-04") && lines[2].ends_with("Stressed"));
    }

    #[tokio::test]
    async fn test_restore_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MoodLogStore::new(dir.path().join("missing.json"));
        store.append_on(date(1), Mood::Angry);

        let restored = store.restore().await.unwrap();
        assert!(restored.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MoodLogStore::new(dir.path().join("mood_log.json"));
        store.persist().await.unwrap();

        assert!(store.restore().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");
        let mut store = MoodLogStore::new(&path);
        store.append_on(date(5), Mood::Tired);
        store.append_on(date(3), Mood::Calm);
        store.append_on(date(5), Mood::Anxious);
        let original = store.entries().to_vec();
        store.persist().await.unwrap();

        let mut reloaded = MoodLogStore::new(&path);
        assert_eq!(reloaded.restore().await.unwrap(), original.as_slice());
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");
        let mut store = MoodLogStore::new(&path);
        store.append_on(date(1), Mood::Sad);
        store.append_on(date(2), Mood::Sad);
        store.persist().await.unwrap();

        let mut shorter = MoodLogStore::new(&path);
        shorter.append_on(date(9), Mood::Happy);
        shorter.persist().await.unwrap();

        let on_disk: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!([{ "date": "2024-06-09", "mood": "Happy" }]));
    }

    #[tokio::test]
    async fn test_disk_and_memory_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");
        let mut store = MoodLogStore::new(&path);
        store.append_on(date(1), Mood::Calm);

        assert!(!path.exists());
        store.persist().await.unwrap();
        store.append_on(date(2), Mood::Angry);

        let mut other = MoodLogStore::new(&path);
        assert_eq!(other.restore().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");
        std::fs::write(&path, b"{not json").unwrap();

        let mut store = MoodLogStore::new(&path);
        assert!(matches!(store.restore().await, Err(MoodLogError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = MoodLogStore::new(dir.path().join("no_such_dir").join("mood_log.json"));
        assert!(matches!(store.persist().await, Err(MoodLogError::Io { .. })));
    }
}
