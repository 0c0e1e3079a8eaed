//! File-backed metrics store
//!
//! A single JSON record `{whoop, screentime, updatedAt}` on disk, read and
//! rewritten whole on every ingest. Missing or unreadable files fall back to
//! a seeded default record so a fresh install always has something to score.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::{ScreenTimePayload, WhoopPayload};
use crate::error::ScoreError;
use crate::types::FieldValue;

/// The one persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub whoop: WhoopPayload,
    pub screentime: ScreenTimePayload,
    pub updated_at: DateTime<Utc>,
}

impl Default for DailyRecord {
    fn default() -> Self {
        DailyRecord {
            whoop: WhoopPayload {
                recovery: FieldValue::Number(82.0),
                sleep_performance: FieldValue::Number(77.0),
                day_strain: FieldValue::Number(13.4),
                wake_time: Some("07:00".to_string()),
                bed_time: Some("23:30".to_string()),
            },
            screentime: ScreenTimePayload {
                social_hours: FieldValue::Number(3.1),
                other_hours: FieldValue::Number(2.4),
            },
            updated_at: Utc::now(),
        }
    }
}

/// Store for the latest daily record, backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the latest record, seeding the default when the file is missing
    /// or does not parse.
    pub fn load(&self) -> DailyRecord {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Write the record, creating parent directories as needed.
    pub fn save(&self, record: &DailyRecord) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Validate and store a new WHOOP payload, refreshing the timestamp.
    pub fn ingest_whoop(&self, whoop: WhoopPayload) -> Result<DailyRecord, ScoreError> {
        whoop.validate_for_ingest()?;
        let mut record = self.load();
        record.whoop = whoop;
        record.updated_at = Utc::now();
        self.save(&record)?;
        Ok(record)
    }

    /// Validate and store a new screen-time payload, refreshing the timestamp.
    pub fn ingest_screentime(
        &self,
        screentime: ScreenTimePayload,
    ) -> Result<DailyRecord, ScoreError> {
        screentime.validate_for_ingest()?;
        let mut record = self.load();
        record.screentime = screentime;
        record.updated_at = Utc::now();
        self.save(&record)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("latest.json"));
        (dir, store)
    }

    #[test]
    fn test_load_seeds_default_record() {
        let (_dir, store) = temp_store();
        let record = store.load();
        assert_eq!(record.whoop.recovery, FieldValue::Number(82.0));
        assert_eq!(record.screentime.social_hours, FieldValue::Number(3.1));
        assert_eq!(record.whoop.wake_time.as_deref(), Some("07:00"));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (_dir, store) = temp_store();
        let mut record = DailyRecord::default();
        record.whoop.recovery = FieldValue::Number(64.0);
        store.save(&record).unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded.whoop.recovery, FieldValue::Number(64.0));
    }

    #[test]
    fn test_record_wire_shape() {
        let record = DailyRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["whoop"]["sleepPerformance"].is_number());
        assert!(json["screentime"]["socialHours"].is_number());
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn test_ingest_whoop_replaces_and_stamps() {
        let (_dir, store) = temp_store();
        let before = store.load().updated_at;

        let whoop = WhoopPayload {
            recovery: FieldValue::Number(55.0),
            sleep_performance: FieldValue::Number(60.0),
            day_strain: FieldValue::Number(10.0),
            wake_time: Some("06:30".to_string()),
            bed_time: Some("22:45".to_string()),
        };
        let record = store.ingest_whoop(whoop).unwrap();

        assert_eq!(record.whoop.recovery, FieldValue::Number(55.0));
        assert!(record.updated_at >= before);
        // Screen-time half untouched by a whoop ingest.
        assert_eq!(record.screentime.other_hours, FieldValue::Number(2.4));
    }

    #[test]
    fn test_ingest_rejects_invalid_whoop() {
        let (_dir, store) = temp_store();
        let whoop = WhoopPayload {
            recovery: FieldValue::Text("high".to_string()),
            sleep_performance: FieldValue::Number(60.0),
            day_strain: FieldValue::Number(10.0),
            wake_time: Some("06:30".to_string()),
            bed_time: Some("22:45".to_string()),
        };
        assert!(store.ingest_whoop(whoop).is_err());
    }

    #[test]
    fn test_ingest_screentime() {
        let (_dir, store) = temp_store();
        let record = store
            .ingest_screentime(ScreenTimePayload {
                social_hours: FieldValue::Text("1.5".to_string()),
                other_hours: FieldValue::Number(0.5),
            })
            .unwrap();
        assert_eq!(
            record.screentime.social_hours,
            FieldValue::Text("1.5".to_string())
        );
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        let record = store.load();
        assert_eq!(record.whoop.recovery, FieldValue::Number(82.0));
    }
}
