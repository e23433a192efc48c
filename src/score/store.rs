//! Durable storage for the best score.
//!
//! The file backend keeps a small JSON object mapping keys to integers, so
//! several values can share one file.

use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {path:?} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("value stored under {key:?} is not a non-negative integer")]
    InvalidValue { key: String },
}

/// Key-value persistence of a single integer
pub trait HighScoreStore {
    /// `Ok(None)` when nothing was stored yet
    fn load_high_score(&self) -> Result<Option<u32>, StoreError>;

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Stores the value under `key` in a JSON object file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn read_map(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&self) -> Result<Option<u32>, StoreError> {
        let Some(map) = self.read_map()? else {
            return Ok(None);
        };

        match map.get(&self.key) {
            None => Ok(None),
            Some(value) => stored_score(value)
                .map(Some)
                .ok_or_else(|| StoreError::InvalidValue {
                    key: self.key.clone(),
                }),
        }
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the save
        let mut map = match self.read_map() {
            Ok(map) => map.unwrap_or_default(),
            Err(StoreError::Parse { .. }) => Map::new(),
            Err(err) => return Err(err),
        };

        // The stored value only ever goes up, and an unreadable one is left alone
        if let Some(existing) = map.get(&self.key) {
            match stored_score(existing) {
                Some(current) if current >= score => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(StoreError::InvalidValue {
                        key: self.key.clone(),
                    });
                }
            }
        }
        map.insert(self.key.clone(), Value::from(score));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|source| {
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads a score written as an integer, a whole float (`40.0`) or a numeric
/// string (`"40"`)
fn stored_score(value: &Value) -> Option<u32> {
    let score = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(score).ok()
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: Vec<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            saves: Vec::new(),
        }
    }

    /// Every value written, in order
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        self.saves.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"), "high-score");
        assert!(store.load_high_score().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = FileStore::new(&path, "high-score");

        store.save_high_score(12).unwrap();
        assert!(path.exists());

        let reopened = FileStore::new(&path, "high-score");
        assert_eq!(reopened.load_high_score().unwrap(), Some(12));
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "volume": 3 }"#).unwrap();

        let mut store = FileStore::new(&path, "high-score");
        store.save_high_score(5).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let map: Map<String, Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(map.get("volume"), Some(&Value::from(3)));
        assert_eq!(map.get("high-score"), Some(&Value::from(5)));
    }

    #[test]
    fn test_corrupt_file_is_an_error_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path, "high-score");
        assert!(matches!(
            store.load_high_score(),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{{{").unwrap();

        let mut store = FileStore::new(&path, "high-score");
        store.save_high_score(4).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(4));
    }

    #[test]
    fn test_negative_value_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "high-score": -3 }"#).unwrap();

        let store = FileStore::new(&path, "high-score");
        assert!(matches!(
            store.load_high_score(),
            Err(StoreError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_memory_store_records_saves() {
        let mut store = MemoryStore::with_value(2);
        assert_eq!(store.load_high_score().unwrap(), Some(2));
        store.save_high_score(7).unwrap();
        assert_eq!(store.saves(), &[7]);
        assert_eq!(store.load_high_score().unwrap(), Some(7));
    }

    #[test]
    fn test_float_and_string_values_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let store = FileStore::new(&path, "high-score");

        std::fs::write(&path, r#"{ "high-score": 40.0 }"#).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(40));

        std::fs::write(&path, r#"{ "high-score": "40" }"#).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(40));

        std::fs::write(&path, r#"{ "high-score": 40.5 }"#).unwrap();
        assert!(store.load_high_score().is_err());
    }

    #[test]
    fn test_save_never_lowers_stored_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "high-score": 40.0 }"#).unwrap();

        let mut store = FileStore::new(&path, "high-score");
        store.save_high_score(1).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(40));

        store.save_high_score(41).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(41));
    }

    #[test]
    fn test_save_leaves_unreadable_value_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "high-score": "lots" }"#).unwrap();

        let mut store = FileStore::new(&path, "high-score");
        assert!(matches!(
            store.save_high_score(3),
            Err(StoreError::InvalidValue { .. })
        ));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("lots"));
    }
}
