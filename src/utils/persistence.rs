//! JSON persistence under ~/.flappy/, plus the key-value store holding the best score.

use crate::core::constants::HIGH_SCORE_KEY;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading or writing persisted data.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> Result<PathBuf, StoreError> {
    let dir = dirs::home_dir()
        .ok_or(StoreError::NoHomeDir)?
        .join(".flappy");
    fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn save_path(filename: &str) -> Result<PathBuf, StoreError> {
    Ok(flappy_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Synchronous named-scalar storage, the shape of a browser's local storage.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<f64>;
    fn set(&mut self, key: &str, value: f64) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Stored best score, 0 when absent.
    fn high_score(&self) -> f64 {
        self.get(HIGH_SCORE_KEY).unwrap_or(0.0)
    }

    fn set_high_score(&mut self, score: f64) -> Result<(), StoreError> {
        self.set(HIGH_SCORE_KEY, score)
    }
}

/// A JSON object on disk. Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Default store at ~/.flappy/storage.json.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::open(save_path("storage.json")?))
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = load_json_or_default(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    fn new_for_test() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir()
            .join(format!("flappy-test-{}-{}", std::process::id(), test_id))
            .join("storage.json");
        fs::remove_file(&path).ok();
        Self::open(path)
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            Value::Number(n) => n.as_f64(),
            // Browsers store everything as strings
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        let number = serde_json::Number::from_f64(value).map(Value::Number);
        self.entries
            .insert(key.to_string(), number.unwrap_or(Value::Null));
        save_json(&self.path, &self.entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            save_json(&self.path, &self.entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and for running without a home directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, f64>,
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
