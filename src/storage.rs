//! Storage layer for taskpad
//!
//! A small key-value abstraction with a typed, self-persisting cell on top.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//!   tasks.json        # Serialized task collection (key "tasks")
//!   tasks.json.lock   # Advisory lock taken around every write
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::validate_key;
use crate::error::{Error, Result};
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};

/// Fallback data directory when no platform directory is available
pub const FALLBACK_DIR: &str = ".taskpad";

/// Raw key-value access
pub trait Backend {
    /// Stored text for `key`, or `None` if the key is absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key`; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
    lock_timeout_ms: u64,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    /// Platform data directory, e.g. `~/.local/share/taskpad`
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "taskpad")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)
            .map_err(|_| Error::InvalidArgument(format!("invalid store key '{key}'")))?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        lock::write_atomic_locked(&path, value.as_bytes(), self.lock_timeout_ms)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        lock::remove_locked(&path, self.lock_timeout_ms)
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization
    pub fn with_raw(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A value mirrored to a single storage key.
///
/// Loading never fails on bad data: a missing, unreadable, or corrupt value
/// yields `default`. Every `set` rewrites the whole value.
#[derive(Debug)]
pub struct Persisted<T, B> {
    backend: B,
    key: String,
    value: T,
    discarded: bool,
}

impl<T, B> Persisted<T, B>
where
    T: Serialize + DeserializeOwned,
    B: Backend,
{
    pub fn load(backend: B, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let mut discarded = false;
        let value = match backend.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "discarding unreadable stored value");
                    discarded = true;
                    default
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "no stored value, using default");
                default
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "store read failed, using default");
                default
            }
        };
        Self {
            backend,
            key,
            value,
            discarded,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True when a stored value existed but failed to parse at load time
    pub fn discarded(&self) -> bool {
        self.discarded
    }

    /// Replace the value and write it through.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.value = value;
        self.flush()
    }

    /// Write the current value through
    pub fn flush(&mut self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.value)?;
        self.backend.write(&self.key, &raw).inspect_err(|err| {
            tracing::error!(key = %self.key, error = %err, "failed to persist value");
        })
    }

    /// Remove the key from the backend and reset to `default`
    pub fn clear(&mut self, default: T) -> Result<()> {
        self.value = default;
        self.backend.remove(&self.key)
    }
}
