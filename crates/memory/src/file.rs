//! Whole-file JSON persistence.
//!
//! Each store keeps its full contents in memory and rewrites the file on every
//! mutation. Writes go to a temporary file in the same directory which is then
//! renamed over the target, so a crash mid-write leaves the previous contents
//! intact. Concurrent writers are not coordinated: the last rename wins.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use pipeline::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// A JSON document stored at a fixed path.
#[derive(Debug, Clone)]
pub(crate) struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, falling back to `default` when the file is missing
    /// or cannot be decoded. A corrupt file is logged, not fatal.
    pub(crate) fn load_or<T: DeserializeOwned>(&self, default: impl FnOnce() -> T) -> T {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "store file is not valid JSON, starting fresh");
                    default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file not found, starting fresh");
                default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file unreadable, starting fresh");
                default()
            }
        }
    }

    /// Replaces the file with the pretty-printed JSON of `value`, creating the
    /// parent directory if needed.
    pub(crate) fn save<T: Serialize>(&self, value: &T) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialization {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.flush().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), bytes = json.len(), "store file written");
        Ok(())
    }

    fn io_error(&self, e: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}
