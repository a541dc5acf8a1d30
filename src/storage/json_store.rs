//! JSON-based identifier storage.
//!
//! Keeps the current identifier in a single JSON file. Writes go to a
//! temporary file that is then renamed over the old record, so a reader sees
//! either the previous or the new identifier and never a torn write.

use super::{IdentifierSource, IdentifierStore};
use crate::config::Paths;
use crate::error::{StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted identifier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    /// Canonical identifier text.
    pub identifier: String,
    /// Where the identifier came from.
    pub source: IdentifierSource,
    /// When it was stored.
    pub updated_at: DateTime<Utc>,
}

impl IdentifierRecord {
    /// Create a record stamped with the current time.
    pub fn new(identifier: impl Into<String>, source: IdentifierSource) -> Self {
        Self {
            identifier: identifier.into(),
            source,
            updated_at: Utc::now(),
        }
    }
}

/// JSON file-backed identifier store.
#[derive(Debug, Clone)]
pub struct JsonStore {
    file: PathBuf,
    default: String,
}

impl JsonStore {
    /// Open the store in the application data directory.
    pub fn open(paths: &Paths, default: impl Into<String>) -> StorageResult<Self> {
        fs::create_dir_all(&paths.data_dir)
            .map_err(|e| StorageError::DirectoryError(e.to_string()))?;

        Ok(Self::at(paths.identifier_file(), default))
    }

    /// Use an explicit record file.
    pub fn at(file: impl Into<PathBuf>, default: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            default: default.into(),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Load the stored record, if one exists.
    pub fn load(&self) -> StorageResult<Option<IdentifierRecord>> {
        if !self.file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file).map_err(|e| StorageError::LoadFailed {
            path: self.file.clone(),
            reason: e.to_string(),
        })?;

        let record = serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.file.display(), e)))?;
        Ok(Some(record))
    }

    /// The stored record, or a synthetic record for the default identifier.
    pub fn record(&self) -> StorageResult<IdentifierRecord> {
        Ok(self.load()?.unwrap_or_else(|| IdentifierRecord {
            identifier: self.default.clone(),
            source: IdentifierSource::Default,
            updated_at: DateTime::<Utc>::default(),
        }))
    }

    /// Write a record, replacing the previous one.
    pub fn save(&self, record: &IdentifierRecord) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(record)?;
        let tmp = self.file.with_extension("json.tmp");

        fs::write(&tmp, content).map_err(|e| StorageError::SaveFailed {
            path: tmp.clone(),
            reason: e.to_string(),
        })?;
        fs::rename(&tmp, &self.file).map_err(|e| StorageError::SaveFailed {
            path: self.file.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            identifier = %record.identifier,
            source = %record.source,
            "identifier stored"
        );
        Ok(())
    }
}

impl IdentifierStore for JsonStore {
    fn get_current(&self) -> StorageResult<String> {
        Ok(self.record()?.identifier)
    }

    fn set_current(&mut self, text: &str) -> StorageResult<()> {
        self.set_current_from(text, IdentifierSource::Unspecified)
    }

    fn set_current_from(&mut self, text: &str, source: IdentifierSource) -> StorageResult<()> {
        self.save(&IdentifierRecord::new(text, source))
    }
}
