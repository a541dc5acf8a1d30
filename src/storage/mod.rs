//! Identifier persistence.
//!
//! The store holds exactly one current identifier in canonical text form.
//! It never validates what it is given; callers hand it codec output or text
//! they already checked.

mod json_store;

pub use json_store::{IdentifierRecord, JsonStore};

use crate::error::StorageResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier reported by a store that has never been written.
pub const DEFAULT_IDENTIFIER: &str = "00000000";

/// Where the current identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierSource {
    /// Typed in by the user.
    Manual,
    /// Randomly generated.
    Generated,
    /// Captured from a physical tag.
    Scanned,
    /// Written without saying where it came from.
    Unspecified,
    /// Nothing stored yet.
    Default,
}

impl fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Generated => write!(f, "generated"),
            Self::Scanned => write!(f, "scanned"),
            Self::Unspecified => write!(f, "unspecified"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Persistence collaborator for the current identifier.
pub trait IdentifierStore {
    /// The last stored identifier, or the store's default if none was set.
    fn get_current(&self) -> StorageResult<String>;

    /// Overwrite the stored identifier unconditionally.
    fn set_current(&mut self, text: &str) -> StorageResult<()>;

    /// Overwrite the stored identifier, noting where it came from.
    ///
    /// Stores that do not keep provenance just call `set_current`.
    fn set_current_from(&mut self, text: &str, source: IdentifierSource) -> StorageResult<()> {
        let _ = source;
        self.set_current(text)
    }
}

/// In-memory store, used by tests and as a scratch store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    current: Option<String>,
    default: String,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store with the standard default.
    pub fn new() -> Self {
        Self::with_default(DEFAULT_IDENTIFIER)
    }

    /// Create an empty store reporting `default` until first written.
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            current: None,
            default: default.into(),
            writes: 0,
        }
    }

    /// Create a store that already holds `text`.
    pub fn holding(text: impl Into<String>) -> Self {
        Self {
            current: Some(text.into()),
            ..Self::new()
        }
    }

    /// Whether anything was ever written.
    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    /// Number of `set_current` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierStore for MemoryStore {
    fn get_current(&self) -> StorageResult<String> {
        Ok(self.current.clone().unwrap_or_else(|| self.default.clone()))
    }

    fn set_current(&mut self, text: &str) -> StorageResult<()> {
        self.current = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
