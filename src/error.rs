//! Error types for hce-uid.
//!
//! Uses `thiserror` for ergonomic error definitions. Each concern gets its own
//! enum and a `Result` alias; `CliError` collects them at the command layer.

use std::path::PathBuf;
use thiserror::Error;

/// Validation errors for hexadecimal identifier text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("identifier is empty")]
    Empty,

    #[error("invalid character {ch:?} at position {position}, use 0-9 and A-F only")]
    InvalidCharacter { ch: char, position: usize },

    #[error("identifier has {len} hex characters, which is not a whole number of bytes")]
    IncompleteByte { len: usize },
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Classified outcome of a failed acquisition request.
///
/// None of these abort the process; the controller hands them back to the
/// presentation layer as `Outcome::Rejected`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("invalid hex code: {0}")]
    InvalidHexInput(#[from] CodecError),

    #[error("NFC is not supported on this device")]
    HardwareUnsupported,

    #[error("NFC is disabled, enable it in the system settings and scan again")]
    HardwareDisabled,

    #[error("tag detected but it carried no identifier, tap the card again")]
    NoTagData,

    #[error("NFC permission is required to scan tags")]
    PermissionDenied,

    #[error("cannot {input} while {state}")]
    InvalidState { state: String, input: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AcquisitionError {
    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidHexInput(_) => "invalid-hex",
            Self::HardwareUnsupported => "unsupported",
            Self::HardwareDisabled => "disabled",
            Self::NoTagData => "no-tag-data",
            Self::PermissionDenied => "permission-denied",
            Self::InvalidState { .. } => "invalid-state",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the user can fix the problem and simply try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidHexInput(_) | Self::HardwareDisabled | Self::NoTagData
        )
    }
}

impl From<StorageError> for AcquisitionError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Errors from the identifier store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read identifier record {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    #[error("failed to write identifier record {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },

    #[error("storage directory error: {0}")]
    DirectoryError(String),

    #[error("corrupt identifier record: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from configuration handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for configuration")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("invalid setting {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from door credential handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("PIN must be 1 to 8 decimal digits")]
    InvalidPin,

    #[error("identifier has no bytes")]
    EmptyIdentifier,

    #[error("failed to read hash list {path}: {reason}")]
    HashListUnreadable { path: PathBuf, reason: String },
}

/// Result type alias for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors from reader-side helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("invalid AID: {0}")]
    InvalidAid(String),

    #[error("AID must be 1 to 16 bytes, got {0}")]
    AidLength(usize),
}

/// Result type alias for reader helper operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Errors surfaced by command-line handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for command handlers.
pub type CliResult<T> = Result<T, CliError>;
