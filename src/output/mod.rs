//! Output formatting module.
//!
//! Renders identifiers, controller outcomes and credential checks as plain
//! text or JSON.

mod json_format;
mod plain;

pub use plain::{print_error, print_info, print_success, print_warning};

use crate::cli::OutputFormat;
use crate::controller::Outcome;
use crate::storage::{IdentifierRecord, IdentifierSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;

/// Everything shown about the current identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierView {
    /// Canonical text, as served by the emulator.
    pub identifier: String,
    /// Display form, as printed by a reader.
    pub display: String,
    /// Where it came from.
    pub source: IdentifierSource,
    /// When it was stored; absent for the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&IdentifierRecord> for IdentifierView {
    fn from(record: &IdentifierRecord) -> Self {
        Self {
            identifier: record.identifier.clone(),
            display: crate::codec::to_display(&record.identifier),
            source: record.source,
            updated_at: (record.source != IdentifierSource::Default).then_some(record.updated_at),
        }
    }
}

/// Result of computing a door credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialView {
    /// Canonical identifier the hash was computed for.
    pub identifier: String,
    /// Lowercase hex SHA-256.
    pub hash: String,
    /// Whether the hash is on the allow-list, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known: Option<bool>,
}

/// Print the current identifier.
pub fn print_identifier(view: &IdentifierView, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_identifier(view),
        OutputFormat::Json => json_format::print_json(view),
    }
}

/// Print a controller outcome.
pub fn print_outcome(outcome: &Outcome, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_outcome(outcome),
        OutputFormat::Json => json_format::print_json(outcome),
    }
}

/// Print a credential hash.
pub fn print_credential(view: &CredentialView, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_credential(view),
        OutputFormat::Json => json_format::print_json(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_record() {
        let record = IdentifierRecord::new("04A1B2C3D4E5", IdentifierSource::Manual);
        let view = IdentifierView::from(&record);
        assert_eq!(view.display, "C3B2A104D4E5");
        assert!(view.updated_at.is_some());
    }

    #[test]
    fn test_default_view_has_no_timestamp() {
        let record = IdentifierRecord {
            identifier: "00000000".to_string(),
            source: IdentifierSource::Default,
            updated_at: DateTime::<Utc>::default(),
        };
        let json = serde_json::to_value(IdentifierView::from(&record)).unwrap();
        assert_eq!(json["source"], "default");
        assert!(json.get("updated_at").is_none());
    }
}
