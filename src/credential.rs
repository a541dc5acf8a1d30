//! Door lock credentials.
//!
//! The door reader does not compare identifiers directly. It hashes the PIN
//! typed on the keypad together with the first four identifier bytes in
//! reversed order and looks the hash up in an allow-list:
//!
//! ```text
//! sha256("{pin as 8 lowercase hex digits}:{reversed head as lowercase hex}")
//! ```

use crate::codec::DISPLAY_HEAD_BYTES;
use crate::error::{CredentialError, CredentialResult};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Longest PIN the keypad protocol can carry.
pub const MAX_PIN_DIGITS: usize = 8;

fn parse_pin(pin: &str) -> CredentialResult<u32> {
    if pin.is_empty() || pin.len() > MAX_PIN_DIGITS || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CredentialError::InvalidPin);
    }
    // Eight decimal digits always fit in a u32.
    pin.parse().map_err(|_| CredentialError::InvalidPin)
}

/// Compute the credential hash for an identifier and PIN.
pub fn credential_hash(identifier: &[u8], pin: &str) -> CredentialResult<String> {
    if identifier.is_empty() {
        return Err(CredentialError::EmptyIdentifier);
    }
    let pin = parse_pin(pin)?;

    let head: Vec<u8> = identifier
        .iter()
        .take(DISPLAY_HEAD_BYTES)
        .rev()
        .copied()
        .collect();
    let material = format!("{:08x}:{}", pin, hex::encode(head));

    Ok(hex::encode(Sha256::digest(material.as_bytes())))
}

/// The set of hashes the door accepts.
#[derive(Debug, Clone, Default)]
pub struct HashList {
    hashes: HashSet<String>,
}

impl HashList {
    /// Parse one hash per line, ignoring blank lines and surrounding space.
    pub fn parse(text: &str) -> Self {
        let hashes = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { hashes }
    }

    /// Load an allow-list file.
    pub fn load(path: &Path) -> CredentialResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| CredentialError::HashListUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let list = Self::parse(&text);
        tracing::debug!(path = %path.display(), entries = list.len(), "loaded hash list");
        Ok(list)
    }

    /// Whether `hash` is on the list.
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
