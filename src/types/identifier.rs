//! The validated identifier newtype.
//!
//! `Identifier` holds the canonical textual form. It can only be built from
//! text that passed validation, from raw bytes, or by random generation, so a
//! value of this type never contains anything but `0-9A-F`.

use crate::codec::{self, ValidationMode};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical hexadecimal card identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Parse canonical text, rejecting anything outside `0-9A-F`.
    pub fn parse(text: &str, mode: ValidationMode) -> Result<Self, CodecError> {
        codec::validate_with(text, mode)?;
        Ok(Self(text.to_string()))
    }

    /// Uppercase user input and then parse it.
    pub fn parse_input(input: &str, mode: ValidationMode) -> Result<Self, CodecError> {
        Self::parse(&codec::normalize(input), mode)
    }

    /// Build an identifier from raw tag bytes. Returns `None` for no bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(Self(codec::bytes_to_hex(bytes)))
        }
    }

    /// Generate a random identifier of `byte_count` bytes.
    ///
    /// Returns `None` when `byte_count` is zero.
    pub fn random(byte_count: usize) -> Option<Self> {
        (byte_count > 0).then(|| Self(codec::random_hex(byte_count)))
    }

    /// The canonical text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The display form (first four bytes reversed).
    pub fn display_form(&self) -> String {
        codec::to_display(&self.0)
    }

    /// Decode into bytes. `None` if the text has an odd length.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        hex::decode(&self.0).ok()
    }

    /// Number of whole bytes encoded.
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }

    /// Whether the text encodes a whole number of bytes.
    pub fn is_whole_bytes(&self) -> bool {
        self.0.len() % 2 == 0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ValidationMode::Lenient)
    }
}

impl TryFrom<String> for Identifier {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        codec::validate_with(&value, ValidationMode::Lenient)?;
        Ok(Self(value))
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id: Identifier = "04A1B2C3".parse().unwrap();
        assert_eq!(id.as_str(), "04A1B2C3");
        assert_eq!(id.byte_len(), 4);
    }

    #[test]
    fn test_parse_rejects_lowercase() {
        assert!("04a1b2c3".parse::<Identifier>().is_err());
    }

    #[test]
    fn test_parse_input_normalizes() {
        let id = Identifier::parse_input("04a1b2c3d4e5", ValidationMode::Lenient).unwrap();
        assert_eq!(id.as_str(), "04A1B2C3D4E5");
        assert_eq!(id.display_form(), "C3B2A104D4E5");
    }

    #[test]
    fn test_parse_input_rejects_surrounding_whitespace() {
        assert_eq!(
            Identifier::parse_input(" 04a1b2c3", ValidationMode::Lenient),
            Err(CodecError::InvalidCharacter { ch: ' ', position: 0 })
        );
    }

    #[test]
    fn test_strict_rejects_odd() {
        assert!(Identifier::parse("ABC", ValidationMode::Lenient).is_ok());
        assert!(Identifier::parse("ABC", ValidationMode::Strict).is_err());
    }

    #[test]
    fn test_from_bytes() {
        let id = Identifier::from_bytes(&[0x04, 0xA1, 0xB2, 0xC3]).unwrap();
        assert_eq!(id.to_string(), "04A1B2C3");
        assert_eq!(id.to_bytes().unwrap(), vec![0x04, 0xA1, 0xB2, 0xC3]);
        assert!(Identifier::from_bytes(&[]).is_none());
    }

    #[test]
    fn test_odd_length_has_no_bytes() {
        let id: Identifier = "ABC".parse().unwrap();
        assert!(!id.is_whole_bytes());
        assert!(id.to_bytes().is_none());
    }

    #[test]
    fn test_random() {
        let id = Identifier::random(6).unwrap();
        assert_eq!(id.as_str().len(), 12);
        assert!(Identifier::random(0).is_none());
    }

    #[test]
    fn test_serde_transparent() {
        let id: Identifier = "04A1B2C3".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"04A1B2C3\"");
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<Identifier>("\"zz\"").is_err());
    }
}
