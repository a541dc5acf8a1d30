//! Identifier codec.
//!
//! Pure conversions between raw bytes, canonical hex text and the display
//! form. Nothing here performs I/O or holds state.
//!
//! The display form shows the first four bytes reversed and everything after
//! them as stored. A reader that prints the UID least-significant byte first
//! shows exactly this form, so it is what users compare against.

use crate::error::{CodecError, CodecResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Symbols a canonical identifier may contain.
pub const HEX_ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

/// Number of leading bytes that are reversed for display.
pub const DISPLAY_HEAD_BYTES: usize = 4;

/// Number of leading hex characters that are reversed for display.
pub const DISPLAY_HEAD_CHARS: usize = DISPLAY_HEAD_BYTES * 2;

/// Byte count of a freshly generated identifier.
pub const GENERATED_BYTES: usize = 6;

/// How strictly identifier text is checked before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Any non-empty run of `0-9A-F`, odd lengths included.
    #[default]
    Lenient,
    /// Like `Lenient`, but the text must also encode whole bytes.
    Strict,
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("unknown validation mode: {}", s)),
        }
    }
}

#[inline]
fn is_upper_hex(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='F')
}

/// Returns true iff `text` is non-empty and consists only of `0-9A-F`.
///
/// Lowercase digits are rejected; callers normalize user input first.
pub fn validate(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_upper_hex)
}

/// Validates `text`, reporting why it was rejected.
pub fn validate_with(text: &str, mode: ValidationMode) -> CodecResult<()> {
    if text.is_empty() {
        return Err(CodecError::Empty);
    }

    if let Some((position, ch)) = text.chars().enumerate().find(|&(_, c)| !is_upper_hex(c)) {
        return Err(CodecError::InvalidCharacter { ch, position });
    }

    if mode == ValidationMode::Strict && text.len() % 2 != 0 {
        return Err(CodecError::IncompleteByte { len: text.len() });
    }

    Ok(())
}

/// Uppercases user input. Whitespace is kept, so it still fails validation.
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
}

/// Converts canonical text to the display form.
///
/// Text shorter than eight characters is returned unchanged. Otherwise the
/// first eight characters are split into byte pairs, the pairs are reversed,
/// and the remaining tail is appended as is. Applying it twice yields the
/// input again.
pub fn to_display(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < DISPLAY_HEAD_CHARS {
        return text.to_string();
    }

    let (head, tail) = chars.split_at(DISPLAY_HEAD_CHARS);
    let mut out = String::with_capacity(text.len());
    for pair in head.chunks(2).rev() {
        out.extend(pair);
    }
    out.extend(tail);
    out
}

/// Converts display text back to canonical order.
pub fn from_display(text: &str) -> String {
    // Reversing a fixed block is its own inverse.
    to_display(text)
}

/// Generates `2 * byte_count` random uppercase hex characters.
///
/// Each character is drawn uniformly from the 16 hex symbols on its own,
/// rather than drawing whole random bytes.
pub fn random_hex(byte_count: usize) -> String {
    random_hex_with(&mut rand::thread_rng(), byte_count)
}

/// Like [`random_hex`], drawing from the given generator.
pub fn random_hex_with<R: Rng + ?Sized>(rng: &mut R, byte_count: usize) -> String {
    (0..byte_count * 2)
        .map(|_| HEX_ALPHABET[rng.gen_range(0..HEX_ALPHABET.len())] as char)
        .collect()
}

/// Renders bytes as uppercase hex, two characters per byte, no separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decodes hex text (either case) into bytes.
pub fn hex_to_bytes(text: &str) -> CodecResult<Vec<u8>> {
    validate_with(&text.to_uppercase(), ValidationMode::Strict)?;
    hex::decode(text).map_err(|_| CodecError::IncompleteByte { len: text.len() })
}
