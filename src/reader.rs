//! Reader-side helpers.
//!
//! A door reader sees either a physical card, whose UID it reads directly,
//! or a phone emulating a card. For the phone it sends a SELECT by AID and
//! the emulator answers with the identifier text followed by `90 00`.

use crate::error::{ReaderError, ReaderResult};

/// AID the emulator registers for.
pub const DEFAULT_AID: &str = "A0000001020304";

/// ISO 7816 status word for success.
pub const STATUS_OK: [u8; 2] = [0x90, 0x00];

const SELECT_BY_NAME: [u8; 4] = [0x00, 0xA4, 0x04, 0x00];
const MAX_AID_BYTES: usize = 16;

/// Build the SELECT command for `aid_hex`.
pub fn select_aid_command(aid_hex: &str) -> ReaderResult<Vec<u8>> {
    let aid = hex::decode(aid_hex).map_err(|e| ReaderError::InvalidAid(e.to_string()))?;
    if aid.is_empty() || aid.len() > MAX_AID_BYTES {
        return Err(ReaderError::AidLength(aid.len()));
    }

    let mut apdu = Vec::with_capacity(SELECT_BY_NAME.len() + 1 + aid.len());
    apdu.extend_from_slice(&SELECT_BY_NAME);
    apdu.push(aid.len() as u8);
    apdu.extend_from_slice(&aid);
    Ok(apdu)
}

/// What the emulator answers a SELECT with: the identifier text and `90 00`.
pub fn emulator_response(identifier: &str) -> Vec<u8> {
    let mut response = Vec::with_capacity(identifier.len() + STATUS_OK.len());
    response.extend_from_slice(identifier.as_bytes());
    response.extend_from_slice(&STATUS_OK);
    response
}

/// Extract the identifier text from the emulator's SELECT response.
///
/// Strips a trailing `90 00`. ASCII payloads come back as text, anything else
/// as lowercase hex. An empty response means nothing answered.
pub fn parse_select_response(response: &[u8]) -> Option<String> {
    if response.is_empty() {
        return None;
    }

    let payload = response.strip_suffix(&STATUS_OK).unwrap_or(response);
    if payload.is_ascii() {
        Some(String::from_utf8_lossy(payload).into_owned())
    } else {
        Some(hex::encode(payload))
    }
}

/// What the reader got from the presented tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagReading {
    /// UID read from a physical card.
    Card(Vec<u8>),
    /// Identifier text returned by an emulating phone.
    Emulated(String),
}

impl TagReading {
    /// Bytes the door hashes for this reading.
    ///
    /// Emulated text is decoded as hex; text that is not hex is used as is.
    pub fn identifier_bytes(&self) -> Vec<u8> {
        match self {
            Self::Card(uid) => uid.clone(),
            Self::Emulated(text) => {
                hex::decode(text.trim()).unwrap_or_else(|_| text.as_bytes().to_vec())
            }
        }
    }

    /// Prefer the emulator's answer, falling back to the card UID.
    pub fn resolve(card_uid: Vec<u8>, select_response: Option<&[u8]>) -> Self {
        match select_response.and_then(parse_select_response) {
            Some(text) if !text.is_empty() => Self::Emulated(text),
            _ => Self::Card(card_uid),
        }
    }
}
