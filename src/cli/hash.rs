//! Hash subcommand implementation.
//!
//! Computes the credential a door reader derives when this device is
//! presented and the given PIN is typed, and optionally checks it against
//! the door's allow-list. The reader side is simulated: it selects the
//! emulator and hashes whatever text comes back, or reads a physical card's
//! UID directly when `--card` is given.

use super::{AppContext, OutputFormat};
use crate::credential::{credential_hash, HashList};
use crate::error::{AcquisitionError, CliResult};
use crate::hardware::parse_tag_line;
use crate::output::{self, CredentialView};
use crate::reader::{emulator_response, TagReading};
use crate::storage::IdentifierStore;
use crate::types::Identifier;
use clap::Parser;
use std::path::PathBuf;

/// Compute the door credential hash for the UID.
#[derive(Parser, Debug)]
pub struct HashCommand {
    /// Keypad PIN (up to 8 decimal digits)
    #[arg(short, long, env = "HCE_UID_PIN", hide_env_values = true)]
    pub pin: String,

    /// UID the emulator should answer with instead of the stored one
    #[arg(short, long, value_name = "UID", conflicts_with = "card")]
    pub uid: Option<String>,

    /// Hash a physical card with this UID instead of the emulator
    #[arg(long, value_name = "HEX")]
    pub card: Option<String>,

    /// Allow-list file with one hash per line
    #[arg(long, value_name = "FILE")]
    pub hashes: Option<PathBuf>,
}

impl HashCommand {
    /// Execute the hash command.
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let view = self.credential(ctx)?;

        if ctx.quiet && ctx.format == OutputFormat::Plain {
            println!("{}", view.hash);
            return Ok(());
        }
        output::print_credential(&view, ctx.format)?;
        Ok(())
    }

    /// Work out what the reader sees and hash it.
    pub fn credential(&self, ctx: &AppContext) -> CliResult<CredentialView> {
        let reading = self.reading(ctx)?;
        let identifier = match &reading {
            TagReading::Card(uid) => hex::encode_upper(uid),
            TagReading::Emulated(text) => text.clone(),
        };
        tracing::debug!(?reading, "reader input");

        let hash = credential_hash(&reading.identifier_bytes(), &self.pin)?;

        let known = match &self.hashes {
            Some(path) => Some(HashList::load(path)?.contains(&hash)),
            None => None,
        };

        Ok(CredentialView {
            identifier,
            hash,
            known,
        })
    }

    fn reading(&self, ctx: &AppContext) -> CliResult<TagReading> {
        if let Some(card) = &self.card {
            let uid = parse_tag_line(card)
                .payload()
                .map(<[u8]>::to_vec)
                .ok_or(AcquisitionError::NoTagData)?;
            return Ok(TagReading::resolve(uid, None));
        }

        let identifier = match &self.uid {
            Some(uid) => String::from(
                Identifier::parse_input(uid.trim(), ctx.settings.validation)
                    .map_err(AcquisitionError::from)?,
            ),
            None => ctx.store()?.get_current()?,
        };

        // A phone's own UID is random per tap, so the reader goes by the SELECT answer.
        let response = emulator_response(&identifier);
        Ok(TagReading::resolve(Vec::new(), Some(response.as_slice())))
    }
}
