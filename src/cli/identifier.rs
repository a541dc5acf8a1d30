//! Edit and generate subcommands.

use super::AppContext;
use crate::codec::ValidationMode;
use crate::controller::Outcome;
use crate::error::{AcquisitionError, CliResult};
use clap::Parser;

/// Replace the UID with typed hex text.
#[derive(Parser, Debug)]
pub struct EditCommand {
    /// New UID in hex, as stored (e.g. "04A1B2C3D4E5")
    ///
    /// Surrounding whitespace, as left by shell quoting or pasting, is dropped.
    #[arg(value_name = "UID")]
    pub uid: String,

    /// Treat the argument as display form (first four bytes reversed)
    #[arg(long)]
    pub display: bool,

    /// Reject input that is not a whole number of bytes
    #[arg(long)]
    pub strict: bool,
}

impl EditCommand {
    /// Execute the edit command.
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let mut settings = ctx.settings.clone();
        if self.strict {
            settings.validation = ValidationMode::Strict;
        }
        let ctx = AppContext {
            settings,
            ..ctx.clone()
        };

        let mut controller = ctx.controller()?;
        match controller.modify() {
            Some(Outcome::EditStarted { current }) => {
                tracing::debug!(%current, "editing identifier");
            }
            Some(outcome) => return ctx.report(&outcome),
            None => {}
        }

        let uid = self.uid.trim();
        let text = if self.display {
            crate::codec::from_display(&crate::codec::normalize(uid))
        } else {
            uid.to_string()
        };

        let outcome = controller
            .save(text)
            .unwrap_or_else(|| Outcome::rejected(internal("edit produced no outcome")));
        ctx.report(&outcome)
    }
}

/// Replace the UID with a random one.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Length of the new UID in bytes (defaults to the configured length)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..))]
    pub bytes: Option<u8>,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let mut settings = ctx.settings.clone();
        if let Some(bytes) = self.bytes {
            settings.generated_bytes = usize::from(bytes);
        }
        let ctx = AppContext {
            settings,
            ..ctx.clone()
        };

        let outcome = ctx
            .controller()?
            .generate()
            .unwrap_or_else(|| Outcome::rejected(internal("generate produced no outcome")));
        ctx.report(&outcome)
    }
}

fn internal(msg: &str) -> AcquisitionError {
    AcquisitionError::Internal(msg.to_string())
}
