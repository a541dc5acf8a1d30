//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use super::{CredentialView, IdentifierView};
use crate::controller::Outcome;
use console::style;
use std::io::{self, Write};

/// Print the current identifier.
pub fn print_identifier(view: &IdentifierView) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out)?;
    writeln!(
        out,
        "  {} {}",
        style("Display UID:").bold(),
        style(&view.display).cyan().bold()
    )?;
    writeln!(out, "  {} {}", style("Stored UID: ").bold(), view.identifier)?;

    let source = match view.updated_at {
        Some(at) => format!("{} ({})", view.source, at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => view.source.to_string(),
    };
    writeln!(out, "  {} {}", style("Source:     ").bold(), style(source).dim())?;
    writeln!(out)?;
    Ok(())
}

/// Print a controller outcome.
pub fn print_outcome(outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::EditStarted { current } => {
            print_info(&format!("Editing UID {}", current));
        }
        Outcome::Updated {
            identifier,
            display,
            source,
        } => {
            let verb = match source {
                crate::storage::IdentifierSource::Generated => "Random UID generated!",
                crate::storage::IdentifierSource::Scanned => "Card captured!",
                _ => "UID updated!",
            };
            print_success(verb);

            let mut out = io::stdout().lock();
            writeln!(
                out,
                "  {} {}",
                style("Display UID:").bold(),
                style(display).cyan().bold()
            )?;
            writeln!(out, "  {} {}", style("Stored UID: ").bold(), identifier)?;
        }
        Outcome::ScanStarted => print_info("Please tap a card to the device..."),
        Outcome::Cancelled => print_warning("Cancelled, UID unchanged."),
        Outcome::Rejected { error } => print_error(&error.to_string()),
    }
    Ok(())
}

/// Print a credential hash.
pub fn print_credential(view: &CredentialView) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "  {} {}", style("UID: ").bold(), view.identifier)?;
    writeln!(out, "  {} {}", style("Hash:").bold(), view.hash)?;
    match view.known {
        Some(true) => writeln!(out, "  {}", style("Known hash, the door will open").green())?,
        Some(false) => writeln!(out, "  {}", style("Unknown hash, the door stays shut").red())?,
        None => {}
    }
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
