//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `hce-uid show` - Show the current UID
//! - `hce-uid edit <UID>` - Replace the UID with typed text
//! - `hce-uid generate` - Replace the UID with a random one
//! - `hce-uid scan` - Capture the UID of a presented card
//! - `hce-uid hash --pin <PIN>` - Compute the door credential for the UID
//! - `hce-uid config show|path|init` - Manage settings

mod config;
mod hash;
mod identifier;
mod scan;

pub use config::ConfigCommand;
pub use hash::HashCommand;
pub use identifier::{EditCommand, GenerateCommand};
pub use scan::ScanCommand;

use crate::config::{AppSettings, Paths};
use crate::controller::{AcquisitionPolicy, Controller, Outcome};
use crate::error::{CliError, CliResult};
use crate::hardware::SimulatedHardware;
use crate::output;
use crate::storage::JsonStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hce-uid - Manage the UID served by an HCE card emulator.
///
/// The stored UID is what the emulator answers a reader with. It can be typed
/// in, randomized, or copied from a physical card.
#[derive(Parser, Debug)]
#[command(name = "hce-uid")]
#[command(author = "Lexycon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "View, edit, randomize and scan the emulated card UID", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH", env = "HCE_UID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding settings and the stored UID
    #[arg(long, global = true, value_name = "DIR", env = "HCE_UID_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current UID
    #[command(alias = "s")]
    Show,

    /// Replace the UID with the given hex code
    #[command(alias = "e")]
    Edit(EditCommand),

    /// Replace the UID with a random one
    #[command(alias = "g")]
    Generate(GenerateCommand),

    /// Capture the UID of a presented card
    Scan(ScanCommand),

    /// Compute the door credential hash for the UID
    #[command(alias = "h")]
    Hash(HashCommand),

    /// Manage settings
    #[command(alias = "c")]
    Config(ConfigCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Resolved paths, settings and output options shared by all commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub paths: Paths,
    pub settings: AppSettings,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl AppContext {
    /// Resolve the context from global flags.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let paths = match &cli.data_dir {
            Some(dir) => Paths::with_root(dir),
            None => Paths::resolve()?,
        };

        let settings = match &cli.config {
            Some(file) => AppSettings::load_from(file)?,
            None => AppSettings::load(&paths)?,
        };

        let format = match cli.output {
            Some(format) => format,
            None => settings
                .default_output_format
                .parse()
                .map_err(CliError::Other)?,
        };

        Ok(Self {
            paths,
            settings,
            format,
            quiet: cli.quiet,
        })
    }

    /// The file-backed store configured for this run.
    pub fn store(&self) -> CliResult<JsonStore> {
        Ok(JsonStore::open(
            &self.paths,
            self.settings.default_identifier.clone(),
        )?)
    }

    /// A controller over the file-backed store and the simulated adapter.
    pub fn controller(&self) -> CliResult<Controller<JsonStore, SimulatedHardware>> {
        let hardware = SimulatedHardware::from(self.settings.hardware);
        Ok(Controller::new(self.store()?, hardware)
            .with_policy(AcquisitionPolicy::from(&self.settings)))
    }

    /// Whether plain-text chatter should be printed.
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Plain
    }

    /// Present an outcome; rejections become errors.
    pub fn report(&self, outcome: &Outcome) -> CliResult<()> {
        if let Outcome::Rejected { error } = outcome {
            if self.format == OutputFormat::Json {
                output::print_outcome(outcome, self.format)?;
            }
            return Err(error.clone().into());
        }

        match (outcome, self.quiet, self.format) {
            (Outcome::Updated { display, .. }, true, OutputFormat::Plain) => {
                println!("{}", display);
            }
            (_, true, OutputFormat::Plain) => {}
            _ => output::print_outcome(outcome, self.format)?,
        }
        Ok(())
    }
}

/// Show the current identifier.
pub fn show(ctx: &AppContext) -> CliResult<()> {
    let record = ctx.store()?.record()?;
    let view = output::IdentifierView::from(&record);

    if ctx.quiet && ctx.format == OutputFormat::Plain {
        println!("{}", view.display);
        return Ok(());
    }
    output::print_identifier(&view, ctx.format)?;
    Ok(())
}
