//! Config subcommand implementation.
//!
//! Handles the `hce-uid config` command for inspecting and creating settings.

use super::{AppContext, OutputFormat};
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::reader::select_aid_command;
use clap::{Parser, Subcommand};
use console::style;
use serde::Serialize;

/// Manage settings.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print where settings and the stored UID live
    Path,

    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct SettingsView<'a> {
    settings_file: String,
    identifier_file: String,
    select_apdu: String,
    settings: &'a AppSettings,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => self.show(ctx),
            ConfigAction::Path => self.path(ctx),
            ConfigAction::Init { force } => self.init(ctx, *force),
        }
    }

    fn show(&self, ctx: &AppContext) -> CliResult<()> {
        let apdu = select_aid_command(&ctx.settings.aid)?;
        let view = SettingsView {
            settings_file: ctx.paths.settings_file().display().to_string(),
            identifier_file: ctx.paths.identifier_file().display().to_string(),
            select_apdu: hex::encode_upper(apdu),
            settings: &ctx.settings,
        };

        if ctx.format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(&view)
                .map_err(|e| CliError::Other(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        let s = view.settings;
        println!();
        println!("  {}", style("Settings").bold().underlined());
        println!("  {:<22} {}", style("Default UID:").bold(), s.default_identifier);
        println!("  {:<22} {}", style("Generated bytes:").bold(), s.generated_bytes);
        println!("  {:<22} {}", style("Validation:").bold(), s.validation);
        println!(
            "  {:<22} supported={} enabled={}",
            style("NFC:").bold(),
            s.hardware.supported,
            s.hardware.enabled
        );
        println!("  {:<22} {}", style("AID:").bold(), s.aid);
        println!("  {:<22} {}", style("SELECT APDU:").bold(), view.select_apdu);
        println!("  {:<22} {}", style("Output format:").bold(), s.default_output_format);
        println!();
        println!("  {}", style(format!("From {}", view.settings_file)).dim());
        println!();
        Ok(())
    }

    fn path(&self, ctx: &AppContext) -> CliResult<()> {
        if ctx.format == OutputFormat::Json {
            let json = serde_json::json!({
                "config_dir": ctx.paths.config_dir,
                "data_dir": ctx.paths.data_dir,
                "settings_file": ctx.paths.settings_file(),
                "identifier_file": ctx.paths.identifier_file(),
            });
            println!("{}", json);
            return Ok(());
        }

        println!("{}", ctx.paths.settings_file().display());
        println!("{}", ctx.paths.identifier_file().display());
        Ok(())
    }

    fn init(&self, ctx: &AppContext, force: bool) -> CliResult<()> {
        let file = ctx.paths.settings_file();
        if file.exists() && !force {
            return Err(CliError::Other(format!(
                "{} already exists, use --force to overwrite",
                file.display()
            )));
        }

        let written = AppSettings::default().save(&ctx.paths)?;
        if !ctx.quiet {
            output::print_success(&format!("Settings written to {}", written.display()));
        }
        Ok(())
    }
}
