//! hce-uid - Manage the UID served by an HCE card emulator.

use anyhow::{Context, Result};
use clap::Parser;
use hce_uid::cli::{self, AppContext, Cli, Commands};
use hce_uid::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = match (verbose, quiet) {
        (true, _) => "hce_uid=debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::from_cli(&cli).context("failed to load settings")?;
    tracing::debug!(
        config_dir = %ctx.paths.config_dir.display(),
        data_dir = %ctx.paths.data_dir.display(),
        format = %ctx.format,
        "resolved context"
    );

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => cli::show(&ctx)?,
        Commands::Edit(cmd) => cmd.execute(&ctx)?,
        Commands::Generate(cmd) => cmd.execute(&ctx)?,
        Commands::Scan(cmd) => cmd.execute(&ctx).await?,
        Commands::Hash(cmd) => cmd.execute(&ctx)?,
        Commands::Config(cmd) => cmd.execute(&ctx)?,
    }

    Ok(())
}
