//! Scan subcommand implementation.
//!
//! Handles `hce-uid scan`: opens a scan, waits for a tag, and stores its UID.
//! Tags come from `--tag` arguments when given, otherwise one per line on
//! stdin. Ctrl-C cancels the scan and leaves the stored UID alone.

use super::AppContext;
use crate::controller::{await_tag, begin_scan, Outcome, SharedController};
use crate::error::CliResult;
use crate::hardware::{parse_tag_line, tag_list, text_events, TagEvent};
use crate::output;
use clap::Parser;
use futures::stream::Stream;
use indicatif::{ProgressBar, ProgressStyle};
use std::pin::Pin;
use std::time::Duration;
use tokio::io::BufReader;

const TAP_PROMPT: &str = "Please tap a card to the device...";

/// Capture the UID of a presented card.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Tag UID to present, in hex (repeatable; tried in order)
    ///
    /// Without this flag tags are read from stdin, one per line.
    /// Separators such as ':' and '-' are ignored.
    #[arg(short, long = "tag", value_name = "HEX")]
    pub tags: Vec<String>,
}

type EventStream = Pin<Box<dyn Stream<Item = TagEvent>>>;

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let controller = SharedController::new(ctx.controller()?);

        if let Err(outcome) = begin_scan(&controller) {
            return ctx.report(&outcome);
        }

        let spinner = ctx.chatty().then(tap_spinner);

        let events = self.events();
        let report = await_tag(&controller, events, cancel_signal(), |error| {
            let message = error.to_string();
            match &spinner {
                Some(pb) => pb.println(format!(
                    "{} {}",
                    console::style("Warning:").yellow().bold(),
                    message
                )),
                None => output::print_warning(&message),
            }
        })
        .await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        if matches!(report.outcome, Outcome::Cancelled) && !report.diagnostics.is_empty() {
            tracing::debug!(count = report.diagnostics.len(), "scan ended after unusable tags");
        }

        ctx.report(&report.outcome)
    }

    fn events(&self) -> EventStream {
        if self.tags.is_empty() {
            let stdin = BufReader::new(tokio::io::stdin());
            return Box::pin(text_events(stdin));
        }

        let tags = self
            .tags
            .iter()
            .map(|line| parse_tag_line(line).raw_id.unwrap_or_default())
            .collect();
        Box::pin(tag_list(tags))
    }
}

fn tap_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(TAP_PROMPT);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn cancel_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
