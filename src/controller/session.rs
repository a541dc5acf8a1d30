//! Async scan sessions.
//!
//! A session opens a scan on the controller and then waits for whichever
//! comes first: a tag event or cancellation. Tags without data are reported
//! and the wait continues. There is no deadline; a session only ends on a
//! usable tag, a cancel, or the event source running dry.

use super::{AcquisitionState, Input, Outcome, SharedController};
use crate::error::AcquisitionError;
use crate::hardware::{NfcHardware, TagEvent};
use crate::storage::IdentifierStore;
use futures::{Stream, StreamExt};
use std::future::Future;
use tracing::{debug, info};

/// How a scan session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Final outcome: `Updated`, `Cancelled`, or the rejection that kept the
    /// scan from starting.
    pub outcome: Outcome,
    /// Transient problems seen while waiting, such as tags without data.
    pub diagnostics: Vec<AcquisitionError>,
}

/// Put the controller into `Scanning`.
///
/// Returns the outcome that prevented the scan otherwise.
pub fn begin_scan<S, H>(controller: &SharedController<S, H>) -> Result<(), Outcome>
where
    S: IdentifierStore,
    H: NfcHardware,
{
    match controller.handle(Input::Scan) {
        Some(Outcome::ScanStarted) => {
            info!("waiting for a tag");
            Ok(())
        }
        Some(outcome) => Err(outcome),
        None => Err(Outcome::rejected(AcquisitionError::Internal(
            "scan request produced no outcome".to_string(),
        ))),
    }
}

/// Wait on an already started scan until it completes or is cancelled.
///
/// `on_diagnostic` sees each transient problem as it happens.
pub async fn await_tag<S, H, E, C, F>(
    controller: &SharedController<S, H>,
    mut events: E,
    cancel: C,
    mut on_diagnostic: F,
) -> ScanReport
where
    S: IdentifierStore,
    H: NfcHardware,
    E: Stream<Item = TagEvent> + Unpin,
    C: Future<Output = ()>,
    F: FnMut(&AcquisitionError),
{
    tokio::pin!(cancel);
    let mut diagnostics = Vec::new();

    let outcome = loop {
        if controller.state() != AcquisitionState::Scanning {
            // Someone else cancelled or completed the scan.
            break Outcome::Cancelled;
        }

        tokio::select! {
            _ = &mut cancel => {
                debug!("scan cancelled");
                break controller.handle(Input::Cancel).unwrap_or(Outcome::Cancelled);
            }
            event = events.next() => {
                let Some(event) = event else {
                    debug!("tag source closed, cancelling scan");
                    break controller.handle(Input::Cancel).unwrap_or(Outcome::Cancelled);
                };

                match controller.handle(Input::TagDetected(event)) {
                    Some(Outcome::Rejected { error }) => {
                        on_diagnostic(&error);
                        diagnostics.push(error);
                    }
                    Some(outcome) => break outcome,
                    None => break Outcome::Cancelled,
                }
            }
        }
    };

    ScanReport {
        outcome,
        diagnostics,
    }
}

/// Start a scan and wait for it to finish.
pub async fn run_scan_session<S, H, E, C>(
    controller: &SharedController<S, H>,
    events: E,
    cancel: C,
) -> ScanReport
where
    S: IdentifierStore,
    H: NfcHardware,
    E: Stream<Item = TagEvent> + Unpin,
    C: Future<Output = ()>,
{
    if let Err(outcome) = begin_scan(controller) {
        return ScanReport {
            outcome,
            diagnostics: Vec::new(),
        };
    }

    await_tag(controller, events, cancel, |_| {}).await
}
