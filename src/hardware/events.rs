//! Tag event sources.
//!
//! Discovery delivers events one at a time, so every source here is a
//! `Stream<Item = TagEvent>` consumed by the scan session.

use super::TagEvent;
use futures::stream::{self, Stream};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Sending half of a tag event channel, held by whatever plays the adapter.
#[derive(Debug, Clone)]
pub struct TagSender {
    tx: mpsc::Sender<TagEvent>,
}

impl TagSender {
    /// Deliver an event, waiting for room in the channel.
    ///
    /// Returns `false` once the receiving side has gone away.
    pub async fn deliver(&self, event: TagEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// Deliver an event without waiting.
    pub fn try_deliver(&self, event: TagEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }
}

/// Receiving half of a tag event channel.
#[derive(Debug)]
pub struct TagEvents {
    rx: mpsc::Receiver<TagEvent>,
}

impl Stream for TagEvents {
    type Item = TagEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<TagEvent>> {
        self.rx.poll_recv(cx)
    }
}

/// Create a bounded tag event channel.
pub fn channel(capacity: usize) -> (TagSender, TagEvents) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (TagSender { tx }, TagEvents { rx })
}

/// A fixed sequence of tags, presented in order.
pub fn tag_list(tags: Vec<Vec<u8>>) -> impl Stream<Item = TagEvent> + Unpin {
    stream::iter(tags.into_iter().map(TagEvent::new))
}

/// Parse one line of tag input.
///
/// Hex digits in either case, optionally separated by spaces, colons or
/// dashes. A blank line stands for a tag that reported no identifier, and so
/// does a line that is not valid hex.
pub fn parse_tag_line(line: &str) -> TagEvent {
    let digits: String = line
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if digits.is_empty() {
        return TagEvent::empty();
    }

    match hex::decode(&digits) {
        Ok(bytes) => TagEvent::new(bytes),
        Err(e) => {
            tracing::warn!(line, error = %e, "unreadable tag line");
            TagEvent::empty()
        }
    }
}

/// Read tags from text input, one per line.
pub fn text_events<R>(reader: R) -> impl Stream<Item = TagEvent>
where
    R: AsyncBufRead + Unpin,
{
    stream::unfold(reader.lines(), |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((parse_tag_line(&line), lines)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "tag input failed");
                None
            }
        }
    })
}
