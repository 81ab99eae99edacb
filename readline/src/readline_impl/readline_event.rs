// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::PinnedInputStream;
use async_stream::stream;
use tokio::sync::mpsc::UnboundedReceiver;

/// Notifications produced by [`crate::Readline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadlineEvent {
    /// A completed line. Can be empty, when `return` is pressed on an empty line.
    Line(String),
    /// The whole history, most recent first. Sent whenever a new entry is recorded.
    History(Vec<String>),
    /// An option was picked from the menu opened by [`crate::Readline::show_options`].
    OptionSelected(String),
}

/// The consuming end of the [`ReadlineEvent`] channel. Once [`crate::Readline::close`]
/// has been called (or the editor is dropped) and every pending event has been
/// received, the receive methods report the end of output.
#[derive(Debug)]
pub struct ReadlineReceiver {
    pub receiver: UnboundedReceiver<ReadlineEvent>,
}

impl ReadlineReceiver {
    #[must_use]
    pub fn new(receiver: UnboundedReceiver<ReadlineEvent>) -> Self { Self { receiver } }

    /// Wait for the next event. Returns [`None`] at the end of output.
    pub async fn recv(&mut self) -> Option<ReadlineEvent> { self.receiver.recv().await }

    /// Returns [`None`] when nothing is pending right now, or at the end of output.
    pub fn try_recv(&mut self) -> Option<ReadlineEvent> { self.receiver.try_recv().ok() }

    /// Drain every event that is pending right now.
    pub fn drain(&mut self) -> Vec<ReadlineEvent> {
        let mut acc = vec![];
        while let Some(event) = self.try_recv() {
            acc.push(event);
        }
        acc
    }

    /// Has the editor closed? There may still be pending events to receive.
    #[must_use]
    pub fn is_closed(&self) -> bool { self.receiver.is_closed() }

    /// Only the completed lines, as an async stream that ends at the end of output.
    #[must_use]
    pub fn into_line_stream(mut self) -> PinnedInputStream<String> {
        let it = stream! {
            while let Some(event) = self.recv().await {
                if let ReadlineEvent::Line(line) = event {
                    yield line;
                }
            }
        };
        Box::pin(it)
    }
}
