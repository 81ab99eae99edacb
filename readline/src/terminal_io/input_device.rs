// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyEvent, PinnedInputStream};
use async_stream::stream;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use std::fmt::{Debug, Formatter};

/// One item delivered by the input collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadlineInput {
    /// Raw bytes, which are fed to the editor's [`crate::KeyDecoder`].
    Data(Vec<u8>),
    /// A key that was already decoded upstream (eg: by crossterm).
    Key(KeyEvent),
    /// The terminal was resized. The editor re-reads the size from its output device.
    Resize,
}

/// Source of [`ReadlineInput`]s for [`crate::Readline::run`].
///
/// The main constructors are:
/// - [`InputDevice::new_event_stream`]
/// - [`InputDevice::new`]
/// - [`crate::InputDeviceExt::new_mock`]
pub struct InputDevice {
    pub resource: PinnedInputStream<ReadlineInput>,
}

impl Debug for InputDevice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDevice").finish_non_exhaustive()
    }
}

impl InputDevice {
    #[must_use]
    pub fn new(resource: PinnedInputStream<ReadlineInput>) -> Self { Self { resource } }

    /// Reads from the real terminal using [`crossterm::event::EventStream`]. The
    /// terminal must be in raw mode for keys to arrive one at a time.
    ///
    /// Only key presses (and repeats) and resize events are forwarded. The stream ends
    /// when crossterm reports an I/O error.
    #[must_use]
    pub fn new_event_stream() -> Self {
        let it = stream! {
            let mut event_stream = EventStream::new();
            while let Some(result) = event_stream.next().await {
                match result {
                    Ok(Event::Key(key_event)) => {
                        if key_event.kind != KeyEventKind::Release {
                            yield ReadlineInput::Key(KeyEvent::from(key_event));
                        }
                    }
                    Ok(Event::Resize(..)) => yield ReadlineInput::Resize,
                    Ok(_) => {}
                    Err(err) => {
                        // % is Display, ? is Debug.
                        tracing::error!(message = "Input event stream failed", error = %err);
                        break;
                    }
                }
            }
        };
        Self::new(Box::pin(it))
    }

    pub async fn next_input(&mut self) -> Option<ReadlineInput> { self.resource.next().await }
}
