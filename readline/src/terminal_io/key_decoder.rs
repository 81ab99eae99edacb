// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InlineVec, KeyEvent};

/// Turns raw terminal bytes into [`KeyEvent`]s.
///
/// Implementations are stateful across calls: an escape sequence split over two chunks
/// (eg: `\x1b[` followed by `A`) must still come out as a single `up` key. A chunk that
/// doesn't complete any key yields an empty vec, which the editor accepts without
/// changing its state.
///
/// This crate does not ship a byte decoder. When reading from a real terminal, use
/// [`crate::InputDevice::new_event_stream`], which lets crossterm do the decoding and
/// feeds already decoded keys to the editor.
pub trait KeyDecoder: Send {
    fn decode(&mut self, bytes: &[u8]) -> InlineVec<KeyEvent>;
}

pub type BoxedKeyDecoder = Box<dyn KeyDecoder>;
