// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # r3bl_readline
//!
//! A line editing engine for text terminals. It consumes key input from a duplex
//! stream, renders an editable prompt line with cursor accurate positioning (even when
//! the rendered line wraps across the terminal width), recalls previously submitted
//! lines, and hands completed lines to downstream consumers.
//!
//! # Mental model
//!
//! ```text
//! raw bytes ──▶ KeyDecoder ──▶ KeyEvent ──▶ key_interpreter ──▶ EditCommand
//!                                                                   │
//!               ┌───────────────────────────────────────────────────┤
//!               ▼                         ▼                         ▼
//!        LineState (buffer,        History (recall)         ReadlineEvent channel
//!        cursor) ──▶ render ──▶ OutputDevice               (Line, History, ...)
//! ```
//!
//! - [`Readline`] is the controller. It exclusively owns the [`LineState`], the
//!   [`History`] and the [`ChoiceState`].
//! - Input arrives either as raw bytes ([`ReadlineInput::Data`]), which go through the
//!   injected [`KeyDecoder`], or as already decoded keys ([`ReadlineInput::Key`]), which
//!   is what the crossterm backed [`InputDevice::new_event_stream`] produces.
//! - Completed lines, history updates and selected options are sent over a channel and
//!   received with [`ReadlineReceiver`]. Calling [`Readline::close`] closes the channel,
//!   which is the end-of-output signal.
//!
//! # Line termination
//!
//! Both `\r` and `\n` submit a line. A `\n` that arrives within
//! [`ReadlineOptions::crlf_delay`] of a `\r` is treated as the second half of a CRLF pair
//! and swallowed, so `\r\n` submits exactly once. A bare `\r` on an empty line submits
//! the empty string. Blank lines are never recorded in history.
//!
//! # Example
//!
//! ```rust
//! use r3bl_readline::{KeyEvent, KeyName, Readline, ReadlineEvent, ReadlineOptions};
//!
//! let (mut readline, mut receiver) = Readline::new(ReadlineOptions::default());
//! for ch in "hi".chars() {
//!     readline.apply_key(&KeyEvent::from(ch)).unwrap();
//! }
//! readline.apply_key(&KeyEvent::new(KeyName::Return)).unwrap();
//!
//! assert_eq!(receiver.try_recv(), Some(ReadlineEvent::Line("hi".into())));
//! ```

// Attach sources.
pub mod log;
pub mod readline_impl;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use log::*;
pub use readline_impl::*;
pub use terminal_io::*;
pub use test_fixtures::*;

// Type aliases.
use smallvec::SmallVec;
use std::{pin::Pin, sync::Arc};

pub type StdMutex<T> = std::sync::Mutex<T>;

pub const DEFAULT_INLINE_VEC_SIZE: usize = 8;
pub type InlineVec<T> = SmallVec<[T; DEFAULT_INLINE_VEC_SIZE]>;

pub type PinnedInputStream<T> = Pin<Box<dyn futures_core::Stream<Item = T>>>;

pub type SafeTerminalOutput = Arc<StdMutex<dyn TerminalOutput>>;

/// Wrap the given value in `Ok(..)`. Saves a little typing at the end of functions that
/// return `Result<(), E>`.
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}
