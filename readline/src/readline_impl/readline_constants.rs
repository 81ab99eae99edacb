// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

/// Written to the output when a line is completed or cleared. This is unrelated to the
/// line terminators accepted from input, which may be `\r`, `\n`, or `\r\n`.
pub const EOL: &str = "\r\n";

pub const DEFAULT_PROMPT: &str = "> ";

/// How long after a `\r` a `\n` is still considered the second half of a CRLF pair.
pub const DEFAULT_CRLF_DELAY: Duration = Duration::from_millis(100);

/// Configured CRLF delays below this are raised to it.
pub const MIN_CRLF_DELAY: Duration = Duration::from_millis(100);

/// Used when the output device can't report the terminal size.
pub const DEFAULT_COLUMNS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 60;

pub const HISTORY_SIZE_MAX: usize = 1_000;
