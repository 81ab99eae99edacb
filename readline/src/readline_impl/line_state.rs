// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Size;
use std::time::Instant;

/// The editable line and everything needed to repaint it. Owned exclusively by
/// [`crate::Readline`].
///
/// Lengths and the cursor are counted in [`char`]s, not bytes and not grapheme
/// clusters. The cursor always stays within `0..=line_len()`; every mutation here clamps
/// rather than overshoots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState {
    pub line: String,

    /// Position of the edit cursor in the line, in chars.
    pub cursor: usize,

    pub prompt: String,

    /// Terminal dimensions: `col_width` (columns) and `row_height` (rows).
    pub term_size: Size,

    /// How many rows the last repaint left the terminal cursor below the first row of
    /// the prompt block. The next repaint moves up this many rows before redrawing.
    pub previous_rendered_rows: usize,

    /// When the last `return` was handled, if no other key has arrived since.
    pub pending_return: Option<Instant>,
}

impl LineState {
    #[must_use]
    pub fn new(prompt: impl Into<String>, term_size: Size) -> Self {
        Self {
            line: String::new(),
            cursor: 0,
            prompt: prompt.into(),
            term_size,
            previous_rendered_rows: 0,
            pending_return: None,
        }
    }

    #[must_use]
    pub fn line_len(&self) -> usize { self.line.chars().count() }

    /// Length of the prompt as it appears on screen, ie: without any ANSI escape
    /// sequences used to style it.
    #[must_use]
    pub fn prompt_len(&self) -> usize {
        let stripped = strip_ansi_escapes::strip_str(&self.prompt);
        stripped.chars().count()
    }

    /// Byte offset of the char at `char_index`, or the byte length of the line when the
    /// index is at (or past) the end.
    fn byte_offset(&self, char_index: usize) -> usize {
        self.line
            .char_indices()
            .nth(char_index)
            .map_or(self.line.len(), |(offset, _)| offset)
    }

    /// Splice `text` into the line at the cursor, and advance the cursor past it.
    pub fn insert_str(&mut self, text: &str) {
        self.cursor = self.cursor.min(self.line_len());
        let offset = self.byte_offset(self.cursor);
        self.line.insert_str(offset, text);
        self.cursor += text.chars().count();
    }

    /// Remove the char before the cursor. Returns `false` (and changes nothing) when the
    /// cursor is at the start of the line. A cursor past the end is first pulled back to
    /// the end.
    pub fn delete_before_cursor(&mut self) -> bool {
        self.cursor = self.cursor.min(self.line_len());
        if self.cursor == 0 {
            return false;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.line.remove(offset);
        self.cursor -= 1;
        true
    }

    /// Move the cursor by `delta` chars, clamped to the line. Returns whether it moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.line_len());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    /// Replace the whole line (eg: with a history entry) and put the cursor at its end.
    pub fn replace_line(&mut self, line: impl Into<String>) {
        self.line = line.into();
        self.cursor = self.line_len();
    }

    /// Reset the line, cursor, and row tracking to their initial values. Returns the
    /// line as it was.
    pub fn take_line(&mut self) -> String {
        self.cursor = 0;
        self.previous_rendered_rows = 0;
        std::mem::take(&mut self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line_state() -> LineState { LineState::new("> ", Size::default()) }

    #[test]
    fn test_insert_at_cursor() {
        let mut it = line_state();
        it.insert_str("hllo");
        assert_eq!(it.cursor, 4);

        it.cursor = 1;
        it.insert_str("e");
        assert_eq!(it.line, "hello");
        assert_eq!(it.cursor, 2);

        it.cursor = 5;
        it.insert_str(" world");
        assert_eq!(it.line, "hello world");
        assert_eq!(it.cursor, it.line_len());
    }

    #[test]
    fn test_insert_multibyte_chars() {
        let mut it = line_state();
        it.insert_str("añb");
        it.move_cursor(-1);
        it.insert_str("é");
        assert_eq!(it.line, "añéb");
        assert_eq!(it.cursor, 3);
        assert_eq!(it.line_len(), 4);
    }

    #[test]
    fn test_delete_before_cursor() {
        let mut it = line_state();
        assert!(!it.delete_before_cursor());
        assert_eq!(it.line, "");
        assert_eq!(it.cursor, 0);

        it.insert_str("abc");
        it.cursor = 2;
        assert!(it.delete_before_cursor());
        assert_eq!(it.line, "ac");
        assert_eq!(it.cursor, 1);

        it.cursor = 0;
        assert!(!it.delete_before_cursor());
        assert_eq!(it.line, "ac");
    }

    #[test]
    fn test_cursor_past_the_end_is_pulled_back() {
        let mut it = line_state();
        it.insert_str("héllo");

        it.cursor = 42;
        assert!(it.delete_before_cursor());
        assert_eq!(it.line, "héll");
        assert_eq!(it.cursor, 4);

        it.cursor = 42;
        it.insert_str("!");
        assert_eq!(it.line, "héll!");
        assert_eq!(it.cursor, 5);
    }

    #[test]
    fn test_move_cursor_is_clamped() {
        let mut it = line_state();
        it.insert_str("ab");

        assert!(!it.move_cursor(1));
        assert_eq!(it.cursor, 2);

        assert!(it.move_cursor(-1));
        assert!(it.move_cursor(-1));
        assert!(!it.move_cursor(-1));
        assert_eq!(it.cursor, 0);

        assert!(it.move_cursor(100));
        assert_eq!(it.cursor, 2);
    }

    #[test]
    fn test_replace_and_take_line() {
        let mut it = line_state();
        it.replace_line("from history");
        assert_eq!(it.cursor, 12);

        it.previous_rendered_rows = 3;
        assert_eq!(it.take_line(), "from history");
        assert_eq!(it.line, "");
        assert_eq!(it.cursor, 0);
        assert_eq!(it.previous_rendered_rows, 0);
    }

    #[test]
    fn test_prompt_len_ignores_ansi_styling() {
        let it = LineState::new("\x1b[32m>>\x1b[0m ", Size::default());
        assert_eq!(it.prompt_len(), 3);
    }
}
