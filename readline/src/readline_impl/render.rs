// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Repainting the prompt line. Each function here only builds the escape sequences and
//! text for a repaint; [`crate::Readline`] writes the result to the output device in one
//! go.

use super::line_state::LineState;
use crate::{EOL,
            terminal_io::ansi_escapes::{cursor_down, cursor_to_column, cursor_up,
                                        erase_display_end, erase_line_end}};

/// How the prompt line is repainted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// Assumes `prompt + line` fits on one terminal row. Cheapest, but leaves garbage
    /// behind when the line wraps.
    SingleRow,
    /// Tracks how `prompt + line` wraps across the terminal width, and repaints the
    /// whole block of rows.
    #[default]
    WrapAware,
}

/// Where things land when `prompt + line` is laid out on a terminal that is `columns`
/// wide. Rows are relative to the first row of the prompt block.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PromptGeometry {
    pub cursor_column: usize,
    pub cursor_row: usize,
    /// The row the terminal cursor is on right after `prompt + line` (and the extra line
    /// break, see [`Self::ends_on_boundary`]) has been written.
    pub last_row: usize,
    /// The text exactly fills its last row. Terminals park the cursor on the last
    /// column in this case instead of wrapping, so an explicit line break is written.
    pub ends_on_boundary: bool,
}

impl PromptGeometry {
    #[must_use]
    pub fn new(prompt_len: usize, line_len: usize, cursor: usize, columns: usize) -> Self {
        let columns = columns.max(1);
        let absolute_cursor = prompt_len + cursor;
        let total = prompt_len + line_len;
        Self {
            cursor_column: absolute_cursor % columns,
            cursor_row: absolute_cursor / columns,
            last_row: total / columns,
            ends_on_boundary: total > 0 && total % columns == 0,
        }
    }
}

impl LineState {
    #[must_use]
    pub fn geometry(&self) -> PromptGeometry {
        PromptGeometry::new(
            self.prompt_len(),
            self.line_len(),
            self.cursor,
            self.term_size.columns(),
        )
    }

    /// Build the output that redraws `prompt + line` and puts the terminal cursor where
    /// the edit cursor is. Updates [`LineState::previous_rendered_rows`].
    pub fn render_prompt(&mut self, strategy: RenderStrategy) -> String {
        match strategy {
            RenderStrategy::SingleRow => self.render_single_row(),
            RenderStrategy::WrapAware => self.render_wrap_aware(),
        }
    }

    fn render_single_row(&mut self) -> String {
        let mut acc = cursor_up(self.previous_rendered_rows);
        acc.push_str(&cursor_to_column(0));
        acc.push_str(&erase_line_end());
        acc.push_str(&self.prompt);
        acc.push_str(&self.line);
        acc.push_str(&cursor_to_column(self.prompt_len() + self.cursor));

        self.previous_rendered_rows = 0;
        acc
    }

    fn render_wrap_aware(&mut self) -> String {
        let geometry = self.geometry();

        // Back to the top left of the block that was drawn last time.
        let mut acc = cursor_up(self.previous_rendered_rows);
        acc.push_str(&cursor_to_column(0));
        acc.push_str(&erase_display_end());

        acc.push_str(&self.prompt);
        acc.push_str(&self.line);
        if geometry.ends_on_boundary {
            acc.push_str(EOL);
        }

        acc.push_str(&cursor_up(geometry.last_row - geometry.cursor_row));
        acc.push_str(&cursor_to_column(geometry.cursor_column));

        self.previous_rendered_rows = geometry.cursor_row;
        acc
    }

    /// Index of the last row that holds any text of the prompt block.
    fn last_text_row(&self, strategy: RenderStrategy) -> usize {
        match strategy {
            RenderStrategy::SingleRow => 0,
            RenderStrategy::WrapAware => {
                let total = self.prompt_len() + self.line_len();
                total.saturating_sub(1) / self.term_size.columns()
            }
        }
    }

    /// Number of rows holding text of the prompt block. This is also the row, relative
    /// to the top of the block, that [`Self::move_below_prompt_block`] lands on.
    #[must_use]
    pub fn prompt_block_height(&self, strategy: RenderStrategy) -> usize {
        self.last_text_row(strategy) + 1
    }

    /// Build the output that moves from where the last repaint left the terminal cursor
    /// to column 0 of the first row below the prompt block.
    ///
    /// When the text ends on a column boundary with the cursor at the end, the repaint
    /// already broke onto that row, so no further [`EOL`] is written.
    #[must_use]
    pub fn move_below_prompt_block(&self, strategy: RenderStrategy) -> String {
        let last_text_row = self.last_text_row(strategy);
        if self.previous_rendered_rows > last_text_row {
            return cursor_to_column(0);
        }
        let mut acc = cursor_down(last_text_row - self.previous_rendered_rows);
        acc.push_str(EOL);
        acc
    }
}
