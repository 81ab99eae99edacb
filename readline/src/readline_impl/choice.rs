// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A small selection menu that can temporarily take over the editor. While it is active
//! it gets every key, and the line editor gets none. It is drawn on the rows right below
//! the prompt block, one option per row, with the selected option marked.

use crate::{EOL, KeyEvent, KeyName,
            terminal_io::ansi_escapes::{cursor_to_column, cursor_up, erase_display_end,
                                        foreground, reset_color, show_cursor}};
use crossterm::style::Color;

pub const SELECTED_MARKER: &str = "❯ ";
pub const UNSELECTED_MARKER: &str = "  ";

/// What the editor should do after the menu handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The selection moved, draw the menu again.
    Redraw,
    Selected(String),
    Cancelled,
    Ignored,
}

/// `selected_index` is always a valid index into `options` while `active` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceState {
    pub active: bool,
    pub options: Vec<String>,
    pub selected_index: usize,
    /// Rows between the first row of the menu and the row the terminal cursor was left
    /// on by the last [`ChoiceState::render`].
    pub rendered_rows: usize,
    /// Height of the prompt block the menu was drawn below. Used to get back to the top
    /// of the prompt block once the menu is gone.
    pub prompt_rows_above: usize,
}

impl ChoiceState {
    /// Enter choice mode with the first option selected. Does nothing and returns
    /// `false` when there are no options.
    pub fn activate(&mut self, options: Vec<String>, prompt_rows_above: usize) -> bool {
        if options.is_empty() {
            return false;
        }
        *self = Self {
            active: true,
            options,
            selected_index: 0,
            rendered_rows: 0,
            prompt_rows_above,
        };
        true
    }

    pub fn deactivate(&mut self) { *self = Self::default(); }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        if !self.active {
            return None;
        }
        self.options.get(self.selected_index).map(String::as_str)
    }

    /// Moves wrap around at both ends of the list.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ChoiceOutcome {
        if !self.active {
            return ChoiceOutcome::Ignored;
        }
        let len = self.options.len();
        match key.name {
            KeyName::Up => {
                self.selected_index = (self.selected_index + len - 1) % len;
                ChoiceOutcome::Redraw
            }
            KeyName::Down => {
                self.selected_index = (self.selected_index + 1) % len;
                ChoiceOutcome::Redraw
            }
            KeyName::Return => match self.selected() {
                Some(option) => ChoiceOutcome::Selected(option.to_owned()),
                None => ChoiceOutcome::Ignored,
            },
            KeyName::Escape => ChoiceOutcome::Cancelled,
            _ => ChoiceOutcome::Ignored,
        }
    }

    /// Build the output that (re)draws the menu, starting from where the last render
    /// left the terminal cursor, or from column 0 of the menu's first row on the first
    /// render.
    pub fn render(&mut self, columns: usize) -> String {
        let columns = columns.max(1);
        let mut acc = cursor_to_column(0);
        acc.push_str(&cursor_up(self.rendered_rows));
        acc.push_str(&erase_display_end());

        let mut rows = 0;
        for (index, option) in self.options.iter().enumerate() {
            if index > 0 {
                acc.push_str(EOL);
            }
            if index == self.selected_index {
                acc.push_str(&foreground(Color::Green));
                acc.push_str(SELECTED_MARKER);
                acc.push_str(option);
                acc.push_str(&reset_color());
            } else {
                acc.push_str(UNSELECTED_MARKER);
                acc.push_str(option);
            }
            let width = UNSELECTED_MARKER.chars().count() + option.chars().count();
            rows += width.div_ceil(columns);
        }

        self.rendered_rows = rows.saturating_sub(1);
        acc
    }

    /// Build the output that erases the menu and shows the terminal cursor again. The
    /// terminal cursor ends up at column 0 of the menu's first row.
    #[must_use]
    pub fn erase(&self) -> String {
        let mut acc = cursor_to_column(0);
        acc.push_str(&cursor_up(self.rendered_rows));
        acc.push_str(&erase_display_end());
        acc.push_str(&show_cursor());
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(items: &[&str]) -> Vec<String> { items.iter().map(|it| (*it).to_owned()).collect() }

    #[test]
    fn test_activate_requires_options() {
        let mut it = ChoiceState::default();
        assert!(!it.activate(vec![], 1));
        assert!(!it.active);
        assert_eq!(it.selected(), None);

        assert!(it.activate(options(&["a", "b"]), 1));
        assert!(it.active);
        assert_eq!(it.selected(), Some("a"));
    }

    #[test]
    fn test_up_and_down_wrap_around() {
        let mut it = ChoiceState::default();
        it.activate(options(&["a", "b", "c"]), 1);

        assert_eq!(it.handle_key(&KeyEvent::named("up")), ChoiceOutcome::Redraw);
        assert_eq!(it.selected(), Some("c"));

        assert_eq!(it.handle_key(&KeyEvent::named("down")), ChoiceOutcome::Redraw);
        assert_eq!(it.handle_key(&KeyEvent::named("down")), ChoiceOutcome::Redraw);
        assert_eq!(it.selected(), Some("b"));
    }

    #[test]
    fn test_return_and_escape() {
        let mut it = ChoiceState::default();
        it.activate(options(&["a", "b"]), 1);
        it.handle_key(&KeyEvent::named("down"));

        assert_eq!(
            it.handle_key(&KeyEvent::named("return")),
            ChoiceOutcome::Selected("b".into())
        );
        assert_eq!(it.handle_key(&KeyEvent::named("escape")), ChoiceOutcome::Cancelled);
        assert_eq!(it.handle_key(&KeyEvent::named("x")), ChoiceOutcome::Ignored);
        assert_eq!(it.handle_key(&KeyEvent::named("linefeed")), ChoiceOutcome::Ignored);

        it.deactivate();
        assert_eq!(it.handle_key(&KeyEvent::named("return")), ChoiceOutcome::Ignored);
    }

    #[test]
    fn test_render_marks_the_selected_option() {
        let mut it = ChoiceState::default();
        it.activate(options(&["one", "two"]), 1);

        let output = it.render(80);
        assert_eq!(
            output,
            "\x1b[1G\x1b[J\x1b[38;5;10m❯ one\x1b[0m\r\n  two"
        );
        assert_eq!(it.rendered_rows, 1);

        it.handle_key(&KeyEvent::named("down"));
        let output = it.render(80);
        assert_eq!(
            output,
            "\x1b[1G\x1b[1A\x1b[J  one\r\n\x1b[38;5;10m❯ two\x1b[0m"
        );
    }

    #[test]
    fn test_rendered_rows_account_for_wrapping() {
        let mut it = ChoiceState::default();
        // 2 + 9 = 11 chars on 10 columns takes two rows.
        it.activate(options(&["long item", "b"]), 1);
        it.render(10);
        assert_eq!(it.rendered_rows, 2);

        assert_eq!(it.erase(), "\x1b[1G\x1b[2A\x1b[J\x1b[?25h");
    }
}
