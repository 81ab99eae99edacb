// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure functions that produce the escape sequences used to repaint the prompt line.
//! They are thin wrappers around [`crossterm`] commands, rendered to strings, so that a
//! whole repaint can be accumulated into one buffer and written at once.
//!
//! Moves by zero cells produce an empty string: most terminals treat `CSI 0 A` the same
//! as `CSI 1 A`, which would move the cursor when nothing should happen.

use crossterm::{Command, cursor,
                style::{Color, ResetColor, SetForegroundColor},
                terminal::{Clear, ClearType}};

fn render(command: impl Command) -> String {
    let mut acc = String::new();
    // Writing into a String never fails.
    command.write_ansi(&mut acc).ok();
    acc
}

fn saturating_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

/// Move to the 0-based `column` of the current row.
#[must_use]
pub fn cursor_to_column(column: usize) -> String {
    render(cursor::MoveToColumn(saturating_u16(column)))
}

#[must_use]
pub fn cursor_up(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    render(cursor::MoveUp(saturating_u16(count)))
}

#[must_use]
pub fn cursor_down(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    render(cursor::MoveDown(saturating_u16(count)))
}

#[must_use]
pub fn cursor_forward(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    render(cursor::MoveRight(saturating_u16(count)))
}

#[must_use]
pub fn cursor_back(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    render(cursor::MoveLeft(saturating_u16(count)))
}

/// Erase from the cursor to the end of the current row.
#[must_use]
pub fn erase_line_end() -> String { render(Clear(ClearType::UntilNewLine)) }

/// Erase from the cursor to the end of the display.
#[must_use]
pub fn erase_display_end() -> String { render(Clear(ClearType::FromCursorDown)) }

#[must_use]
pub fn hide_cursor() -> String { render(cursor::Hide) }

#[must_use]
pub fn show_cursor() -> String { render(cursor::Show) }

#[must_use]
pub fn foreground(color: Color) -> String { render(SetForegroundColor(color)) }

#[must_use]
pub fn reset_color() -> String { render(ResetColor) }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_moves_are_empty() {
        assert_eq!(cursor_up(0), "");
        assert_eq!(cursor_down(0), "");
        assert_eq!(cursor_forward(0), "");
        assert_eq!(cursor_back(0), "");
    }

    #[test]
    fn test_cursor_moves() {
        assert_eq!(cursor_up(3), "\x1b[3A");
        assert_eq!(cursor_down(2), "\x1b[2B");
        assert_eq!(cursor_forward(1), "\x1b[1C");
        assert_eq!(cursor_back(4), "\x1b[4D");
    }

    #[test]
    fn test_cursor_to_column_is_one_based_on_the_wire() {
        assert_eq!(cursor_to_column(0), "\x1b[1G");
        assert_eq!(cursor_to_column(7), "\x1b[8G");
    }

    #[test]
    fn test_erase_and_visibility() {
        assert_eq!(erase_line_end(), "\x1b[K");
        assert_eq!(erase_display_end(), "\x1b[J");
        assert_eq!(hide_cursor(), "\x1b[?25l");
        assert_eq!(show_cursor(), "\x1b[?25h");
    }

    #[test]
    fn test_colors() {
        assert_eq!(foreground(Color::Green), "\x1b[38;5;10m");
        assert_eq!(reset_color(), "\x1b[0m");
    }
}
