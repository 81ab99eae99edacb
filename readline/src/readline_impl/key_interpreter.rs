// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Maps a [`KeyEvent`] to what the editor should do about it. This is a pure function
//! of the key; [`crate::Readline`] applies the resulting [`EditCommand`] to its state.

use crate::{KeyEvent, KeyName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// `up` or `ctrl+p`.
    HistoryPrevious,
    /// `down` or `ctrl+n`.
    HistoryNext,
    /// `ctrl+c` or `ctrl+d`.
    Close,
    Backspace,
    /// `return` (`linefeed == false`) or `linefeed` (`linefeed == true`).
    Submit { linefeed: bool },
    MoveLeft,
    MoveRight,
    Insert(String),
    Ignore,
}

impl EditCommand {
    #[must_use]
    pub fn is_history_navigation(&self) -> bool {
        matches!(self, EditCommand::HistoryPrevious | EditCommand::HistoryNext)
    }
}

/// Every key maps to a command; keys the editor has no use for map to
/// [`EditCommand::Ignore`].
///
/// Ctrl chords on printable keys other than `c`, `d`, `p` and `n` are ignored rather
/// than inserted.
#[must_use]
pub fn interpret(key: &KeyEvent) -> EditCommand {
    match &key.name {
        KeyName::Up => EditCommand::HistoryPrevious,
        KeyName::Down => EditCommand::HistoryNext,
        KeyName::Backspace => EditCommand::Backspace,
        KeyName::Return => EditCommand::Submit { linefeed: false },
        KeyName::Linefeed => EditCommand::Submit { linefeed: true },
        KeyName::Right => EditCommand::MoveRight,
        KeyName::Left => EditCommand::MoveLeft,
        KeyName::Escape
        | KeyName::F1
        | KeyName::F2
        | KeyName::F3
        | KeyName::F4
        | KeyName::F5
        | KeyName::F6
        | KeyName::F7
        | KeyName::F8
        | KeyName::F9
        | KeyName::F10
        | KeyName::F11
        | KeyName::F12
        | KeyName::Clear
        | KeyName::End
        | KeyName::Home
        | KeyName::PageUp
        | KeyName::PageDown
        | KeyName::Insert
        | KeyName::Delete
        | KeyName::Tab
        | KeyName::Undefined => EditCommand::Ignore,
        KeyName::Space if key.ctrl => EditCommand::Ignore,
        KeyName::Space => EditCommand::Insert(" ".into()),
        KeyName::Text(_) if key.ctrl => interpret_ctrl_chord(key),
        KeyName::Text(text) if text.is_empty() => EditCommand::Ignore,
        KeyName::Text(text) => EditCommand::Insert(if key.shift {
            text.to_uppercase()
        } else {
            text.clone()
        }),
    }
}

fn interpret_ctrl_chord(key: &KeyEvent) -> EditCommand {
    if key.is_ctrl_char('c') || key.is_ctrl_char('d') {
        EditCommand::Close
    } else if key.is_ctrl_char('p') {
        EditCommand::HistoryPrevious
    } else if key.is_ctrl_char('n') {
        EditCommand::HistoryNext
    } else {
        EditCommand::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(KeyEvent::named("up"), EditCommand::HistoryPrevious)]
    #[test_case(KeyEvent::named("p").with_ctrl(), EditCommand::HistoryPrevious)]
    #[test_case(KeyEvent::named("down"), EditCommand::HistoryNext)]
    #[test_case(KeyEvent::named("n").with_ctrl(), EditCommand::HistoryNext)]
    #[test_case(KeyEvent::named("c").with_ctrl(), EditCommand::Close)]
    #[test_case(KeyEvent::named("d").with_ctrl(), EditCommand::Close)]
    #[test_case(KeyEvent::named("backspace"), EditCommand::Backspace)]
    #[test_case(KeyEvent::named("return"), EditCommand::Submit { linefeed: false })]
    #[test_case(KeyEvent::named("linefeed"), EditCommand::Submit { linefeed: true })]
    #[test_case(KeyEvent::named("left"), EditCommand::MoveLeft)]
    #[test_case(KeyEvent::named("right"), EditCommand::MoveRight)]
    #[test_case(KeyEvent::named("space"), EditCommand::Insert(" ".into()))]
    fn test_named_keys(key: KeyEvent, expected: EditCommand) {
        assert_eq!(interpret(&key), expected);
    }

    #[test_case("escape")]
    #[test_case("f1")]
    #[test_case("f12")]
    #[test_case("clear")]
    #[test_case("end")]
    #[test_case("home")]
    #[test_case("pageup")]
    #[test_case("pagedown")]
    #[test_case("insert")]
    #[test_case("delete")]
    #[test_case("tab")]
    #[test_case("undefined")]
    fn test_ignored_keys(name: &str) {
        assert_eq!(interpret(&KeyEvent::named(name)), EditCommand::Ignore);
    }

    #[test]
    fn test_plain_characters_are_inserted() {
        assert_eq!(interpret(&KeyEvent::named("d")), EditCommand::Insert("d".into()));
        assert_eq!(interpret(&KeyEvent::named("c")), EditCommand::Insert("c".into()));
        assert_eq!(interpret(&KeyEvent::named("7")), EditCommand::Insert("7".into()));
    }

    #[test]
    fn test_shift_upper_cases_the_whole_name() {
        assert_eq!(
            interpret(&KeyEvent::named("d").with_shift()),
            EditCommand::Insert("D".into())
        );
        assert_eq!(
            interpret(&KeyEvent::named("abc").with_shift()),
            EditCommand::Insert("ABC".into())
        );
    }

    #[test]
    fn test_other_ctrl_chords_are_ignored() {
        assert_eq!(interpret(&KeyEvent::named("a").with_ctrl()), EditCommand::Ignore);
        assert_eq!(interpret(&KeyEvent::named("space").with_ctrl()), EditCommand::Ignore);
    }

    #[test]
    fn test_history_navigation_flag() {
        assert!(EditCommand::HistoryPrevious.is_history_navigation());
        assert!(EditCommand::HistoryNext.is_history_navigation());
        assert!(!EditCommand::Backspace.is_history_navigation());
    }
}
