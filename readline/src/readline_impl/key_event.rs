// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyModifiers};
use std::str::FromStr;
use strum_macros::EnumString;

/// The name of a decoded key. Names that are not listed here (typically single
/// printable characters like `a` or `7`) are carried in [`KeyName::Text`].
///
/// Parsing is lowercase: `"pageup".parse::<KeyName>()` is [`KeyName::PageUp`] and
/// `"f5"` is [`KeyName::F5`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum KeyName {
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Return,
    Linefeed,
    Space,
    Escape,
    Tab,
    Clear,
    End,
    Home,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Undefined,
    #[strum(default)]
    Text(String),
}

impl KeyName {
    /// Never fails: unknown names become [`KeyName::Text`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Text(name.to_owned()))
    }

    /// Function keys beyond `F12` map to [`KeyName::Undefined`].
    #[must_use]
    pub fn function_key(number: u8) -> Self {
        match number {
            1 => Self::F1,
            2 => Self::F2,
            3 => Self::F3,
            4 => Self::F4,
            5 => Self::F5,
            6 => Self::F6,
            7 => Self::F7,
            8 => Self::F8,
            9 => Self::F9,
            10 => Self::F10,
            11 => Self::F11,
            12 => Self::F12,
            _ => Self::Undefined,
        }
    }
}

/// A decoded keystroke: the key's name plus the modifiers the editor cares about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub name: KeyName,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(name: KeyName) -> Self {
        Self {
            name,
            ctrl: false,
            shift: false,
        }
    }

    #[must_use]
    pub fn named(name: &str) -> Self { Self::new(KeyName::parse(name)) }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Is this `ctrl` + the given letter (case insensitive)?
    #[must_use]
    pub fn is_ctrl_char(&self, letter: char) -> bool {
        self.ctrl
            && matches!(&self.name, KeyName::Text(text)
                if text.len() == letter.len_utf8()
                    && text.chars().all(|it| it.eq_ignore_ascii_case(&letter)))
    }
}

/// Convert a typed character into the event a terminal key decoder would produce for
/// it. ASCII uppercase letters become the lowercase name with `shift` set.
impl From<char> for KeyEvent {
    fn from(ch: char) -> Self {
        match ch {
            ' ' => Self::new(KeyName::Space),
            '\r' => Self::new(KeyName::Return),
            '\n' => Self::new(KeyName::Linefeed),
            '\t' => Self::new(KeyName::Tab),
            _ if ch.is_ascii_uppercase() => {
                Self::new(KeyName::Text(ch.to_ascii_lowercase().to_string())).with_shift()
            }
            _ => Self::new(KeyName::Text(ch.to_string())),
        }
    }
}

/// Crossterm is the production key decoder. Its events are mapped onto [`KeyEvent`]
/// here.
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key_event: crossterm::event::KeyEvent) -> Self {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);

        let name = match key_event.code {
            // In raw mode crossterm reports a bare `\n` as Ctrl+J.
            KeyCode::Char('j') if ctrl => return Self::new(KeyName::Linefeed),
            KeyCode::Char(' ') => KeyName::Space,
            KeyCode::Char(ch) => KeyName::Text(ch.to_string()),
            KeyCode::Enter => KeyName::Return,
            KeyCode::Backspace => KeyName::Backspace,
            KeyCode::Left => KeyName::Left,
            KeyCode::Right => KeyName::Right,
            KeyCode::Up => KeyName::Up,
            KeyCode::Down => KeyName::Down,
            KeyCode::Home => KeyName::Home,
            KeyCode::End => KeyName::End,
            KeyCode::PageUp => KeyName::PageUp,
            KeyCode::PageDown => KeyName::PageDown,
            KeyCode::Tab | KeyCode::BackTab => KeyName::Tab,
            KeyCode::Delete => KeyName::Delete,
            KeyCode::Insert => KeyName::Insert,
            KeyCode::Esc => KeyName::Escape,
            KeyCode::F(number) => KeyName::function_key(number),
            _ => KeyName::Undefined,
        };

        Self {
            name,
            ctrl,
            shift: shift || key_event.code == KeyCode::BackTab,
        }
    }
}
