// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InlineVec, KeyDecoder, KeyEvent, KeyName};
use smallvec::smallvec;

/// A tiny [`KeyDecoder`] that understands just enough of what a terminal sends in raw
/// mode to drive [`crate::Readline`] in tests:
/// - printable ASCII, with uppercase letters reported as `shift` + the lowercase name,
/// - `\r`, `\n`, `\t`, space, DEL and `\x08` (both are `backspace`),
/// - `ctrl` + letter (`\x01` ..= `\x1a`),
/// - `ESC [ A|B|C|D` (the arrow keys), even when split across chunks.
///
/// A lone `ESC` at the end of a chunk is held back until the next chunk shows whether an
/// escape sequence follows. Anything else decodes to `undefined`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDecoderMock {
    pub pending: Vec<u8>,
}

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;
const BS: u8 = 0x08;

impl KeyDecoder for KeyDecoderMock {
    fn decode(&mut self, bytes: &[u8]) -> InlineVec<KeyEvent> {
        self.pending.extend_from_slice(bytes);

        let mut acc: InlineVec<KeyEvent> = smallvec![];
        let mut consumed = 0;

        while let Some(&byte) = self.pending.get(consumed) {
            if byte == ESC {
                match self.pending.get(consumed + 1..consumed + 3) {
                    Some([b'[', last]) => {
                        acc.push(KeyEvent::new(arrow_key(*last)));
                        consumed += 3;
                    }
                    // Incomplete escape sequence, wait for more bytes.
                    None if self.pending.get(consumed + 1).is_none_or(|it| *it == b'[') => {
                        break;
                    }
                    _ => {
                        acc.push(KeyEvent::new(KeyName::Escape));
                        consumed += 1;
                    }
                }
                continue;
            }

            acc.push(decode_byte(byte));
            consumed += 1;
        }

        self.pending.drain(..consumed);
        acc
    }
}

fn arrow_key(byte: u8) -> KeyName {
    match byte {
        b'A' => KeyName::Up,
        b'B' => KeyName::Down,
        b'C' => KeyName::Right,
        b'D' => KeyName::Left,
        _ => KeyName::Undefined,
    }
}

fn decode_byte(byte: u8) -> KeyEvent {
    match byte {
        b'\r' => KeyEvent::new(KeyName::Return),
        b'\n' => KeyEvent::new(KeyName::Linefeed),
        b'\t' => KeyEvent::new(KeyName::Tab),
        b' ' => KeyEvent::new(KeyName::Space),
        DEL | BS => KeyEvent::new(KeyName::Backspace),
        0x01..=0x1a => {
            let letter = char::from(b'a' + byte - 1);
            KeyEvent::new(KeyName::Text(letter.to_string())).with_ctrl()
        }
        0x21..=0x7e => KeyEvent::from(char::from(byte)),
        _ => KeyEvent::new(KeyName::Undefined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(decoder: &mut KeyDecoderMock, bytes: &[u8]) -> Vec<KeyEvent> {
        decoder.decode(bytes).into_vec()
    }

    #[test]
    fn test_printable_and_control_bytes() {
        let mut decoder = KeyDecoderMock::default();
        assert_eq!(
            decode(&mut decoder, b"aB \r\n\x7f\x03"),
            vec![
                KeyEvent::named("a"),
                KeyEvent::named("b").with_shift(),
                KeyEvent::new(KeyName::Space),
                KeyEvent::new(KeyName::Return),
                KeyEvent::new(KeyName::Linefeed),
                KeyEvent::new(KeyName::Backspace),
                KeyEvent::named("c").with_ctrl(),
            ]
        );
        assert!(decoder.pending.is_empty());
    }

    #[test]
    fn test_escape_sequence_split_across_chunks() {
        let mut decoder = KeyDecoderMock::default();
        assert_eq!(decode(&mut decoder, b"x\x1b"), vec![KeyEvent::named("x")]);
        assert_eq!(decode(&mut decoder, b"["), vec![]);
        assert_eq!(
            decode(&mut decoder, b"Ay"),
            vec![KeyEvent::new(KeyName::Up), KeyEvent::named("y")]
        );
    }

    #[test]
    fn test_all_arrows_and_lone_escape() {
        let mut decoder = KeyDecoderMock::default();
        assert_eq!(
            decode(&mut decoder, b"\x1b[A\x1b[B\x1b[C\x1b[D\x1bq"),
            vec![
                KeyEvent::new(KeyName::Up),
                KeyEvent::new(KeyName::Down),
                KeyEvent::new(KeyName::Right),
                KeyEvent::new(KeyName::Left),
                KeyEvent::new(KeyName::Escape),
                KeyEvent::named("q"),
            ]
        );
    }
}
