// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Classifies the leading bytes of a read into one [`KeyEvent`].
//!
//! There is no waiting for "more bytes": an escape sequence is whatever arrived with the
//! `ESC` in one read. This is what separates a bare `ESC` (cancel) from `ESC [ A` (up
//! arrow), since a terminal writes an escape sequence in one go. An event never takes
//! more bytes than it needs, `consumed` tells the caller where the next event starts.
//!
//! | Bytes                  | Event                          |
//! |------------------------|--------------------------------|
//! | (none)                 | end of stream                  |
//! | `ESC`, `ESC ESC ...`   | `ControlChar(0x1B)`            |
//! | `ESC [ A/B/C/D`        | Up / Down / Right / Left       |
//! | `ESC O A/B/C/D`        | Up / Down / Right / Left       |
//! | `ESC [ 1 ; 5 C/D`      | WordRight / WordLeft           |
//! | `ESC f` / `ESC b`      | WordRight / WordLeft           |
//! | other `ESC ...`        | `EscapeSequence(Unknown)`      |
//! | `CR LF`                | `ControlChar(0x0D)`            |
//! | C0 control or DEL      | `ControlChar(byte)`            |
//! | anything else          | `PrintableRun(text)` up to the next control byte |

use smallvec::SmallVec;

use super::{EscapeKind, KeyEvent, control_char};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedInput {
    Key { event: KeyEvent, consumed: usize },
    /// A zero-length read.
    EndOfStream,
}

/// The only state kept between reads is the tail of a UTF-8 character that got split
/// across two reads.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending_utf8: SmallVec<[u8; 4]>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn decode(&mut self, bytes: &[u8]) -> DecodedInput {
        let Some(&first) = bytes.first() else {
            self.pending_utf8.clear();
            return DecodedInput::EndOfStream;
        };

        if first == control_char::ESCAPE {
            self.pending_utf8.clear();
            let (event, consumed) = decode_escape(bytes);
            return DecodedInput::Key { event, consumed };
        }

        if first == control_char::CARRIAGE_RETURN
            && bytes.get(1) == Some(&control_char::LINE_FEED)
        {
            self.pending_utf8.clear();
            return DecodedInput::Key {
                event: KeyEvent::ControlChar(first),
                consumed: 2,
            };
        }

        if is_control_byte(first) {
            self.pending_utf8.clear();
            return DecodedInput::Key {
                event: KeyEvent::ControlChar(first),
                consumed: 1,
            };
        }

        let consumed = bytes
            .iter()
            .position(|&byte| is_control_byte(byte))
            .unwrap_or(bytes.len());
        let text = self.decode_text(&bytes[..consumed]);
        DecodedInput::Key {
            event: KeyEvent::PrintableRun(text),
            consumed,
        }
    }

    fn decode_text(&mut self, bytes: &[u8]) -> String {
        let mut acc: SmallVec<[u8; 16]> = self.pending_utf8.drain(..).collect();
        acc.extend_from_slice(bytes);

        match std::str::from_utf8(&acc) {
            Ok(text) => text.to_string(),
            // Incomplete character at the end, keep it for the next read.
            Err(error) if error.error_len().is_none() => {
                let valid_up_to = error.valid_up_to();
                self.pending_utf8.extend_from_slice(&acc[valid_up_to..]);
                String::from_utf8_lossy(&acc[..valid_up_to]).into_owned()
            }
            Err(_) => String::from_utf8_lossy(&acc).into_owned(),
        }
    }
}

fn is_control_byte(byte: u8) -> bool { byte < 0x20 || byte == control_char::DELETE }

fn decode_escape(bytes: &[u8]) -> (KeyEvent, usize) {
    match bytes.get(1) {
        None | Some(&control_char::ESCAPE) => (KeyEvent::ControlChar(control_char::ESCAPE), 1),
        Some(b'[') => decode_csi(bytes),
        Some(b'O') => match bytes.get(2) {
            Some(&final_byte) => (
                KeyEvent::EscapeSequence(arrow_for(final_byte).unwrap_or(EscapeKind::Unknown)),
                3,
            ),
            None => (KeyEvent::EscapeSequence(EscapeKind::Unknown), 2),
        },
        Some(b'f') => (KeyEvent::EscapeSequence(EscapeKind::WordRight), 2),
        Some(b'b') => (KeyEvent::EscapeSequence(EscapeKind::WordLeft), 2),
        Some(_) => (KeyEvent::EscapeSequence(EscapeKind::Unknown), 2),
    }
}

/// `ESC [` parameter bytes, then one final byte in `0x40..=0x7E`.
fn decode_csi(bytes: &[u8]) -> (KeyEvent, usize) {
    let Some(final_index) = bytes
        .iter()
        .skip(2)
        .position(|byte| (0x40..=0x7E).contains(byte))
        .map(|offset| offset + 2)
    else {
        return (KeyEvent::EscapeSequence(EscapeKind::Unknown), bytes.len());
    };

    let params = &bytes[2..final_index];
    let final_byte = bytes[final_index];
    let kind = match (params, final_byte) {
        (b"", _) => arrow_for(final_byte).unwrap_or(EscapeKind::Unknown),
        (b"1;5", b'C') => EscapeKind::WordRight,
        (b"1;5", b'D') => EscapeKind::WordLeft,
        _ => EscapeKind::Unknown,
    };
    (KeyEvent::EscapeSequence(kind), final_index + 1)
}

fn arrow_for(final_byte: u8) -> Option<EscapeKind> {
    match final_byte {
        b'A' => Some(EscapeKind::Up),
        b'B' => Some(EscapeKind::Down),
        b'C' => Some(EscapeKind::Right),
        b'D' => Some(EscapeKind::Left),
        _ => None,
    }
}
