// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The control bytes the prompt engines react to.
pub mod control_char {
    pub const CTRL_A: u8 = 0x01;
    pub const CTRL_C: u8 = 0x03;
    pub const CTRL_D: u8 = 0x04;
    pub const CTRL_E: u8 = 0x05;
    pub const BACKSPACE: u8 = 0x08;
    pub const LINE_FEED: u8 = 0x0A;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const CTRL_R: u8 = 0x12;
    pub const ESCAPE: u8 = 0x1B;
    pub const DELETE: u8 = 0x7F;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EscapeKind {
    Up,
    Down,
    Left,
    Right,
    WordLeft,
    WordRight,
    Unknown,
}

/// One classified read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A C0 control byte or DEL. A bare `ESC` is `ControlChar(0x1B)`.
    ControlChar(u8),
    EscapeSequence(EscapeKind),
    /// Typed or pasted text, with control bytes removed.
    PrintableRun(String),
}

impl KeyEvent {
    #[must_use]
    pub fn is_enter(&self) -> bool {
        matches!(
            self,
            KeyEvent::ControlChar(
                control_char::CARRIAGE_RETURN | control_char::LINE_FEED
            )
        )
    }

    #[must_use]
    pub fn is_backspace(&self) -> bool {
        matches!(
            self,
            KeyEvent::ControlChar(control_char::BACKSPACE | control_char::DELETE)
        )
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self, KeyEvent::PrintableRun(text) if text == " ")
    }

    /// `1` through `9` typed on its own.
    #[must_use]
    pub fn as_shortcut_digit(&self) -> Option<usize> {
        let KeyEvent::PrintableRun(text) = self else {
            return None;
        };
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch @ '1'..='9'), None) => ch.to_digit(10).map(|it| it as usize),
            _ => None,
        }
    }
}
