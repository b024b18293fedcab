// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::UnicodeWidthStr;

/// Number of terminal columns `text` occupies once its ANSI style sequences are
/// removed.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        UnicodeWidthStr::width(strip_ansi_escapes::strip_str(text).as_str())
    } else {
        UnicodeWidthStr::width(text)
    }
}

/// Saturating conversion for cursor motion arguments.
#[must_use]
pub fn as_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }
