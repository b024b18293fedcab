// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::UnicodeWidthChar as _;

use crate::DEFAULT_MAX_LENGTH;

/// Editable text plus a cursor, addressed in Unicode scalar values. The cursor is always
/// in `0..=len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    content: Vec<char>,
    cursor: usize,
    /// Hidden content is never echoed. Only `mask` (if any) is shown, once per char.
    pub hidden: bool,
    pub mask: Option<char>,
    pub max_length: usize,
}

impl Default for TextBuffer {
    fn default() -> Self { Self::new(DEFAULT_MAX_LENGTH) }
}

impl TextBuffer {
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            content: Vec::new(),
            cursor: 0,
            hidden: false,
            mask: None,
            max_length,
        }
    }

    #[must_use]
    pub fn new_hidden(max_length: usize, mask: Option<char>) -> Self {
        Self {
            hidden: true,
            mask,
            ..Self::new(max_length)
        }
    }

    #[must_use]
    pub fn content(&self) -> String { self.content.iter().collect() }

    #[must_use]
    pub fn len(&self) -> usize { self.content.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Replaces the content (clipped to `max_length`) and puts the cursor at the end.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.chars().take(self.max_length).collect();
        self.cursor = self.content.len();
    }

    pub fn move_start(&mut self) { self.cursor = 0; }

    pub fn move_end(&mut self) { self.cursor = self.content.len(); }

    pub fn move_left(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

    pub fn move_right(&mut self) { self.cursor = (self.cursor + 1).min(self.content.len()); }

    /// To the start of the current word, or of the previous one when already there.
    pub fn move_word_left(&mut self) {
        let mut index = self.cursor;
        while index > 0 && self.content[index - 1].is_whitespace() {
            index -= 1;
        }
        while index > 0 && !self.content[index - 1].is_whitespace() {
            index -= 1;
        }
        self.cursor = index;
    }

    /// To the end of the current word, or of the next one when already there.
    pub fn move_word_right(&mut self) {
        let len = self.content.len();
        let mut index = self.cursor;
        while index < len && self.content[index].is_whitespace() {
            index += 1;
        }
        while index < len && !self.content[index].is_whitespace() {
            index += 1;
        }
        self.cursor = index;
    }

    /// Inserts at the cursor. Whatever doesn't fit in `max_length` is dropped. Returns
    /// the number of chars inserted.
    pub fn insert_run(&mut self, text: &str) -> usize {
        let room = self.max_length.saturating_sub(self.content.len());
        let chars: Vec<char> = text.chars().take(room).collect();
        let count = chars.len();
        self.content.splice(self.cursor..self.cursor, chars);
        self.cursor += count;
        count
    }

    /// Returns `false` when the cursor is already at the start.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.content.remove(self.cursor);
        true
    }

    /// What the terminal shows for this buffer.
    #[must_use]
    pub fn rendered(&self) -> String {
        match (self.hidden, self.mask) {
            (false, _) => self.content(),
            (true, Some(mask)) => std::iter::repeat_n(mask, self.content.len()).collect(),
            (true, None) => String::new(),
        }
    }

    /// Display columns between the start of the rendered buffer and the cursor.
    #[must_use]
    pub fn rendered_width_before_cursor(&self) -> usize {
        match (self.hidden, self.mask) {
            (false, _) => self.content[..self.cursor]
                .iter()
                .map(|ch| ch.width().unwrap_or(0))
                .sum(),
            (true, Some(mask)) => mask.width().unwrap_or(0) * self.cursor,
            (true, None) => 0,
        }
    }
}
