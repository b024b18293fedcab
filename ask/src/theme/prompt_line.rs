// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::Theme;
use crate::display_width;

/// The `{indent}{indicator} {message}{suffix}: ` header that starts every question.
/// The indicator is the leading glyph (`?` by default) that the reload spinner
/// animates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    pub indent: String,
    pub indicator: String,
    pub message: String,
    pub suffix: String,
}

impl PromptLine {
    #[must_use]
    pub fn new(theme: &Theme, message: impl Into<String>) -> Self {
        Self {
            indent: theme.indent.clone(),
            indicator: theme.question_prefix.clone(),
            message: message.into(),
            suffix: theme.suffix.clone(),
        }
    }

    #[must_use]
    pub fn render(&self, theme: &Theme) -> String {
        self.render_with(&theme.question(&self.message))
    }

    /// The static line left behind once a question is answered.
    #[must_use]
    pub fn render_final(&self, answer: &str) -> String {
        format!("{}{answer}", self.render_with(&self.message))
    }

    /// Zero based column of the indicator glyph.
    #[must_use]
    pub fn indicator_column(&self) -> usize { display_width(&self.indent) }

    fn render_with(&self, message: &str) -> String {
        let mut acc = self.indent.clone();
        if !self.indicator.is_empty() {
            acc.push_str(&self.indicator);
            acc.push(' ');
        }
        acc.push_str(message);
        acc.push_str(&self.suffix);
        acc.push_str(": ");
        acc
    }
}
