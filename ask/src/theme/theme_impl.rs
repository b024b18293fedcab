// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc, time::Duration};

use crossterm::style::Stylize as _;

use super::{DefaultItemFormatter, ItemFormatter};
use crate::DEFAULT_INTERRUPT_WINDOW;

pub const DEFAULT_MAX_LENGTH: usize = 120;
pub const DEFAULT_SPINNER_TICK: Duration = Duration::from_millis(80);
pub const DEFAULT_INDENT: &str = "  ";

/// More info: <https://www.unicode.org/charts/script/chart_Braille.html>
pub const BRAILLE_DOTS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Every glyph, color, and limit the prompt engines use. One immutable value is handed
/// to [`crate::Ask`] at session start; questions can override `prefix`, `suffix`, and
/// `indent` for themselves.
#[derive(Clone)]
pub struct Theme {
    pub use_color: bool,
    pub question_prefix: String,
    pub error_prefix: String,
    pub indent: String,
    pub suffix: String,
    /// Blank lines written before each prompt.
    pub pre_new_line: usize,
    pub selected_prefix: String,
    pub unselected_prefix: String,
    pub inline_selected_prefix: String,
    pub inline_unselected_prefix: String,
    pub separator_line: String,
    pub spinner_frames: Vec<String>,
    pub spinner_tick: Duration,
    pub success_glyph: String,
    pub failure_glyph: String,
    pub max_length: usize,
    pub interrupt_window: Duration,
    pub invalid_answer_message: String,
    pub exit_confirmation_message: String,
    pub formatter: Arc<dyn ItemFormatter>,
}

impl Debug for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theme")
            .field("use_color", &self.use_color)
            .field("indent", &self.indent)
            .field("pre_new_line", &self.pre_new_line)
            .field("max_length", &self.max_length)
            .field("spinner_tick", &self.spinner_tick)
            .field("interrupt_window", &self.interrupt_window)
            .finish_non_exhaustive()
    }
}

impl Default for Theme {
    fn default() -> Self { Self::new(true) }
}

impl Theme {
    /// No SGR styling at all. Glyphs and layout are the same as [`Theme::default`].
    #[must_use]
    pub fn plain() -> Self { Self::new(false) }

    fn new(use_color: bool) -> Self {
        let paint = |text: &str, color: fn(&str) -> String| {
            if use_color { color(text) } else { text.to_string() }
        };
        Self {
            use_color,
            question_prefix: paint("?", |it| it.green().to_string()),
            error_prefix: paint(">>", |it| it.red().to_string()),
            indent: DEFAULT_INDENT.to_string(),
            suffix: String::new(),
            pre_new_line: 1,
            selected_prefix: paint("● ", |it| it.cyan().to_string()),
            unselected_prefix: "○ ".to_string(),
            inline_selected_prefix: "● ".to_string(),
            inline_unselected_prefix: "○ ".to_string(),
            separator_line: format!(" {}", "-".repeat(16)),
            spinner_frames: BRAILLE_DOTS
                .iter()
                .map(|&frame| paint(frame, |it| it.cyan().to_string()))
                .collect(),
            spinner_tick: DEFAULT_SPINNER_TICK,
            success_glyph: paint("✔", |it| it.green().to_string()),
            failure_glyph: paint("✖", |it| it.red().to_string()),
            max_length: DEFAULT_MAX_LENGTH,
            interrupt_window: DEFAULT_INTERRUPT_WINDOW,
            invalid_answer_message: "Invalid answer, please try again.".to_string(),
            exit_confirmation_message: "You pressed Ctrl-D. Do you want to exit?".to_string(),
            formatter: Arc::new(DefaultItemFormatter { use_color }),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ItemFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }
}

/// Text styles used outside of list items.
impl Theme {
    #[must_use]
    pub fn question(&self, text: &str) -> String {
        if self.use_color { text.bold().to_string() } else { text.to_string() }
    }

    #[must_use]
    pub fn answer(&self, text: &str) -> String {
        if self.use_color { text.green().to_string() } else { text.to_string() }
    }

    #[must_use]
    pub fn yes(&self, text: &str) -> String { self.answer(text) }

    #[must_use]
    pub fn no(&self, text: &str) -> String {
        if self.use_color { text.red().to_string() } else { text.to_string() }
    }

    #[must_use]
    pub fn hint(&self, text: &str) -> String {
        if self.use_color { text.dark_grey().to_string() } else { text.to_string() }
    }

    /// Selected item on the final line of an inline checkbox.
    #[must_use]
    pub fn final_selected(&self, text: &str) -> String { self.answer(text) }

    /// Unselected item on the final line of an inline checkbox.
    #[must_use]
    pub fn final_unselected(&self, text: &str) -> String {
        if self.use_color {
            text.dark_grey().crossed_out().to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn error_line(&self, message: &str) -> String {
        format!("{} {message}", self.error_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_width;

    #[test]
    fn test_plain_theme_has_no_escape_sequences() {
        let theme = Theme::plain();
        assert_eq!(theme.question_prefix, "?");
        assert_eq!(theme.error_line("bad"), ">> bad");
        assert_eq!(theme.answer("ok"), "ok");
        assert_eq!(theme.separator_line, " ----------------");
    }

    #[test]
    fn test_glyphs_are_one_column_wide() {
        let theme = Theme::default();
        assert_eq!(display_width(&theme.question_prefix), 1);
        assert_eq!(display_width(&theme.success_glyph), 1);
        assert_eq!(display_width(&theme.failure_glyph), 1);
        for frame in &theme.spinner_frames {
            assert_eq!(display_width(frame), 1);
        }
    }

    #[test]
    fn test_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.max_length, 120);
        assert_eq!(theme.spinner_tick, Duration::from_millis(80));
        assert_eq!(theme.interrupt_window, Duration::from_millis(400));
        assert_eq!(theme.indent, "  ");
    }
}
