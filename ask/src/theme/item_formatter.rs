// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Stylize as _;

/// The closed set of ways a list item can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum DisplayVariant {
    Active,
    Inactive,
    Disabled,
    SelectedActive,
    SelectedInactive,
}

impl DisplayVariant {
    #[must_use]
    pub fn resolve(active: bool, selected: bool, disabled: bool) -> Self {
        match (disabled, active, selected) {
            (true, _, _) => DisplayVariant::Disabled,
            (false, true, true) => DisplayVariant::SelectedActive,
            (false, true, false) => DisplayVariant::Active,
            (false, false, true) => DisplayVariant::SelectedInactive,
            (false, false, false) => DisplayVariant::Inactive,
        }
    }
}

/// Styling strategy for list items. `message` already carries any selection or number
/// prefix. Implement this to fully customize how lists look.
pub trait ItemFormatter: Send + Sync {
    /// Items laid out one per cell in a grid (select, checkbox).
    fn format(&self, message: &str, variant: DisplayVariant) -> String;

    /// Items laid out side by side on the prompt line (inline checkbox).
    fn format_inline(&self, message: &str, variant: DisplayVariant) -> String {
        self.format(message, variant)
    }
}

/// `❯` marks the active item, disabled items are dimmed and tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultItemFormatter {
    pub use_color: bool,
}

impl ItemFormatter for DefaultItemFormatter {
    fn format(&self, message: &str, variant: DisplayVariant) -> String {
        match variant {
            DisplayVariant::Active | DisplayVariant::SelectedActive => {
                let text = format!("❯ {message}");
                if self.use_color {
                    text.cyan().to_string()
                } else {
                    text
                }
            }
            DisplayVariant::Inactive | DisplayVariant::SelectedInactive => {
                format!("  {message}")
            }
            DisplayVariant::Disabled => {
                let text = format!("- {message} (disabled)");
                if self.use_color {
                    text.dark_grey().to_string()
                } else {
                    text
                }
            }
        }
    }

    fn format_inline(&self, message: &str, variant: DisplayVariant) -> String {
        if !self.use_color {
            return match variant {
                DisplayVariant::Active | DisplayVariant::SelectedActive => {
                    format!("[{message}]")
                }
                _ => message.to_string(),
            };
        }
        match variant {
            DisplayVariant::Active => message.dark_grey().underlined().to_string(),
            DisplayVariant::SelectedActive => message.green().underlined().to_string(),
            DisplayVariant::Inactive | DisplayVariant::Disabled => {
                message.dark_grey().to_string()
            }
            DisplayVariant::SelectedInactive => message.green().to_string(),
        }
    }
}
