// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Print;

use super::ListState;
use crate::{CarriageReturn, ClearToLineEnd, CursorUp, DisplayVariant, HideCursor, NewLine,
            OutputDevice, PromptLine, Theme, display_width, execute_commands, ok};

/// Spaces added to the widest cell to get the column width.
pub const COLUMN_GUTTER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// Header line, then the items row-major in a grid below it.
    Grid,
    /// Items side by side after the header, on the same line.
    Inline,
}

/// Draws a [`ListState`] and cleans up after it. The first [`Self::render`] draws the
/// header too, every later one replaces the previous frame.
pub trait FunctionComponent {
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn render(&mut self, state: &ListState, output_device: &OutputDevice)
    -> miette::Result<()>;

    /// Erase what the last render drew below the header.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn clear_viewport(&mut self, output_device: &OutputDevice) -> miette::Result<()>;

    /// Replace the whole view, header included, with one static answer line.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn render_final(&mut self, answer: &str, output_device: &OutputDevice)
    -> miette::Result<()>;

    /// The question was cancelled. Leave the view on screen and move below it.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn leave(&mut self, output_device: &OutputDevice) -> miette::Result<()>;

    /// The answer was rejected. Remove the choices and move below the header.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn discard(&mut self, output_device: &OutputDevice) -> miette::Result<()>;
}

#[allow(missing_debug_implementations)]
pub struct GridComponent<'t> {
    pub theme: &'t Theme,
    pub prompt_line: PromptLine,
    pub header_drawn: bool,
    pub rows_drawn: usize,
}

impl<'t> GridComponent<'t> {
    #[must_use]
    pub fn new(theme: &'t Theme, prompt_line: PromptLine) -> Self {
        Self {
            theme,
            prompt_line,
            header_drawn: false,
            rows_drawn: 0,
        }
    }
}

impl FunctionComponent for GridComponent<'_> {
    fn render(
        &mut self,
        state: &ListState,
        output_device: &OutputDevice,
    ) -> miette::Result<()> {
        if !self.header_drawn {
            execute_commands!(
                output_device,
                CarriageReturn,
                ClearToLineEnd,
                Print(self.prompt_line.render(self.theme)),
                NewLine,
                HideCursor,
            );
            self.header_drawn = true;
        }

        self.clear_viewport(output_device)?;

        let cells = (0..state.len())
            .map(|index| format_cell(self.theme, state, index, ListLayout::Grid))
            .collect::<Vec<_>>();
        let rows = layout_rows(&cells, state.columns, &self.prompt_line.indent);
        for row in &rows {
            execute_commands!(output_device, CarriageReturn, Print(row), ClearToLineEnd, NewLine);
        }
        self.rows_drawn = rows.len();
        ok!()
    }

    fn clear_viewport(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        for _ in 0..self.rows_drawn {
            execute_commands!(output_device, CursorUp, CarriageReturn, ClearToLineEnd);
        }
        self.rows_drawn = 0;
        ok!()
    }

    fn render_final(
        &mut self,
        answer: &str,
        output_device: &OutputDevice,
    ) -> miette::Result<()> {
        self.clear_viewport(output_device)?;
        if self.header_drawn {
            execute_commands!(output_device, CursorUp);
        }
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.prompt_line.render_final(answer)),
            NewLine,
        );
        ok!()
    }

    /// The cursor is already below the last row.
    fn leave(&mut self, _output_device: &OutputDevice) -> miette::Result<()> { ok!() }

    fn discard(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        self.clear_viewport(output_device)
    }
}

#[allow(missing_debug_implementations)]
pub struct InlineComponent<'t> {
    pub theme: &'t Theme,
    pub prompt_line: PromptLine,
}

impl FunctionComponent for InlineComponent<'_> {
    fn render(
        &mut self,
        state: &ListState,
        output_device: &OutputDevice,
    ) -> miette::Result<()> {
        let cells = (0..state.len())
            .map(|index| format_cell(self.theme, state, index, ListLayout::Inline))
            .collect::<Vec<_>>();
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.prompt_line.render(self.theme)),
            Print(cells.join(" ")),
            HideCursor,
        );
        ok!()
    }

    fn clear_viewport(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(output_device, CarriageReturn, ClearToLineEnd);
        ok!()
    }

    fn render_final(
        &mut self,
        answer: &str,
        output_device: &OutputDevice,
    ) -> miette::Result<()> {
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.prompt_line.render_final(answer)),
            NewLine,
        );
        ok!()
    }

    fn leave(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(output_device, NewLine);
        ok!()
    }

    fn discard(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        self.leave(output_device)
    }
}

/// Selection prefix, shortcut number, then the message, styled through the theme's
/// [`crate::ItemFormatter`].
#[must_use]
pub fn format_cell(theme: &Theme, state: &ListState, index: usize, layout: ListLayout) -> String {
    let item = &state.items[index];
    if item.is_separator {
        if item.message.is_empty() {
            return theme.hint(&theme.separator_line);
        }
        return theme.hint(&item.message);
    }

    let mut message = String::new();
    if state.multiple {
        message.push_str(match (layout, item.selected) {
            (ListLayout::Grid, true) => &theme.selected_prefix,
            (ListLayout::Grid, false) => &theme.unselected_prefix,
            (ListLayout::Inline, true) => &theme.inline_selected_prefix,
            (ListLayout::Inline, false) => &theme.inline_unselected_prefix,
        });
    }
    if let Some(number) = state.shortcut_of(index) {
        message.push_str(&format!("{number}. "));
    }
    message.push_str(&item.message);

    let variant =
        DisplayVariant::resolve(index == state.active_index, item.selected, item.disabled);
    match layout {
        ListLayout::Grid => theme.formatter.format(&message, variant),
        ListLayout::Inline => theme.formatter.format_inline(&message, variant),
    }
}

/// Row-major rows of `columns` cells. Every column is as wide as the widest cell (by
/// display width) plus [`COLUMN_GUTTER`]; the last cell of a row is not padded.
#[must_use]
pub fn layout_rows(cells: &[String], columns: usize, indent: &str) -> Vec<String> {
    let column_width = cells
        .iter()
        .map(|cell| display_width(cell))
        .max()
        .unwrap_or_default()
        + COLUMN_GUTTER;

    cells
        .chunks(columns.max(1))
        .map(|row| {
            let mut acc = indent.to_string();
            for (position, cell) in row.iter().enumerate() {
                acc.push_str(cell);
                if position + 1 < row.len() {
                    let padding = column_width - display_width(cell);
                    acc.push_str(&" ".repeat(padding));
                }
            }
            acc
        })
        .collect()
}

/// What the static answer line shows for a finalized list.
#[must_use]
pub fn answer_text(theme: &Theme, state: &ListState, layout: ListLayout) -> String {
    match layout {
        ListLayout::Grid => {
            let messages = state
                .items
                .iter()
                .filter(|item| item.selected)
                .map(|item| item.message.as_str())
                .collect::<Vec<_>>();
            theme.answer(&messages.join(", "))
        }
        ListLayout::Inline => state
            .items
            .iter()
            .filter(|item| !item.is_separator)
            .map(|item| {
                if item.selected {
                    theme.final_selected(&format!(
                        "{}{}",
                        theme.inline_selected_prefix, item.message
                    ))
                } else {
                    theme.final_unselected(&format!(
                        "{}{}",
                        theme.inline_unselected_prefix, item.message
                    ))
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}
