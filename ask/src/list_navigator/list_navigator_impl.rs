// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

use super::{FunctionComponent, GridComponent, InlineComponent, ListLayout, ListState,
            answer_text};
use crate::{EngineOutcome, EscapeKind, EventLoopResult, InputDevice, KeyEvent, KeyReader,
            OutputDevice, PromptLine, RawModeGuard, ReadKey, Theme};

/// Select, checkbox and inline checkbox questions. Submits the selected values, which
/// can be empty.
#[allow(missing_debug_implementations)]
pub struct ListNavigator<'t> {
    theme: &'t Theme,
    pub state: ListState,
    pub layout: ListLayout,
    component: Box<dyn FunctionComponent + 't>,
}

impl<'t> ListNavigator<'t> {
    #[must_use]
    pub fn new(
        theme: &'t Theme,
        prompt_line: PromptLine,
        state: ListState,
        layout: ListLayout,
    ) -> Self {
        let component: Box<dyn FunctionComponent + 't> = match layout {
            ListLayout::Grid => Box::new(GridComponent::new(theme, prompt_line)),
            ListLayout::Inline => Box::new(InlineComponent { theme, prompt_line }),
        };
        Self {
            theme,
            state,
            layout,
            component,
        }
    }
}

impl ListNavigator<'_> {
    /// # Errors
    ///
    /// If reading input or writing to the terminal fails.
    pub async fn run(
        &mut self,
        input_device: &mut InputDevice,
        output_device: &OutputDevice,
    ) -> miette::Result<EngineOutcome<Vec<Value>>> {
        let _guard = RawModeGuard::acquire(input_device, output_device);

        // First render before waiting for input.
        self.component.render(&self.state, output_device)?;

        let mut key_reader = KeyReader::new(input_device, self.theme.interrupt_window);
        loop {
            let key = match key_reader.read_key().await? {
                ReadKey::Key(key) => key,
                ReadKey::Cancelled(cancellation) => {
                    tracing::debug!(%cancellation, "list cancelled");
                    self.component.leave(output_device)?;
                    return Ok(cancellation.into());
                }
            };

            match list_keypress_handler(&mut self.state, &key) {
                // The final frame stays on screen until finish or discard.
                EventLoopResult::ExitWithResult(values) => {
                    return Ok(EngineOutcome::Submitted(values));
                }
                EventLoopResult::ContinueAndRerender => {
                    self.component.render(&self.state, output_device)?;
                }
                EventLoopResult::Continue => {}
            }
        }
    }

    #[must_use]
    pub fn answer_text(&self) -> String { answer_text(self.theme, &self.state, self.layout) }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn finish(&mut self, output_device: &OutputDevice, answer: &str) -> miette::Result<()> {
        self.component.render_final(answer, output_device)
    }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn discard(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        self.component.discard(output_device)
    }
}

/// Applies one key to the list. Every key mutates the state at most once.
pub fn list_keypress_handler(
    state: &mut ListState,
    key: &KeyEvent,
) -> EventLoopResult<Vec<Value>> {
    if key.is_enter() {
        return EventLoopResult::ExitWithResult(state.finalize());
    }

    if key.is_space() {
        if !state.multiple {
            return EventLoopResult::Continue;
        }
        state.toggle_selected();
        return EventLoopResult::ContinueAndRerender;
    }

    if let Some(number) = key.as_shortcut_digit() {
        return match state.apply_shortcut(number) {
            Some(values) => EventLoopResult::ExitWithResult(values),
            None => EventLoopResult::Continue,
        };
    }

    let KeyEvent::EscapeSequence(kind) = key else {
        return EventLoopResult::Continue;
    };
    let before = state.active_index;
    match kind {
        EscapeKind::Up => state.move_up(),
        EscapeKind::Down => state.move_down(),
        EscapeKind::Left => state.move_left(),
        EscapeKind::Right => state.move_right(),
        EscapeKind::WordLeft | EscapeKind::WordRight | EscapeKind::Unknown => {}
    }
    if state.active_index == before {
        EventLoopResult::Continue
    } else {
        EventLoopResult::ContinueAndRerender
    }
}
