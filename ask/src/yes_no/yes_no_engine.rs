// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Print;

use crate::{CarriageReturn, ClearToLineEnd, EngineOutcome, EventLoopResult, InputDevice,
            KeyEvent, KeyReader, NewLine, OutputDevice, PromptLine, RawModeGuard, ReadKey,
            Theme, execute_commands, ok};

pub const DEFAULT_ACCEPT: &str = "yY1tT";
pub const DEFAULT_DENY: &str = "nN0fF";
pub const DEFAULT_ACCEPT_DISPLAY: &str = "Yes";
pub const DEFAULT_DENY_DISPLAY: &str = "No";

/// Single keystroke yes/no. There is no text buffer, only the current value, which is
/// undecided until an accept or deny key is typed.
#[allow(missing_debug_implementations)]
pub struct YesNoEngine<'t> {
    theme: &'t Theme,
    prompt_line: PromptLine,
    pub accept: String,
    pub deny: String,
    pub accept_display: String,
    pub deny_display: String,
    pub default: Option<bool>,
    pub current_value: Option<bool>,
}

impl<'t> YesNoEngine<'t> {
    #[must_use]
    pub fn new(theme: &'t Theme, prompt_line: PromptLine, default: Option<bool>) -> Self {
        Self {
            theme,
            prompt_line,
            accept: DEFAULT_ACCEPT.to_string(),
            deny: DEFAULT_DENY.to_string(),
            accept_display: DEFAULT_ACCEPT_DISPLAY.to_string(),
            deny_display: DEFAULT_DENY_DISPLAY.to_string(),
            default,
            current_value: None,
        }
    }

    /// Empty sets keep the defaults.
    #[must_use]
    pub fn with_keys(mut self, accept: &str, deny: &str) -> Self {
        if !accept.is_empty() {
            self.accept = accept.to_string();
        }
        if !deny.is_empty() {
            self.deny = deny.to_string();
        }
        self
    }

    #[must_use]
    pub fn with_displays(
        mut self,
        accept_display: impl Into<String>,
        deny_display: impl Into<String>,
    ) -> Self {
        self.accept_display = accept_display.into();
        self.deny_display = deny_display.into();
        self
    }
}

impl YesNoEngine<'_> {
    /// # Errors
    ///
    /// If reading input or writing to the terminal fails.
    pub async fn run(
        &mut self,
        input_device: &mut InputDevice,
        output_device: &OutputDevice,
    ) -> miette::Result<EngineOutcome<bool>> {
        let _guard = RawModeGuard::acquire(input_device, output_device);
        self.render(output_device)?;

        let mut key_reader = KeyReader::new(input_device, self.theme.interrupt_window);
        loop {
            let key = match key_reader.read_key().await? {
                ReadKey::Key(key) => key,
                ReadKey::Cancelled(cancellation) => {
                    tracing::debug!(%cancellation, "yes/no cancelled");
                    execute_commands!(output_device, NewLine);
                    return Ok(cancellation.into());
                }
            };

            match self.apply_key(&key) {
                EventLoopResult::ExitWithResult(value) => {
                    self.render(output_device)?;
                    return Ok(EngineOutcome::Submitted(value));
                }
                EventLoopResult::ContinueAndRerender => self.render(output_device)?,
                EventLoopResult::Continue => {}
            }
        }
    }

    /// Enter with an undecided value falls back to the default, which is painted first
    /// so the line shows what was chosen. Without a default, that enter is ignored.
    pub fn apply_key(&mut self, key: &KeyEvent) -> EventLoopResult<bool> {
        if key.is_enter() {
            return match (self.current_value, self.default) {
                (Some(value), _) => EventLoopResult::ExitWithResult(value),
                (None, Some(default)) => {
                    self.current_value = Some(default);
                    EventLoopResult::ExitWithResult(default)
                }
                (None, None) => EventLoopResult::Continue,
            };
        }

        if key.is_backspace() {
            let changed = self.current_value.is_some();
            self.current_value = None;
            return if changed {
                EventLoopResult::ContinueAndRerender
            } else {
                EventLoopResult::Continue
            };
        }

        let KeyEvent::PrintableRun(text) = key else {
            return EventLoopResult::Continue;
        };
        let maybe_value = text.chars().rev().find_map(|ch| {
            if self.accept.contains(ch) {
                Some(true)
            } else if self.deny.contains(ch) {
                Some(false)
            } else {
                None
            }
        });
        match maybe_value {
            Some(value) if self.current_value != Some(value) => {
                self.current_value = Some(value);
                EventLoopResult::ContinueAndRerender
            }
            _ => EventLoopResult::Continue,
        }
    }

    /// `[y/n]`, from the first key of each set.
    #[must_use]
    pub fn key_hint(&self) -> String {
        let first = |keys: &str| keys.chars().next().map(String::from).unwrap_or_default();
        format!("[{}/{}]", first(&self.accept), first(&self.deny))
    }

    #[must_use]
    pub fn answer_text(&self, value: bool) -> String {
        if value {
            self.theme.yes(&self.accept_display)
        } else {
            self.theme.no(&self.deny_display)
        }
    }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn finish(&self, output_device: &OutputDevice, answer: &str) -> miette::Result<()> {
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.header().render_final(answer)),
            NewLine,
        );
        ok!()
    }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn discard(&self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(output_device, NewLine);
        ok!()
    }

    fn header(&self) -> PromptLine {
        PromptLine {
            suffix: format!(
                " {}{}",
                self.theme.hint(&self.key_hint()),
                self.prompt_line.suffix
            ),
            ..self.prompt_line.clone()
        }
    }

    fn render(&self, output_device: &OutputDevice) -> miette::Result<()> {
        let current = self
            .current_value
            .map(|value| self.answer_text(value))
            .unwrap_or_default();
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.header().render(self.theme)),
            Print(current),
        );
        ok!()
    }
}
