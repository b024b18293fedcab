// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Print;

use super::{ReloadHook, ReloadOutcome, ReloadSpinner, TextBuffer};
use crate::{CarriageReturn, ClearToLineEnd, CursorForward, EngineOutcome, EscapeKind,
            InputDevice, KeyEvent, KeyReader, NewLine, OutputDevice, PromptLine,
            RawModeGuard, ReadKey, Theme, as_u16, control_char, display_width,
            execute_commands, ok};

/// What a key did to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Submit,
    /// Visible content changed, repaint the whole line.
    Repaint,
    /// Only the cursor moved.
    MoveCursor,
    Reload,
    Ignore,
}

/// Single line text input, with an optional mask, and an optional Ctrl-R reload side
/// effect.
///
/// Every content change repaints the whole line: `\r`, `\x1b[K`, prompt, rendered
/// buffer, then the cursor is put back at its absolute column with `\r\x1b[<n>C`.
#[allow(missing_debug_implementations)]
pub struct LineEditor<'t> {
    theme: &'t Theme,
    pub prompt_line: PromptLine,
    pub buffer: TextBuffer,
    original_indicator: String,
    maybe_on_reload: Option<ReloadHook>,
}

impl<'t> LineEditor<'t> {
    #[must_use]
    pub fn new(theme: &'t Theme, prompt_line: PromptLine) -> Self {
        Self {
            theme,
            original_indicator: prompt_line.indicator.clone(),
            prompt_line,
            buffer: TextBuffer::new(theme.max_length),
            maybe_on_reload: None,
        }
    }

    #[must_use]
    pub fn with_initial_text(mut self, text: &str) -> Self {
        self.buffer.set_content(text);
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, mask: Option<char>) -> Self {
        self.buffer.hidden = true;
        self.buffer.mask = mask;
        self
    }

    #[must_use]
    pub fn with_on_reload(mut self, maybe_on_reload: Option<ReloadHook>) -> Self {
        self.maybe_on_reload = maybe_on_reload;
        self
    }
}

impl LineEditor<'_> {
    /// Runs until the line is submitted or the question is cancelled. Raw mode is held
    /// for the duration of the call.
    ///
    /// # Errors
    ///
    /// If reading input or writing to the terminal fails.
    pub async fn run(
        &mut self,
        input_device: &mut InputDevice,
        output_device: &OutputDevice,
    ) -> miette::Result<EngineOutcome<String>> {
        let _guard = RawModeGuard::acquire(input_device, output_device);
        self.render(output_device)?;

        let mut key_reader = KeyReader::new(input_device, self.theme.interrupt_window);
        loop {
            let key = match key_reader.read_key().await? {
                ReadKey::Key(key) => key,
                ReadKey::Cancelled(cancellation) => {
                    tracing::debug!(%cancellation, "line editor cancelled");
                    execute_commands!(output_device, NewLine);
                    return Ok(cancellation.into());
                }
            };

            match self.apply_key(&key) {
                EditAction::Submit => {
                    return Ok(EngineOutcome::Submitted(self.buffer.content()));
                }
                EditAction::Repaint => self.render(output_device)?,
                EditAction::MoveCursor => self.place_cursor(output_device)?,
                EditAction::Reload => self.reload(output_device).await?,
                EditAction::Ignore => {}
            }
        }
    }

    pub fn apply_key(&mut self, key: &KeyEvent) -> EditAction {
        match key {
            it if it.is_enter() => EditAction::Submit,
            it if it.is_backspace() => {
                if self.buffer.delete_before_cursor() {
                    EditAction::Repaint
                } else {
                    EditAction::Ignore
                }
            }
            #[cfg(feature = "emacs")]
            KeyEvent::ControlChar(control_char::CTRL_A) => {
                self.buffer.move_start();
                EditAction::MoveCursor
            }
            #[cfg(feature = "emacs")]
            KeyEvent::ControlChar(control_char::CTRL_E) => {
                self.buffer.move_end();
                EditAction::MoveCursor
            }
            KeyEvent::ControlChar(control_char::CTRL_R) if self.maybe_on_reload.is_some() => {
                EditAction::Reload
            }
            KeyEvent::EscapeSequence(kind) => {
                match kind {
                    EscapeKind::Left => self.buffer.move_left(),
                    EscapeKind::Right => self.buffer.move_right(),
                    EscapeKind::WordLeft => self.buffer.move_word_left(),
                    EscapeKind::WordRight => self.buffer.move_word_right(),
                    EscapeKind::Up | EscapeKind::Down | EscapeKind::Unknown => {
                        return EditAction::Ignore;
                    }
                }
                EditAction::MoveCursor
            }
            KeyEvent::PrintableRun(text) => {
                if self.buffer.insert_run(text) > 0 {
                    EditAction::Repaint
                } else {
                    EditAction::Ignore
                }
            }
            KeyEvent::ControlChar(_) => EditAction::Ignore,
        }
    }

    /// Replace the interactive line with the static answer line.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn finish(&self, output_device: &OutputDevice, answer: &str) -> miette::Result<()> {
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.prompt_line.render_final(answer)),
            NewLine,
        );
        ok!()
    }

    /// Leave the rejected line as typed and move below it.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn discard(&self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(output_device, NewLine);
        ok!()
    }

    fn cursor_column(&self) -> usize {
        display_width(&self.prompt_line.render(self.theme))
            + self.buffer.rendered_width_before_cursor()
    }

    fn render(&self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(
            output_device,
            CarriageReturn,
            ClearToLineEnd,
            Print(self.prompt_line.render(self.theme)),
            Print(self.buffer.rendered()),
            CarriageReturn,
            CursorForward(as_u16(self.cursor_column())),
        );
        ok!()
    }

    fn place_cursor(&self, output_device: &OutputDevice) -> miette::Result<()> {
        execute_commands!(
            output_device,
            CarriageReturn,
            CursorForward(as_u16(self.cursor_column())),
        );
        ok!()
    }

    /// Key handling (and reading) is suspended until the side effect settles and the
    /// final glyph is painted.
    async fn reload(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        let Some(on_reload) = self.maybe_on_reload.clone() else {
            return ok!();
        };

        let spinner = ReloadSpinner {
            output_device: output_device.clone(),
            frames: self.theme.spinner_frames.clone(),
            tick_delay: self.theme.spinner_tick,
            indicator_column: self.prompt_line.indicator_column(),
            cursor_column: self.cursor_column(),
        };
        let outcome = spinner
            .spin_until_settled(on_reload(self.buffer.content()))
            .await?;
        tracing::debug!(%outcome, "reload settled");

        self.prompt_line.indicator = match outcome {
            ReloadOutcome::Success => self.theme.success_glyph.clone(),
            ReloadOutcome::Failure => self.theme.failure_glyph.clone(),
            ReloadOutcome::NoOpinion => self.original_indicator.clone(),
        };
        self.render(output_device)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use futures_util::future::BoxFuture;
    use pretty_assertions::assert_eq;
    use r3bl_test_fixtures::{StdoutMock, gen_input_stream_with_delays};
    use test_case::test_case;

    use super::*;
    use crate::{ByteChunk, ByteChunkResult};

    fn new_output() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        (OutputDevice::new_mock(stdout_mock.clone()), stdout_mock)
    }

    fn press(editor: &mut LineEditor<'_>, keys: &[KeyEvent]) {
        for key in keys {
            editor.apply_key(key);
        }
    }

    fn text(it: &str) -> KeyEvent { KeyEvent::PrintableRun(it.into()) }

    #[test]
    fn test_apply_key_edits() {
        let theme = Theme::plain();
        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));

        press(&mut editor, &[text("hello world")]);
        assert_eq!(
            editor.apply_key(&KeyEvent::EscapeSequence(EscapeKind::WordLeft)),
            EditAction::MoveCursor
        );
        assert_eq!(editor.buffer.cursor(), 6);
        assert_eq!(editor.apply_key(&KeyEvent::ControlChar(0x7F)), EditAction::Repaint);
        assert_eq!(editor.buffer.content(), "helloworld");
        assert_eq!(
            editor.apply_key(&KeyEvent::EscapeSequence(EscapeKind::Up)),
            EditAction::Ignore
        );
        assert_eq!(editor.apply_key(&KeyEvent::ControlChar(0x0D)), EditAction::Submit);
    }

    #[cfg(feature = "emacs")]
    #[test]
    fn test_emacs_motions() {
        let theme = Theme::plain();
        let mut editor =
            LineEditor::new(&theme, PromptLine::new(&theme, "Name")).with_initial_text("abc");

        assert_eq!(editor.apply_key(&KeyEvent::ControlChar(0x01)), EditAction::MoveCursor);
        assert_eq!(editor.buffer.cursor(), 0);
        assert_eq!(editor.apply_key(&KeyEvent::ControlChar(0x05)), EditAction::MoveCursor);
        assert_eq!(editor.buffer.cursor(), 3);
    }

    #[test]
    fn test_ctrl_r_without_hook_is_ignored() {
        let theme = Theme::plain();
        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));
        assert_eq!(editor.apply_key(&KeyEvent::ControlChar(0x12)), EditAction::Ignore);
    }

    #[tokio::test]
    async fn test_masked_input_renders_mask_only() {
        let theme = Theme::plain();
        let (output_device, stdout_mock) = new_output();
        let mut input_device =
            InputDevice::new_mock_from_chunks(vec!["a", "b", "\x7f", "c", "\r"]);

        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Password"))
            .with_hidden(Some('•'));
        let outcome = editor.run(&mut input_device, &output_device).await.unwrap();

        assert_eq!(outcome, EngineOutcome::Submitted("ac".to_string()));
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(!output.contains("ac"));
        assert!(output.ends_with("\r\x1b[K  ? Password: ••\r\x1b[16C\x1b[?25h"));
        assert!(!input_device.raw_mode.is_raw());
    }

    #[tokio::test]
    async fn test_full_line_repaint_sequence() {
        let theme = Theme::plain();
        let (output_device, stdout_mock) = new_output();
        let mut input_device = InputDevice::new_mock_from_chunks(vec!["hi", "\x1b[D", "\r"]);

        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));
        let outcome = editor.run(&mut input_device, &output_device).await.unwrap();
        assert_eq!(outcome, EngineOutcome::Submitted("hi".to_string()));

        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            [
                "\r\x1b[K  ? Name: \r\x1b[10C",
                "\r\x1b[K  ? Name: hi\r\x1b[12C",
                "\r\x1b[11C",
                "\x1b[?25h",
            ]
            .concat()
        );
    }

    #[tokio::test]
    async fn test_cancellations() {
        let theme = Theme::plain();
        for (chunks, expected) in [
            (vec!["ab", "\x1b"], EngineOutcome::Interrupted),
            (vec!["ab", ""], EngineOutcome::EndOfStream),
            (vec!["ab", "\x04"], EngineOutcome::EndOfStream),
            (vec!["ab"], EngineOutcome::EndOfStream),
        ] {
            let (output_device, stdout_mock) = new_output();
            let mut input_device = InputDevice::new_mock_from_chunks(chunks);
            let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));
            let outcome = editor.run(&mut input_device, &output_device).await.unwrap();

            assert_eq!(outcome, expected);
            assert!(!input_device.raw_mode.is_raw());
            assert!(stdout_mock.get_copy_of_buffer_as_string().ends_with("\n\x1b[?25h"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_ctrl_c_is_forced_termination() {
        let theme = Theme::plain();
        let (output_device, _stdout_mock) = new_output();
        let it = gen_input_stream_with_delays(vec![
            (Duration::ZERO, ByteChunkResult::Ok(ByteChunk::from_slice(b"\x03"))),
            (Duration::from_millis(100), ByteChunkResult::Ok(ByteChunk::from_slice(b"\x03"))),
        ]);
        let mut input_device = InputDevice::new_mock(it);

        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));
        let outcome = editor.run(&mut input_device, &output_device).await.unwrap();
        assert_eq!(outcome, EngineOutcome::ForcedTermination);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_spins_then_paints_final_glyph() {
        let theme = Theme::plain();
        let (output_device, stdout_mock) = new_output();
        let mut input_device = InputDevice::new_mock_from_chunks(vec!["q", "\x12", "\r"]);

        let seen = Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
        let seen_clone = seen.clone();
        let on_reload: ReloadHook = Arc::new(move |text: String| -> BoxFuture<'static, ReloadOutcome> {
            seen_clone.lock().unwrap().push(text);
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                ReloadOutcome::Success
            })
        });

        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Query"))
            .with_on_reload(Some(on_reload));
        let outcome = editor.run(&mut input_device, &output_device).await.unwrap();

        assert_eq!(outcome, EngineOutcome::Submitted("q".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec!["q".to_string()]);
        assert_eq!(editor.prompt_line.indicator, "✔");

        let output = stdout_mock.get_copy_of_buffer_as_string();
        let first_frame = format!("\r\x1b[2C{}\r\x1b[12C", theme.spinner_frames[0]);
        let second_frame = format!("\r\x1b[2C{}\r\x1b[12C", theme.spinner_frames[1]);
        let final_line = "\r\x1b[K  ✔ Query: q\r\x1b[12C";
        let first_frame_at = output.find(&first_frame).unwrap();
        let second_frame_at = output.find(&second_frame).unwrap();
        let final_line_at = output.find(final_line).unwrap();
        assert!(first_frame_at < second_frame_at);
        assert!(second_frame_at < final_line_at);
        assert!(!output[final_line_at..].contains(&theme.spinner_frames[2]));
    }

    #[test_case(ReloadOutcome::Success, "✔" ; "success")]
    #[test_case(ReloadOutcome::Failure, "✖" ; "failure")]
    #[test_case(ReloadOutcome::NoOpinion, "?" ; "no opinion keeps the indicator")]
    #[tokio::test(start_paused = true)]
    async fn test_reload_outcome_sets_indicator(outcome: ReloadOutcome, expected: &str) {
        let theme = Theme::plain();
        let (output_device, stdout_mock) = new_output();
        let mut input_device = InputDevice::new_mock_from_chunks(vec!["q", "\x12", "\r"]);

        let on_reload: ReloadHook = Arc::new(move |_text: String| -> BoxFuture<'static, ReloadOutcome> {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                outcome
            })
        });
        let mut editor = LineEditor::new(&theme, PromptLine::new(&theme, "Query"))
            .with_on_reload(Some(on_reload));
        let result = editor.run(&mut input_device, &output_device).await.unwrap();

        assert_eq!(result, EngineOutcome::Submitted("q".to_string()));
        assert_eq!(editor.prompt_line.indicator, expected);
        let last_repaint = format!("\r\x1b[K  {expected} Query: q\r\x1b[12C");
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .ends_with(&last_repaint)
        );
    }

    #[tokio::test]
    async fn test_finish_writes_answer_line() {
        let theme = Theme::plain();
        let (output_device, stdout_mock) = new_output();
        let editor = LineEditor::new(&theme, PromptLine::new(&theme, "Name"));
        editor.finish(&output_device, "Ada").unwrap();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\r\x1b[K  ? Name: Ada\n"
        );
    }
}
