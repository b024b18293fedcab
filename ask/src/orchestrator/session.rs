// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashSet;

use crossterm::style::Print;
use serde_json::Value;

use super::{ActiveEngine, AnswerValue, Answers, AskError, Question, QuestionKind,
            SessionOutcome};
use crate::{CarriageReturn, ClearToLineEnd, EngineOutcome, InputDevice, NewLine,
            OutputDevice, PromptLine, Theme, YesNoEngine, execute_commands};

/// Asks questions in order over one input and one output device.
///
/// ```no_run
/// use r3bl_ask::{Ask, Choice, Question, SessionOutcome, Theme};
///
/// # async fn run() -> Result<(), r3bl_ask::AskError> {
/// let mut ask = Ask::new_terminal(Theme::default());
/// let outcome = ask
///     .prompt(&[
///         Question::input("name").message("What is your name?"),
///         Question::select("fruit", vec![Choice::from_message("kiwi")]),
///     ])
///     .await?;
/// if let SessionOutcome::Completed(answers) = outcome {
///     println!("{}", answers.to_json());
/// }
/// # Ok(())
/// # }
/// ```
#[allow(missing_debug_implementations)]
pub struct Ask {
    pub input_device: InputDevice,
    pub output_device: OutputDevice,
    pub theme: Theme,
}

/// How one question ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
enum QuestionOutcome {
    Answered(AnswerValue),
    /// Attempts used up and the give-up hook let the session go on.
    GaveUp,
    Abandoned,
}

impl Ask {
    #[must_use]
    pub fn new(input_device: InputDevice, output_device: OutputDevice, theme: Theme) -> Self {
        Self {
            input_device,
            output_device,
            theme,
        }
    }

    /// Stdin and stdout.
    #[must_use]
    pub fn new_terminal(theme: Theme) -> Self {
        Self::new(InputDevice::new_stdin(), OutputDevice::new_stdout(), theme)
    }

    /// Asks every question in order. Any cancellation ends the whole session, a
    /// rejected answer only repeats its own question.
    ///
    /// # Errors
    ///
    /// - [`AskError::DuplicateQuestionName`] before anything is asked.
    /// - [`AskError::SessionAborted`] when input ends and the user confirms the exit.
    /// - [`AskError::ForcedTermination`] on a double Ctrl-C.
    /// - [`AskError::ValidationExhausted`] or whatever a give-up hook returns.
    /// - [`AskError::TerminalIo`] if the terminal can't be read or written.
    pub async fn prompt(&mut self, questions: &[Question]) -> Result<SessionOutcome, AskError> {
        let mut seen = HashSet::new();
        if let Some(question) = questions.iter().find(|it| !seen.insert(it.name.as_str())) {
            return Err(AskError::DuplicateQuestionName {
                name: question.name.clone(),
            });
        }

        let mut answers = Answers::default();
        for question in questions {
            match self.ask_question(question).await? {
                QuestionOutcome::Answered(value) => answers.insert(&question.name, value),
                QuestionOutcome::GaveUp => {}
                QuestionOutcome::Abandoned => {
                    tracing::debug!(name = %question.name, "session abandoned");
                    return Ok(SessionOutcome::Abandoned);
                }
            }
        }
        Ok(SessionOutcome::Completed(answers))
    }

    /// A session of one question. `None` when it was abandoned or given up on.
    ///
    /// # Errors
    ///
    /// Same as [`Self::prompt`].
    pub async fn ask(&mut self, question: Question) -> Result<Option<AnswerValue>, AskError> {
        let outcome = self.prompt(std::slice::from_ref(&question)).await?;
        Ok(outcome
            .answers()
            .and_then(|answers| answers.get(&question.name).cloned()))
    }

    /// Asks one question and converts its answer with `convert`. Fails before any I/O
    /// when the question is not of a kind that `is_kind` accepts.
    async fn ask_typed<T>(
        &mut self,
        question: Question,
        expected: &'static str,
        is_kind: fn(&QuestionKind) -> bool,
        convert: fn(AnswerValue) -> Option<T>,
    ) -> Result<Option<T>, AskError> {
        let name = question.name.clone();
        let mismatch = || AskError::AnswerTypeMismatch {
            name: name.clone(),
            expected,
        };
        if !is_kind(&question.kind) {
            return Err(mismatch());
        }
        match self.ask(question).await? {
            // A default of another type can still slip through.
            Some(value) => convert(value).map(Some).ok_or_else(mismatch),
            None => Ok(None),
        }
    }

    async fn ask_question(&mut self, question: &Question) -> Result<QuestionOutcome, AskError> {
        let Self {
            input_device,
            output_device,
            theme,
        } = self;
        let mut attempts = 0;

        loop {
            for _ in 0..theme.pre_new_line {
                execute_commands!(output_device, NewLine);
            }

            let mut engine = ActiveEngine::new(theme, question);
            let raw = match engine.run(input_device, output_device).await? {
                EngineOutcome::Submitted(raw) => raw,
                EngineOutcome::Interrupted => return Ok(QuestionOutcome::Abandoned),
                EngineOutcome::EndOfStream => {
                    if confirm_exit(theme, input_device, output_device).await? {
                        return Err(AskError::SessionAborted);
                    }
                    // Ask again from scratch.
                    continue;
                }
                EngineOutcome::ForcedTermination => return Err(AskError::ForcedTermination),
            };

            let (rejected, message) = match question.to_answer(raw, theme) {
                Ok(value) => match question.check(&value, theme).await {
                    Ok(()) => {
                        let answer = engine.answer_text(theme, &value);
                        engine.finish(output_device, &answer)?;
                        tracing::debug!(name = %question.name, ?value, "answered");
                        return Ok(QuestionOutcome::Answered(value));
                    }
                    Err(message) => (Some(value), message),
                },
                Err(message) => (None, message),
            };

            engine.discard(output_device)?;
            execute_commands!(
                output_device,
                CarriageReturn,
                ClearToLineEnd,
                Print(theme.error_line(&message)),
                NewLine,
            );

            attempts += 1;
            tracing::debug!(name = %question.name, attempts, %message, "answer rejected");
            if question.max_attempts.is_some_and(|max| attempts >= max) {
                match &question.maybe_on_exceeded_attempts {
                    Some(hook) => hook(&question.name, rejected.as_ref())?,
                    None => {
                        return Err(AskError::ValidationExhausted {
                            name: question.name.clone(),
                        });
                    }
                }
                return Ok(QuestionOutcome::GaveUp);
            }
        }
    }
}

/// One question at a time, with the answer as a plain Rust value. `None` means the
/// session was abandoned or the give-up hook let it go on. Each helper fails with
/// [`AskError::AnswerTypeMismatch`] when handed a question of another kind.
impl Ask {
    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_input(&mut self, question: Question) -> Result<Option<String>, AskError> {
        self.ask_typed(
            question,
            "text",
            |kind| matches!(kind, QuestionKind::Input),
            AnswerValue::into_text,
        )
        .await
    }

    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_password(&mut self, question: Question) -> Result<Option<String>, AskError> {
        self.ask_typed(
            question,
            "password",
            |kind| matches!(kind, QuestionKind::Password { .. }),
            AnswerValue::into_text,
        )
        .await
    }

    /// Integer and float questions alike.
    ///
    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_number(&mut self, question: Question) -> Result<Option<f64>, AskError> {
        self.ask_typed(
            question,
            "number",
            |kind| matches!(kind, QuestionKind::Number { .. }),
            |value| value.as_f64(),
        )
        .await
    }

    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_confirm(&mut self, question: Question) -> Result<Option<bool>, AskError> {
        self.ask_typed(
            question,
            "yes/no",
            |kind| matches!(kind, QuestionKind::Confirm { .. }),
            |value| value.as_bool(),
        )
        .await
    }

    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_select(&mut self, question: Question) -> Result<Option<Value>, AskError> {
        self.ask_typed(
            question,
            "single choice",
            |kind| matches!(kind, QuestionKind::Select { .. }),
            AnswerValue::into_choice,
        )
        .await
    }

    /// Grid and inline checkboxes alike.
    ///
    /// # Errors
    ///
    /// Same as [`Self::prompt`], or a mismatched question kind.
    pub async fn ask_checkbox(
        &mut self,
        question: Question,
    ) -> Result<Option<Vec<Value>>, AskError> {
        self.ask_typed(
            question,
            "multiple choice",
            |kind| {
                matches!(
                    kind,
                    QuestionKind::Checkbox { .. } | QuestionKind::InlineCheckbox { .. }
                )
            },
            AnswerValue::into_choices,
        )
        .await
    }
}

/// Asks whether to exit after input ended. Anything but an explicit "no" means yes.
async fn confirm_exit(
    theme: &Theme,
    input_device: &mut InputDevice,
    output_device: &OutputDevice,
) -> Result<bool, AskError> {
    let prompt_line = PromptLine::new(theme, theme.exit_confirmation_message.clone());
    let mut engine = YesNoEngine::new(theme, prompt_line, Some(true));
    match engine.run(input_device, output_device).await? {
        EngineOutcome::Submitted(value) => {
            engine.finish(output_device, &engine.answer_text(value))?;
            Ok(value)
        }
        EngineOutcome::Interrupted | EngineOutcome::EndOfStream => Ok(true),
        EngineOutcome::ForcedTermination => Err(AskError::ForcedTermination),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures_util::FutureExt;
    use pretty_assertions::assert_eq;
    use r3bl_test_fixtures::StdoutMock;
    use serde_json::json;

    use super::*;
    use crate::Choice;

    fn new_ask(chunks: Vec<&'static str>) -> (Ask, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let ask = Ask::new(
            InputDevice::new_mock_from_chunks(chunks),
            OutputDevice::new_mock(stdout_mock.clone()),
            Theme::plain(),
        );
        (ask, stdout_mock)
    }

    #[tokio::test]
    async fn test_duplicate_names_are_rejected_before_any_io() {
        let (mut ask, stdout_mock) = new_ask(vec![]);
        let result = ask
            .prompt(&[Question::input("a"), Question::confirm("a")])
            .await;
        assert!(matches!(
            result,
            Err(AskError::DuplicateQuestionName { name }) if name == "a"
        ));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
    }

    #[tokio::test]
    async fn test_rejected_answer_is_asked_again() {
        let (mut ask, stdout_mock) = new_ask(vec!["x", "\r", "42", "\r"]);
        let answer = ask.ask(Question::number("age")).await.unwrap();
        assert_eq!(answer, Some(AnswerValue::Integer(42)));
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .contains(">> Invalid answer, please try again.\n")
        );
    }

    #[tokio::test]
    async fn test_default_hook_fails_the_session() {
        let (mut ask, _stdout_mock) = new_ask(vec!["\r", "\r"]);
        let question = Question::input("name")
            .validate(|_| async { Ok(false) }.boxed())
            .max_attempts(2);
        let result = ask.ask(question).await;
        assert!(matches!(
            result,
            Err(AskError::ValidationExhausted { name }) if name == "name"
        ));
    }

    #[tokio::test]
    async fn test_custom_hook_leaves_slot_unset() {
        let (mut ask, _stdout_mock) = new_ask(vec!["\r", "y", "\r"]);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let outcome = ask
            .prompt(&[
                Question::input("name")
                    .validate(|_| async { Ok(false) }.boxed())
                    .max_attempts(1)
                    .on_exceeded_attempts(move |name, _last| {
                        calls_clone.lock().unwrap().push(name.to_string());
                        Ok(())
                    }),
                Question::confirm("sure"),
            ])
            .await
            .unwrap();

        let answers = outcome.answers().unwrap();
        assert_eq!(answers.get("name"), None);
        assert_eq!(answers.get("sure"), Some(&AnswerValue::Bool(true)));
        assert_eq!(*calls.lock().unwrap(), vec!["name".to_string()]);
    }

    #[tokio::test]
    async fn test_out_of_range_number_shows_range() {
        let (mut ask, stdout_mock) = new_ask(vec!["12", "\r", "3", "\r"]);
        let answer = ask
            .ask(Question::number("n").min(1.0).max(5.0))
            .await
            .unwrap();
        assert_eq!(answer, Some(AnswerValue::Integer(3)));
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .contains(">> The number must be 1-5\n")
        );
    }

    #[tokio::test]
    async fn test_hook_receives_last_rejected_value() {
        let (mut ask, _stdout_mock) = new_ask(vec!["7", "\r", "x", "\r", "9", "\r"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let question = Question::number("n")
            .validate(|value| {
                let even = value.as_f64().is_some_and(|it| it % 2.0 == 0.0);
                async move { Ok(even) }.boxed()
            })
            .max_attempts(3)
            .on_exceeded_attempts(move |name, last| {
                seen_clone
                    .lock()
                    .unwrap()
                    .push((name.to_string(), last.cloned()));
                Ok(())
            });

        let answer = ask.ask(question).await.unwrap();
        assert_eq!(answer, None);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("n".to_string(), Some(AnswerValue::Integer(9)))]
        );
    }

    #[tokio::test]
    async fn test_hook_gets_none_when_last_text_did_not_parse() {
        let (mut ask, _stdout_mock) = new_ask(vec!["7", "\r", "x", "\r"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let question = Question::number("n")
            .validate(|_| async { Ok(false) }.boxed())
            .max_attempts(2)
            .on_exceeded_attempts(move |_name, last| {
                seen_clone.lock().unwrap().push(last.cloned());
                Err(AskError::ValidationExhausted {
                    name: "custom".into(),
                })
            });

        let result = ask.ask(question).await;
        assert!(matches!(
            result,
            Err(AskError::ValidationExhausted { name }) if name == "custom"
        ));
        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_typed_helpers_return_plain_values() {
        let (mut ask, _stdout_mock) = new_ask(vec![
            "Ada\r", "pw\r", "4.5\r", "n", "\r", "\x1b[B\r", " \x1b[B \r",
        ]);
        let fruits = || vec![Choice::new("kiwi", 1), Choice::new("fig", 2)];

        assert_eq!(
            ask.ask_input(Question::input("name")).await.unwrap(),
            Some("Ada".to_string())
        );
        assert_eq!(
            ask.ask_password(Question::password("secret")).await.unwrap(),
            Some("pw".to_string())
        );
        assert_eq!(
            ask.ask_number(Question::number("n").float()).await.unwrap(),
            Some(4.5)
        );
        assert_eq!(ask.ask_confirm(Question::confirm("sure")).await.unwrap(), Some(false));
        assert_eq!(
            ask.ask_select(Question::select("fruit", fruits())).await.unwrap(),
            Some(json!(2))
        );
        assert_eq!(
            ask.ask_checkbox(Question::checkbox("fruits", fruits()))
                .await
                .unwrap(),
            Some(vec![json!(1), json!(2)])
        );
    }

    #[tokio::test]
    async fn test_typed_helper_rejects_other_kind_before_any_io() {
        let (mut ask, stdout_mock) = new_ask(vec!["y\r"]);
        let result = ask.ask_confirm(Question::input("name")).await;
        assert!(matches!(
            result,
            Err(AskError::AnswerTypeMismatch { name, expected: "yes/no" }) if name == "name"
        ));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
        assert!(ask.ask_confirm(Question::confirm("sure")).await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_typed_helper_abandoned_is_none() {
        let (mut ask, _stdout_mock) = new_ask(vec!["\x1b"]);
        assert_eq!(ask.ask_number(Question::number("n")).await.unwrap(), None);
    }
}
