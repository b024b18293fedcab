// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Ways a session ends with an error. Abandoning a session with `ESC` is not an error,
/// see [`crate::SessionOutcome::Abandoned`].
///
/// | Variant                   | Cause                                                  |
/// |---------------------------|--------------------------------------------------------|
/// | [`SessionAborted`]        | Input ended and the user confirmed they want to exit   |
/// | [`ForcedTermination`]     | Ctrl-C pressed twice inside the interrupt window        |
/// | [`ValidationExhausted`]   | Default give-up hook after too many rejected answers   |
/// | [`DuplicateQuestionName`] | Two questions share a name, nothing was asked          |
/// | [`AnswerTypeMismatch`]    | A typed `ask_*` helper got a question of another kind  |
/// | [`TerminalIo`]            | Reading from or writing to the terminal failed         |
///
/// [`SessionAborted`]: Self::SessionAborted
/// [`ForcedTermination`]: Self::ForcedTermination
/// [`ValidationExhausted`]: Self::ValidationExhausted
/// [`DuplicateQuestionName`]: Self::DuplicateQuestionName
/// [`AnswerTypeMismatch`]: Self::AnswerTypeMismatch
/// [`TerminalIo`]: Self::TerminalIo
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AskError {
    #[error("Session aborted by user")]
    #[diagnostic(code(r3bl_ask::session_aborted))]
    SessionAborted,

    #[error("Terminated by user")]
    #[diagnostic(code(r3bl_ask::forced_termination))]
    ForcedTermination,

    #[error("Maximum attempts exceeded.")]
    #[diagnostic(
        code(r3bl_ask::validation_exhausted),
        help("Question '{name}' was answered with an invalid value too many times")
    )]
    ValidationExhausted { name: String },

    #[error("Question name '{name}' is used more than once")]
    #[diagnostic(
        code(r3bl_ask::duplicate_question_name),
        help("Answers are keyed by question name, so every name must be unique")
    )]
    DuplicateQuestionName { name: String },

    #[error("Question '{name}' does not give a {expected} answer")]
    #[diagnostic(
        code(r3bl_ask::answer_type_mismatch),
        help("Use the ask_* helper that matches the question kind, or Ask::ask")
    )]
    AnswerTypeMismatch { name: String, expected: &'static str },

    #[error("Terminal I/O failed: {0}")]
    #[diagnostic(code(r3bl_ask::terminal_io))]
    TerminalIo(miette::Report),
}

impl From<miette::Report> for AskError {
    fn from(report: miette::Report) -> Self { AskError::TerminalIo(report) }
}
