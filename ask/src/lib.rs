// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_ask
//!
//! Async interactive prompts for the terminal: text, password and number input with a
//! line editor, select and checkbox lists laid out in a grid or on one line, and yes/no
//! confirmations. Answers are validated, rejected answers are asked again, and every
//! way of leaving a prompt restores the terminal.
//!
//! ```no_run
//! use r3bl_ask::{AnswerValue, Ask, Choice, Question, SessionOutcome, Theme};
//!
//! # async fn run() -> Result<(), r3bl_ask::AskError> {
//! let mut ask = Ask::new_terminal(Theme::default());
//! let outcome = ask
//!     .prompt(&[
//!         Question::input("name").message("Your name"),
//!         Question::number("age").min(1.0).max(120.0),
//!         Question::password("secret").max_attempts(3),
//!         Question::confirm("agree").default_value(AnswerValue::Bool(true)),
//!         Question::checkbox(
//!             "fruits",
//!             vec![
//!                 Choice::from_message("apple"),
//!                 Choice::separator("--"),
//!                 Choice::from_message("kiwi").disabled(),
//!                 Choice::from_message("banana"),
//!             ],
//!         )
//!         .columns(2),
//!     ])
//!     .await?;
//!
//! match outcome {
//!     SessionOutcome::Completed(answers) => println!("{}", answers.to_json()),
//!     SessionOutcome::Abandoned => println!("Bye"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Keys
//!
//! | Key                      | Line editor         | Lists               | Yes/no          |
//! |--------------------------|---------------------|---------------------|-----------------|
//! | Enter                    | submit              | submit              | submit          |
//! | Left / Right             | move one char       | move one cell       |                 |
//! | Ctrl+Left / Ctrl+Right   | move one word       |                     |                 |
//! | Alt+b / Alt+f            | move one word       |                     |                 |
//! | Up / Down                |                     | move one row        |                 |
//! | Ctrl-A / Ctrl-E          | start / end         |                     |                 |
//! | Backspace                | delete              |                     | clear           |
//! | Space                    | insert              | toggle (checkbox)   |                 |
//! | `1` to `9`               | insert              | pick (with numbers) |                 |
//! | Ctrl-R                   | reload (with hook)  |                     |                 |
//!
//! # Cancellation
//!
//! - `ESC`, or a Ctrl-C that is not repeated within 400 ms, abandons the session:
//!   [`SessionOutcome::Abandoned`].
//! - Ctrl-D or the end of input asks whether to exit. Yes is
//!   [`AskError::SessionAborted`], no asks the same question again.
//! - Ctrl-C twice within 400 ms is [`AskError::ForcedTermination`].
//!
//! # Logging
//!
//! Events are emitted with `tracing`. Use [`init`] with [`TracingConfig::new_file`] to
//! collect them without disturbing the prompts.

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
#[macro_use]
pub mod decl_macros;
pub mod engine_outcome;
pub mod key_decoder;
pub mod line_editor;
pub mod list_navigator;
pub mod orchestrator;
pub mod terminal_io;
pub mod theme;
pub mod tracing_logging;
pub mod yes_no;

// Re-export.
pub use engine_outcome::*;
pub use key_decoder::*;
pub use line_editor::*;
pub use list_navigator::*;
pub use orchestrator::*;
pub use terminal_io::*;
pub use theme::*;
pub use tracing_logging::*;
pub use yes_no::*;
