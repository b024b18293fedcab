// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use futures_util::future::BoxFuture;
use serde_json::Value;

use super::{AnswerValue, AskError};
use crate::{ListItem, PromptLine, ReloadHook, Theme};

/// Resolves to `Ok(true)` to accept. `Ok(false)` rejects with the theme's generic
/// message, `Err` rejects with the report's message. The prompt waits for it, so a
/// validator may do I/O.
pub type Validator =
    Arc<dyn Fn(&AnswerValue) -> BoxFuture<'static, miette::Result<bool>> + Send + Sync>;

/// Called once a question's attempts are used up, with its name and the last rejected
/// value. The value is `None` when the last submitted text didn't parse. Returning an
/// error fails the whole session, returning `Ok` moves on to the next question.
pub type ExceededAttemptsHook =
    Arc<dyn Fn(&str, Option<&AnswerValue>) -> Result<(), AskError> + Send + Sync>;

pub const DEFAULT_MASK: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum NumberType {
    Integer,
    Float,
}

/// One entry of a select or checkbox question.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub message: String,
    pub value: Value,
    pub disabled: bool,
    pub is_separator: bool,
}

impl Choice {
    #[must_use]
    pub fn new(message: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            value: value.into(),
            disabled: false,
            is_separator: false,
        }
    }

    /// Uses the message as the value.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(message.clone(), message)
    }

    #[must_use]
    pub fn separator(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            value: Value::Null,
            disabled: true,
            is_separator: true,
        }
    }

    /// Drawn with the theme's separator line.
    #[must_use]
    pub fn default_separator() -> Self { Self::separator("") }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl From<&Choice> for ListItem {
    fn from(choice: &Choice) -> Self {
        if choice.is_separator {
            ListItem::separator(choice.message.clone())
        } else {
            ListItem::new(choice.message.clone(), choice.value.clone())
                .with_disabled(choice.disabled)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Input,
    Password {
        mask: Option<char>,
    },
    Number {
        number_type: NumberType,
        min: Option<f64>,
        max: Option<f64>,
    },
    Confirm {
        accept: String,
        deny: String,
        accept_display: String,
        deny_display: String,
    },
    Select {
        choices: Vec<Choice>,
        columns: usize,
        use_numbers: bool,
    },
    Checkbox {
        choices: Vec<Choice>,
        columns: usize,
        use_numbers: bool,
    },
    InlineCheckbox {
        choices: Vec<Choice>,
    },
}

/// A question and every option it takes. Built with the constructors for each kind, then
/// the chained setters. Setters for options another kind owns are ignored.
#[derive(Clone)]
pub struct Question {
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
    pub default: Option<AnswerValue>,
    pub maybe_validate: Option<Validator>,
    pub max_attempts: Option<usize>,
    pub maybe_on_exceeded_attempts: Option<ExceededAttemptsHook>,
    pub maybe_prefix: Option<String>,
    pub maybe_suffix: Option<String>,
    pub maybe_indent: Option<String>,
    pub maybe_on_reload: Option<ReloadHook>,
}

impl Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

/// Constructors, one per kind.
impl Question {
    fn new(name: impl Into<String>, kind: QuestionKind) -> Self {
        let name = name.into();
        Self {
            message: name.clone(),
            name,
            kind,
            default: None,
            maybe_validate: None,
            max_attempts: None,
            maybe_on_exceeded_attempts: None,
            maybe_prefix: None,
            maybe_suffix: None,
            maybe_indent: None,
            maybe_on_reload: None,
        }
    }

    #[must_use]
    pub fn input(name: impl Into<String>) -> Self { Self::new(name, QuestionKind::Input) }

    #[must_use]
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Password {
            mask: Some(DEFAULT_MASK),
        })
    }

    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Number {
            number_type: NumberType::Integer,
            min: None,
            max: None,
        })
    }

    #[must_use]
    pub fn confirm(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Confirm {
            accept: crate::DEFAULT_ACCEPT.to_string(),
            deny: crate::DEFAULT_DENY.to_string(),
            accept_display: crate::DEFAULT_ACCEPT_DISPLAY.to_string(),
            deny_display: crate::DEFAULT_DENY_DISPLAY.to_string(),
        })
    }

    #[must_use]
    pub fn select(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::new(name, QuestionKind::Select {
            choices,
            columns: 1,
            use_numbers: false,
        })
    }

    #[must_use]
    pub fn checkbox(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::new(name, QuestionKind::Checkbox {
            choices,
            columns: 1,
            use_numbers: false,
        })
    }

    #[must_use]
    pub fn inline_checkbox(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::new(name, QuestionKind::InlineCheckbox { choices })
    }
}

/// Options every kind takes.
impl Question {
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: AnswerValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn validate(
        mut self,
        validate: impl Fn(&AnswerValue) -> BoxFuture<'static, miette::Result<bool>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.maybe_validate = Some(Arc::new(validate));
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub fn on_exceeded_attempts(
        mut self,
        hook: impl Fn(&str, Option<&AnswerValue>) -> Result<(), AskError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.maybe_on_exceeded_attempts = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.maybe_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.maybe_suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.maybe_indent = Some(indent.into());
        self
    }
}

/// Options owned by some kinds only.
impl Question {
    /// Input, password and number questions.
    #[must_use]
    pub fn on_reload(mut self, on_reload: ReloadHook) -> Self {
        self.maybe_on_reload = Some(on_reload);
        self
    }

    /// `None` hides the input completely.
    #[must_use]
    pub fn mask(mut self, new_mask: Option<char>) -> Self {
        if let QuestionKind::Password { mask } = &mut self.kind {
            *mask = new_mask;
        }
        self
    }

    #[must_use]
    pub fn float(mut self) -> Self {
        if let QuestionKind::Number { number_type, .. } = &mut self.kind {
            *number_type = NumberType::Float;
        }
        self
    }

    #[must_use]
    pub fn min(mut self, value: f64) -> Self {
        if let QuestionKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    #[must_use]
    pub fn max(mut self, value: f64) -> Self {
        if let QuestionKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    #[must_use]
    pub fn accept(mut self, keys: impl Into<String>) -> Self {
        if let QuestionKind::Confirm { accept, .. } = &mut self.kind {
            *accept = keys.into();
        }
        self
    }

    #[must_use]
    pub fn deny(mut self, keys: impl Into<String>) -> Self {
        if let QuestionKind::Confirm { deny, .. } = &mut self.kind {
            *deny = keys.into();
        }
        self
    }

    #[must_use]
    pub fn accept_display(mut self, text: impl Into<String>) -> Self {
        if let QuestionKind::Confirm { accept_display, .. } = &mut self.kind {
            *accept_display = text.into();
        }
        self
    }

    #[must_use]
    pub fn deny_display(mut self, text: impl Into<String>) -> Self {
        if let QuestionKind::Confirm { deny_display, .. } = &mut self.kind {
            *deny_display = text.into();
        }
        self
    }

    #[must_use]
    pub fn columns(mut self, count: usize) -> Self {
        if let QuestionKind::Select { columns, .. } | QuestionKind::Checkbox { columns, .. } =
            &mut self.kind
        {
            *columns = count.max(1);
        }
        self
    }

    #[must_use]
    pub fn use_numbers(mut self, enabled: bool) -> Self {
        if let QuestionKind::Select { use_numbers, .. }
        | QuestionKind::Checkbox { use_numbers, .. } = &mut self.kind
        {
            *use_numbers = enabled;
        }
        self
    }
}

/// What the engines need from a question.
impl Question {
    /// The header, with this question's overrides applied over the theme.
    #[must_use]
    pub fn prompt_line(&self, theme: &Theme) -> PromptLine {
        let mut message = self.message.clone();
        if let Some(hint) = self.range_hint() {
            message.push_str(&format!(" ({hint})"));
        }

        let mut prompt_line = PromptLine::new(theme, message);
        if let Some(prefix) = &self.maybe_prefix {
            prompt_line.indicator.clone_from(prefix);
        }
        if let Some(suffix) = &self.maybe_suffix {
            prompt_line.suffix.clone_from(suffix);
        }
        if let Some(indent) = &self.maybe_indent {
            prompt_line.indent.clone_from(indent);
        }
        prompt_line
    }

    /// `>= min`, `<= max`, or `min-max`.
    #[must_use]
    pub fn range_hint(&self) -> Option<String> {
        let QuestionKind::Number { min, max, .. } = &self.kind else {
            return None;
        };
        match (min, max) {
            (Some(min), Some(max)) => Some(format!("{min}-{max}")),
            (Some(min), None) => Some(format!(">= {min}")),
            (None, Some(max)) => Some(format!("<= {max}")),
            (None, None) => None,
        }
    }

    /// Text the line editor starts with.
    #[must_use]
    pub fn initial_text(&self) -> String {
        match (&self.kind, &self.default) {
            (QuestionKind::Input, Some(AnswerValue::Text(text))) => text.clone(),
            (QuestionKind::Number { .. }, Some(AnswerValue::Integer(it))) => it.to_string(),
            (QuestionKind::Number { .. }, Some(AnswerValue::Float(it))) => it.to_string(),
            _ => String::new(),
        }
    }

    /// Parses submitted text into this question's value type. An empty line means the
    /// default. `Err` carries the message to show.
    ///
    /// # Errors
    ///
    /// If the text isn't a number that a number question accepts.
    pub fn parse_text(&self, text: &str, theme: &Theme) -> Result<AnswerValue, String> {
        if text.trim().is_empty() {
            if let Some(default) = &self.default {
                return Ok(default.clone());
            }
        }

        let QuestionKind::Number { number_type, .. } = &self.kind else {
            return Ok(AnswerValue::Text(text.to_string()));
        };
        let trimmed = text.trim();
        let parsed = match number_type {
            NumberType::Integer => trimmed.parse::<i64>().ok().map(AnswerValue::Integer),
            NumberType::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|it| it.is_finite())
                .map(AnswerValue::Float),
        };
        parsed.ok_or_else(|| theme.invalid_answer_message.clone())
    }

    /// Range check for numbers, then the caller's validator.
    ///
    /// # Errors
    ///
    /// With the message to show when the answer is rejected.
    pub async fn check(&self, value: &AnswerValue, theme: &Theme) -> Result<(), String> {
        if let (QuestionKind::Number { min, max, .. }, Some(number)) =
            (&self.kind, value.as_f64())
        {
            let too_small = min.is_some_and(|min| number < min);
            let too_large = max.is_some_and(|max| number > max);
            if too_small || too_large {
                let hint = self.range_hint().unwrap_or_default();
                return Err(format!("The number must be {hint}"));
            }
        }

        let Some(validate) = &self.maybe_validate else {
            return Ok(());
        };
        match validate(value).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(theme.invalid_answer_message.clone()),
            Err(report) => Err(report.to_string()),
        }
    }
}
