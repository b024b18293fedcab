// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

use super::{AnswerValue, Question, QuestionKind};
use crate::{EngineOutcome, InputDevice, LineEditor, ListLayout, ListNavigator, ListState,
            OutputDevice, Theme, YesNoEngine};

/// What an engine submits, before it is turned into an [`AnswerValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawAnswer {
    Text(String),
    Bool(bool),
    Values(Vec<Value>),
}

/// The engine running one question. A fresh one is built for every attempt.
#[allow(missing_debug_implementations)]
pub enum ActiveEngine<'t> {
    Line(LineEditor<'t>),
    List(ListNavigator<'t>),
    YesNo(YesNoEngine<'t>),
}

impl<'t> ActiveEngine<'t> {
    #[must_use]
    pub fn new(theme: &'t Theme, question: &Question) -> Self {
        let prompt_line = question.prompt_line(theme);
        let default = question.default.as_ref();

        match &question.kind {
            QuestionKind::Input | QuestionKind::Number { .. } => Self::Line(
                LineEditor::new(theme, prompt_line)
                    .with_initial_text(&question.initial_text())
                    .with_on_reload(question.maybe_on_reload.clone()),
            ),
            QuestionKind::Password { mask } => Self::Line(
                LineEditor::new(theme, prompt_line)
                    .with_hidden(*mask)
                    .with_on_reload(question.maybe_on_reload.clone()),
            ),
            QuestionKind::Confirm {
                accept,
                deny,
                accept_display,
                deny_display,
            } => Self::YesNo(
                YesNoEngine::new(theme, prompt_line, default.and_then(AnswerValue::as_bool))
                    .with_keys(accept, deny)
                    .with_displays(accept_display, deny_display),
            ),
            QuestionKind::Select {
                choices,
                columns,
                use_numbers,
            } => {
                let mut state = ListState::new(list_items(choices), *columns, false)
                    .with_use_numbers(*use_numbers);
                if let Some(AnswerValue::Choice(value)) = default {
                    state = state.with_active_value(value);
                }
                Self::List(ListNavigator::new(theme, prompt_line, state, ListLayout::Grid))
            }
            QuestionKind::Checkbox {
                choices,
                columns,
                use_numbers,
            } => {
                let state = ListState::new(list_items(choices), *columns, true)
                    .with_use_numbers(*use_numbers)
                    .with_selected_values(default_values(default));
                Self::List(ListNavigator::new(theme, prompt_line, state, ListLayout::Grid))
            }
            QuestionKind::InlineCheckbox { choices } => {
                let state = ListState::new(list_items(choices), choices.len(), true)
                    .with_selected_values(default_values(default));
                Self::List(ListNavigator::new(
                    theme,
                    prompt_line,
                    state,
                    ListLayout::Inline,
                ))
            }
        }
    }
}

impl ActiveEngine<'_> {
    /// # Errors
    ///
    /// If reading input or writing to the terminal fails.
    pub async fn run(
        &mut self,
        input_device: &mut InputDevice,
        output_device: &OutputDevice,
    ) -> miette::Result<EngineOutcome<RawAnswer>> {
        let outcome = match self {
            Self::Line(it) => it.run(input_device, output_device).await?.map(RawAnswer::Text),
            Self::List(it) => it.run(input_device, output_device).await?.map(RawAnswer::Values),
            Self::YesNo(it) => it.run(input_device, output_device).await?.map(RawAnswer::Bool),
        };
        Ok(outcome)
    }

    /// What the static answer line shows.
    #[must_use]
    pub fn answer_text(&self, theme: &Theme, value: &AnswerValue) -> String {
        match (self, value) {
            (Self::Line(editor), _) if editor.buffer.hidden => {
                theme.answer(&editor.buffer.rendered())
            }
            (Self::Line(_), AnswerValue::Text(text)) => theme.answer(text),
            (Self::Line(_), AnswerValue::Integer(it)) => theme.answer(&it.to_string()),
            (Self::Line(_), AnswerValue::Float(it)) => theme.answer(&it.to_string()),
            (Self::YesNo(engine), AnswerValue::Bool(it)) => engine.answer_text(*it),
            (Self::List(navigator), _) => navigator.answer_text(),
            _ => theme.answer(&value.to_json().to_string()),
        }
    }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn finish(&mut self, output_device: &OutputDevice, answer: &str) -> miette::Result<()> {
        match self {
            Self::Line(it) => it.finish(output_device, answer),
            Self::List(it) => it.finish(output_device, answer),
            Self::YesNo(it) => it.finish(output_device, answer),
        }
    }

    /// # Errors
    ///
    /// If writing to the terminal fails.
    pub fn discard(&mut self, output_device: &OutputDevice) -> miette::Result<()> {
        match self {
            Self::Line(it) => it.discard(output_device),
            Self::List(it) => it.discard(output_device),
            Self::YesNo(it) => it.discard(output_device),
        }
    }
}

impl Question {
    /// Turns what the engine submitted into this question's value type.
    ///
    /// # Errors
    ///
    /// With the message to show when submitted text can't be parsed.
    pub fn to_answer(&self, raw: RawAnswer, theme: &Theme) -> Result<AnswerValue, String> {
        match (raw, &self.kind) {
            (RawAnswer::Text(text), _) => self.parse_text(&text, theme),
            (RawAnswer::Bool(value), _) => Ok(AnswerValue::Bool(value)),
            (RawAnswer::Values(values), QuestionKind::Select { .. }) => Ok(AnswerValue::Choice(
                values.into_iter().next().unwrap_or(Value::Null),
            )),
            (RawAnswer::Values(values), _) => Ok(AnswerValue::Choices(values)),
        }
    }
}

fn list_items(choices: &[super::Choice]) -> Vec<crate::ListItem> {
    choices.iter().map(crate::ListItem::from).collect()
}

fn default_values(default: Option<&AnswerValue>) -> &[Value] {
    match default {
        Some(AnswerValue::Choices(values)) => values,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::Choice;

    #[test]
    fn test_engine_for_each_kind() {
        let theme = Theme::plain();
        let choices = vec![Choice::new("a", 1), Choice::new("b", 2)];

        assert!(matches!(
            ActiveEngine::new(&theme, &Question::input("s")),
            ActiveEngine::Line(_)
        ));
        assert!(matches!(
            ActiveEngine::new(&theme, &Question::confirm("c")),
            ActiveEngine::YesNo(_)
        ));

        let select = Question::select("s", choices.clone())
            .default_value(AnswerValue::Choice(json!(2)));
        let ActiveEngine::List(navigator) = ActiveEngine::new(&theme, &select) else {
            panic!("select should run in a list navigator");
        };
        assert_eq!(navigator.state.active_index, 1);

        let inline = Question::inline_checkbox("i", choices)
            .default_value(AnswerValue::Choices(vec![json!(1)]));
        let ActiveEngine::List(navigator) = ActiveEngine::new(&theme, &inline) else {
            panic!("inline checkbox should run in a list navigator");
        };
        assert_eq!(navigator.state.columns, 2);
        assert_eq!(navigator.layout, ListLayout::Inline);
        assert_eq!(navigator.state.selected_values(), vec![json!(1)]);
    }

    #[test]
    fn test_to_answer() {
        let theme = Theme::plain();
        let select = Question::select("s", vec![]);
        assert_eq!(
            select.to_answer(RawAnswer::Values(vec![]), &theme),
            Ok(AnswerValue::Choice(Value::Null))
        );
        let checkbox = Question::checkbox("c", vec![]);
        assert_eq!(
            checkbox.to_answer(RawAnswer::Values(vec![json!(1)]), &theme),
            Ok(AnswerValue::Choices(vec![json!(1)]))
        );
        assert_eq!(
            Question::number("n").to_answer(RawAnswer::Text("7".into()), &theme),
            Ok(AnswerValue::Integer(7))
        );
    }

    #[test]
    fn test_password_answer_shows_mask_only() {
        let theme = Theme::plain();
        let mut engine = ActiveEngine::new(&theme, &Question::password("p"));
        if let ActiveEngine::Line(editor) = &mut engine {
            editor.buffer.set_content("secret");
        }
        assert_eq!(
            engine.answer_text(&theme, &AnswerValue::Text("secret".into())),
            "••••••"
        );
    }
}
