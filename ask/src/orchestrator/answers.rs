// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Serialize, ser::SerializeMap as _};
use serde_json::Value;

/// A validated answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Value of the chosen item of a select question. `null` when nothing could be
    /// chosen.
    Choice(Value),
    /// Values of the checked items, in list order.
    Choices(Vec<Value>),
}

impl AnswerValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(it) => Some(*it),
            _ => None,
        }
    }

    /// Numeric answers as a float, for range checks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnswerValue::Integer(it) => Some(*it as f64),
            AnswerValue::Float(it) => Some(*it),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            AnswerValue::Text(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_choice(self) -> Option<Value> {
        match self {
            AnswerValue::Choice(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_choices(self) -> Option<Vec<Value>> {
        match self {
            AnswerValue::Choices(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value { serde_json::to_value(self).unwrap_or(Value::Null) }
}

/// Answers of one session keyed by question name, in the order they were given.
/// Serializes as a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    entries: Vec<(String, AnswerValue)>,
}

impl Answers {
    /// Replaces the answer if `name` is already present, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, value: AnswerValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// A JSON object, keys in answer order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Answers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// How a [`crate::Ask::prompt`] session ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(Answers),
    /// `ESC` (or a lone Ctrl-C) on some question. No answers are returned.
    Abandoned,
}

impl SessionOutcome {
    #[must_use]
    pub fn answers(self) -> Option<Answers> {
        match self {
            SessionOutcome::Completed(answers) => Some(answers),
            SessionOutcome::Abandoned => None,
        }
    }
}
