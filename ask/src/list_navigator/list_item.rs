// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

/// One row (or cell) of a list question. Which item is active is tracked by
/// [`super::ListState::active_index`], so at most one item can ever be active.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub message: String,
    pub value: Value,
    pub disabled: bool,
    pub selected: bool,
    /// Visual grouping only. Always disabled, never focused, never numbered.
    pub is_separator: bool,
}

impl ListItem {
    #[must_use]
    pub fn new(message: impl Into<String>, value: Value) -> Self {
        Self {
            message: message.into(),
            value,
            disabled: false,
            selected: false,
            is_separator: false,
        }
    }

    #[must_use]
    pub fn separator(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            value: Value::Null,
            disabled: true,
            selected: false,
            is_separator: true,
        }
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled || self.is_separator;
        self
    }

    /// Can this item receive focus.
    #[must_use]
    pub fn is_navigable(&self) -> bool { !self.disabled && !self.is_separator }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_is_never_navigable() {
        let separator = ListItem::separator("---").with_disabled(false);
        assert!(separator.disabled);
        assert!(!separator.is_navigable());
        assert!(ListItem::new("a", Value::from(1)).is_navigable());
        assert!(!ListItem::new("a", Value::from(1)).with_disabled(true).is_navigable());
    }
}
