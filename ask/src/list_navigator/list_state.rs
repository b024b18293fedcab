// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

use super::ListItem;

/// Highest number shown by numeric shortcuts, keys `1` to `9`.
pub const MAX_SHORTCUT: usize = 9;

/// Items laid out row-major in `columns` columns, plus the focus.
///
/// Up/down move a whole row and wrap to the same column on the other edge. Left/right
/// move one cell and clamp at both ends. Whatever the direction, an item that can't take
/// focus is skipped, and if nothing else can take focus the focus stays put.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<ListItem>,
    /// Always at least 1.
    pub columns: usize,
    pub multiple: bool,
    pub use_numbers: bool,
    pub active_index: usize,
}

impl ListState {
    /// Focus starts on the first item that can take it.
    #[must_use]
    pub fn new(items: Vec<ListItem>, columns: usize, multiple: bool) -> Self {
        let active_index = items
            .iter()
            .position(ListItem::is_navigable)
            .unwrap_or_default();
        Self {
            items,
            columns: columns.max(1),
            multiple,
            use_numbers: false,
            active_index,
        }
    }

    #[must_use]
    pub fn with_use_numbers(mut self, use_numbers: bool) -> Self {
        self.use_numbers = use_numbers;
        self
    }

    /// Focus the first navigable item carrying `value`, if there is one.
    #[must_use]
    pub fn with_active_value(mut self, value: &Value) -> Self {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.is_navigable() && &item.value == value)
        {
            self.active_index = index;
        }
        self
    }

    /// Pre-select every navigable item whose value is in `values`.
    #[must_use]
    pub fn with_selected_values(mut self, values: &[Value]) -> Self {
        for item in &mut self.items {
            item.selected = item.is_navigable() && values.contains(&item.value);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[must_use]
    pub fn row_count(&self) -> usize { self.items.len().div_ceil(self.columns) }

    #[must_use]
    pub fn is_navigable(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(ListItem::is_navigable)
    }
}

/// Movement.
impl ListState {
    pub fn move_up(&mut self) { self.step_until_navigable(Self::index_above); }

    pub fn move_down(&mut self) { self.step_until_navigable(Self::index_below); }

    /// No-op in a single column.
    pub fn move_left(&mut self) {
        if self.columns == 1 {
            return;
        }
        if let Some(index) = (0..self.active_index).rev().find(|&it| self.is_navigable(it)) {
            self.active_index = index;
        }
    }

    /// No-op in a single column.
    pub fn move_right(&mut self) {
        if self.columns == 1 {
            return;
        }
        if let Some(index) =
            (self.active_index + 1..self.items.len()).find(|&it| self.is_navigable(it))
        {
            self.active_index = index;
        }
    }

    /// Repeats `step` from the current focus until it lands on a navigable item. Bounded
    /// by the item count, and it gives up as soon as it gets back to where it started.
    fn step_until_navigable(&mut self, step: fn(&Self, usize) -> usize) {
        let start = self.active_index;
        let mut candidate = start;
        for _ in 0..self.items.len() {
            candidate = step(self, candidate);
            if candidate == start {
                return;
            }
            if self.is_navigable(candidate) {
                self.active_index = candidate;
                return;
            }
        }
    }

    fn index_above(&self, index: usize) -> usize {
        let len = self.items.len();
        if self.columns == 1 {
            return if index == 0 { len.saturating_sub(1) } else { index - 1 };
        }
        if index >= self.columns {
            return index - self.columns;
        }
        // Same column in the last row, which may be short.
        let wrapped = (self.row_count() - 1) * self.columns + index;
        if wrapped >= len { wrapped - self.columns } else { wrapped }
    }

    fn index_below(&self, index: usize) -> usize {
        let len = self.items.len();
        if self.columns == 1 {
            return if index + 1 >= len { 0 } else { index + 1 };
        }
        if index + self.columns < len {
            index + self.columns
        } else {
            index % self.columns
        }
    }
}

/// Selection.
impl ListState {
    /// Only in multiple mode, and only on an item that can take focus.
    pub fn toggle_selected(&mut self) {
        if !self.multiple || !self.is_navigable(self.active_index) {
            return;
        }
        let item = &mut self.items[self.active_index];
        item.selected = !item.selected;
    }

    /// Ends the question. In single mode the active item becomes the selection.
    pub fn finalize(&mut self) -> Vec<Value> {
        if !self.multiple && self.is_navigable(self.active_index) {
            self.items[self.active_index].selected = true;
        }
        self.selected_values()
    }

    #[must_use]
    pub fn selected_values(&self) -> Vec<Value> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.value.clone())
            .collect()
    }

    /// Numeric shortcut `number` (1 based, separators not counted). Returns the final
    /// selection when the shortcut applied, `None` when it was ignored.
    pub fn apply_shortcut(&mut self, number: usize) -> Option<Vec<Value>> {
        if !self.use_numbers {
            return None;
        }
        let index = self.index_of_shortcut(number)?;
        if !self.is_navigable(index) {
            return None;
        }
        self.active_index = index;
        self.items[index].selected = true;
        Some(self.selected_values())
    }

    /// The number shown in front of the item at `index`, when numbers are on.
    #[must_use]
    pub fn shortcut_of(&self, index: usize) -> Option<usize> {
        if !self.use_numbers || self.items.get(index)?.is_separator {
            return None;
        }
        let number = self.items[..index]
            .iter()
            .filter(|item| !item.is_separator)
            .count()
            + 1;
        (number <= MAX_SHORTCUT).then_some(number)
    }

    fn index_of_shortcut(&self, number: usize) -> Option<usize> {
        if !(1..=MAX_SHORTCUT).contains(&number) {
            return None;
        }
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_separator)
            .nth(number - 1)
            .map(|(index, _)| index)
    }
}
