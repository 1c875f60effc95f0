//! What a successful parse hands to a command's handler.

use std::collections::HashMap;

use crate::argument::{ArgumentType, ArgumentValue, Value};
use crate::option::CommandOption;

/// Positional values in the order they were declared and supplied.
#[derive(Debug, Clone, Default)]
pub struct DirectArguments {
    values: Vec<Value>,
}

impl DirectArguments {
    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// `None` when `index` was not supplied or holds a different type.
    pub fn argument<T: ArgumentValue>(&self, index: usize, _declared: &ArgumentType<T>) -> Option<T> {
        self.values.get(index).and_then(T::from_value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Option values keyed by [`CommandOption::key`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: HashMap<String, Value>,
}

impl Options {
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.values.insert(key, value);
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// `None` when the option was absent or holds a different type.
    pub fn value<T: ArgumentValue>(&self, option: &CommandOption<T>) -> Option<T> {
        self.values.get(&option.key()).and_then(T::from_value)
    }

    /// Absent flags read as `false`.
    pub fn flag(&self, option: &CommandOption<bool>) -> bool {
        self.value(option).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
