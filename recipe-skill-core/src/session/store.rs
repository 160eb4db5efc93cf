//! Recipe session data structure

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recipe::{self, Ingredients, RecipeRecord};

/// One user's active recipe and reading position
///
/// The session is a plain state holder: `advance_to` does not check the
/// cursor against the instruction list. Navigation policy (when a step
/// exists, what to say when it does not) belongs to the intent handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSession {
    /// Recipe record as returned by the recipe API
    data: RecipeRecord,
    /// Zero-based index of the current instruction step
    cursor: usize,
}

impl RecipeSession {
    /// Create a new session positioned on the first step
    pub fn new(data: RecipeRecord) -> Self {
        Self { data, cursor: 0 }
    }

    /// Get the value stored under `field`, or `default` if it is absent
    pub fn get(&self, field: &str, default: Value) -> Value {
        self.data.get(field).cloned().unwrap_or(default)
    }

    /// Store or overwrite `field`
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.data.insert(field.into(), value);
    }

    /// Borrow the raw recipe record
    pub fn data(&self) -> &RecipeRecord {
        &self.data
    }

    /// Display name of the recipe, or `fallback` when the record has none
    pub fn meal_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        recipe::meal_name(&self.data).unwrap_or(fallback)
    }

    /// Derived instruction list
    pub fn instructions(&self) -> Vec<String> {
        recipe::instructions(&self.data)
    }

    /// Derived ingredient mapping
    pub fn ingredients(&self) -> Ingredients {
        recipe::ingredients(&self.data)
    }

    /// Index of the current step
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Move the cursor. No bounds checking is performed.
    pub fn advance_to(&mut self, new_index: usize) {
        self.cursor = new_index;
    }
}
