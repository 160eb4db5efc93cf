//! Dialog templates and the speaking side channel
//!
//! Handlers never return text. They emit a named template plus a
//! substitution map through a [`DialogSink`], and a [`DialogRenderer`]
//! turns that into a sentence at the edge of the system.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid"));

/// Named dialog templates spoken by the skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogTemplate {
    CurrentRecipe,
    NoRecipe,
    ReciteStep,
    NoInstructions,
    YouWillNeed,
    NoIngredients,
    CurrentStep,
    PreviousStep,
    NoPreviousStep,
    NextStep,
    NoNextSteps,
    SearchFailed,
}

impl DialogTemplate {
    pub const ALL: [DialogTemplate; 12] = [
        DialogTemplate::CurrentRecipe,
        DialogTemplate::NoRecipe,
        DialogTemplate::ReciteStep,
        DialogTemplate::NoInstructions,
        DialogTemplate::YouWillNeed,
        DialogTemplate::NoIngredients,
        DialogTemplate::CurrentStep,
        DialogTemplate::PreviousStep,
        DialogTemplate::NoPreviousStep,
        DialogTemplate::NextStep,
        DialogTemplate::NoNextSteps,
        DialogTemplate::SearchFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogTemplate::CurrentRecipe => "CurrentRecipe",
            DialogTemplate::NoRecipe => "NoRecipe",
            DialogTemplate::ReciteStep => "ReciteStep",
            DialogTemplate::NoInstructions => "NoInstructions",
            DialogTemplate::YouWillNeed => "YouWillNeed",
            DialogTemplate::NoIngredients => "NoIngredients",
            DialogTemplate::CurrentStep => "CurrentStep",
            DialogTemplate::PreviousStep => "PreviousStep",
            DialogTemplate::NoPreviousStep => "NoPreviousStep",
            DialogTemplate::NextStep => "NextStep",
            DialogTemplate::NoNextSteps => "NoNextSteps",
            DialogTemplate::SearchFailed => "SearchFailed",
        }
    }

    /// Built-in English text for the template
    fn default_text(&self) -> &'static str {
        match self {
            DialogTemplate::CurrentRecipe => "The current recipe is {{recipe_name}}.",
            DialogTemplate::NoRecipe => "You haven't picked a recipe yet.",
            DialogTemplate::ReciteStep => "{{step}}.",
            DialogTemplate::NoInstructions => "I don't have any instructions for this recipe.",
            DialogTemplate::YouWillNeed => "For {{recipe_name}} you will need {{ingredients}}.",
            DialogTemplate::NoIngredients => "I couldn't find any ingredients for this recipe.",
            DialogTemplate::CurrentStep => "The current step for {{recipe_name}} is: {{step}}.",
            DialogTemplate::PreviousStep => "The previous step for {{recipe_name}} is: {{step}}.",
            DialogTemplate::NoPreviousStep => "There is no previous step.",
            DialogTemplate::NextStep => "The next step for {{recipe_name}} is: {{step}}.",
            DialogTemplate::NoNextSteps => "There are no more steps.",
            DialogTemplate::SearchFailed => "Sorry, I couldn't find that recipe.",
        }
    }
}

impl fmt::Display for DialogTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogTemplate {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        DialogTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::Error::Validation(format!("Unknown dialog template: {}", s)))
    }
}

/// A dialog emitted for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenDialog {
    /// User the dialog is addressed to
    pub user: String,
    /// Template to speak
    pub template: DialogTemplate,
    /// Placeholder substitutions
    pub data: Map<String, Value>,
}

impl SpokenDialog {
    /// Create a dialog with no substitutions
    pub fn new(user: impl Into<String>, template: DialogTemplate) -> Self {
        Self {
            user: user.into(),
            template,
            data: Map::new(),
        }
    }

    /// Add a substitution
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Read a substitution as text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

/// Side channel used by intent handlers to speak
pub trait DialogSink: Send + Sync {
    fn speak(&self, dialog: SpokenDialog);
}

/// Turns spoken dialogs into sentences
#[derive(Debug, Clone)]
pub struct DialogRenderer {
    templates: HashMap<DialogTemplate, String>,
}

impl DialogRenderer {
    /// Renderer with the built-in English templates
    pub fn new() -> Self {
        let templates = DialogTemplate::ALL
            .into_iter()
            .map(|t| (t, t.default_text().to_string()))
            .collect();
        Self { templates }
    }

    /// Renderer with some templates replaced, keyed by template name
    pub fn with_overrides(overrides: &HashMap<String, String>) -> crate::Result<Self> {
        let mut renderer = Self::new();
        for (name, text) in overrides {
            let template = DialogTemplate::from_str(name)?;
            renderer.templates.insert(template, text.clone());
        }
        Ok(renderer)
    }

    /// Render a dialog. Missing or null substitutions become empty text.
    pub fn render(&self, dialog: &SpokenDialog) -> String {
        let text = self
            .templates
            .get(&dialog.template)
            .map(String::as_str)
            .unwrap_or_else(|| dialog.template.default_text());

        let rendered = PLACEHOLDER.replace_all(text, |caps: &Captures| {
            match dialog.data.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        });

        rendered.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for DialogRenderer {
    fn default() -> Self {
        Self::new()
    }
}
