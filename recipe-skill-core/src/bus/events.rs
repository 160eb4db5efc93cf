//! Event types for the message bus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Intents the skill responds to, with the fields the host extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SearchByName { recipe_name: String },
    SearchByIngredient { ingredient: String },
    SearchRandom,
    RecipeName,
    ReciteInstructions,
    Ingredients,
    CurrentStep,
    PreviousStep,
    NextStep,
}

impl Intent {
    /// Intent names registered with the host
    pub const NAMES: [&'static str; 9] = [
        "get.recipe.by.name.intent",
        "get.recipe.by.ingredient.intent",
        "get.random.recipe.intent",
        "get.the.recipe.name.intent",
        "recite.the.instructions.intent",
        "get.the.ingredients.intent",
        "get.the.current.step.intent",
        "get.the.previous.step.intent",
        "get.the.next.step.intent",
    ];

    /// The host-facing intent name
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SearchByName { .. } => Self::NAMES[0],
            Intent::SearchByIngredient { .. } => Self::NAMES[1],
            Intent::SearchRandom => Self::NAMES[2],
            Intent::RecipeName => Self::NAMES[3],
            Intent::ReciteInstructions => Self::NAMES[4],
            Intent::Ingredients => Self::NAMES[5],
            Intent::CurrentStep => Self::NAMES[6],
            Intent::PreviousStep => Self::NAMES[7],
            Intent::NextStep => Self::NAMES[8],
        }
    }

    /// Build an intent from a host intent name and its extracted fields
    pub fn from_name(name: &str, fields: &HashMap<String, String>) -> crate::Result<Self> {
        let required = |key: &str| {
            fields
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
                .ok_or_else(|| {
                    crate::Error::Intent(format!("{} requires field '{}'", name, key))
                })
        };

        match name {
            "get.recipe.by.name.intent" => Ok(Intent::SearchByName {
                recipe_name: required("recipe_name")?,
            }),
            "get.recipe.by.ingredient.intent" => Ok(Intent::SearchByIngredient {
                ingredient: required("ingredient")?,
            }),
            "get.random.recipe.intent" => Ok(Intent::SearchRandom),
            "get.the.recipe.name.intent" => Ok(Intent::RecipeName),
            "recite.the.instructions.intent" => Ok(Intent::ReciteInstructions),
            "get.the.ingredients.intent" => Ok(Intent::Ingredients),
            "get.the.current.step.intent" => Ok(Intent::CurrentStep),
            "get.the.previous.step.intent" => Ok(Intent::PreviousStep),
            "get.the.next.step.intent" => Ok(Intent::NextStep),
            other => Err(crate::Error::Intent(format!("Unknown intent: {}", other))),
        }
    }
}

/// An intent dispatched by the host for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMessage {
    /// Trace identifier for log correlation
    pub id: Uuid,
    /// User identifier; sessions are keyed by it
    pub user: String,
    /// The intent and its fields
    pub intent: Intent,
    /// Receive time
    pub timestamp: DateTime<Utc>,
}

impl IntentMessage {
    /// Create a new intent message
    pub fn new(user: impl Into<String>, intent: Intent) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            intent,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_name_with_fields() {
        let intent = Intent::from_name(
            "get.recipe.by.name.intent",
            &fields(&[("recipe_name", "Arrabiata")]),
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::SearchByName {
                recipe_name: "Arrabiata".to_string()
            }
        );
    }

    #[test]
    fn test_from_name_missing_field() {
        let err = Intent::from_name("get.recipe.by.ingredient.intent", &HashMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("ingredient"));

        let err = Intent::from_name(
            "get.recipe.by.name.intent",
            &fields(&[("recipe_name", "  ")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("recipe_name"));
    }

    #[test]
    fn test_unknown_intent() {
        assert!(Intent::from_name("order.pizza.intent", &HashMap::new()).is_err());
    }

    #[test]
    fn test_names_match_from_name() {
        let all = fields(&[("recipe_name", "Soup"), ("ingredient", "leek")]);
        for name in Intent::NAMES {
            assert_eq!(Intent::from_name(name, &all).unwrap().name(), name);
        }
    }
}
