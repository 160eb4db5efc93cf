//! Stdin line protocol
//!
//! Each line is `<user> <intent> [key=value ...]`. `<intent>` is either a
//! host intent name or one of the shorthand aliases below. Words without
//! an `=` extend the previous value, so `recipe_name=Spicy Arrabiata Penne`
//! needs no quoting. For `name` and `ingredient`, leading free text fills
//! the required field.

use recipe_skill_core::bus::{Intent, IntentMessage};
use recipe_skill_core::{Error, Result};
use std::collections::HashMap;

/// Shorthand alias, host intent name, and the field free text fills
pub const ALIASES: [(&str, &str, Option<&str>); 9] = [
    ("name", "get.recipe.by.name.intent", Some("recipe_name")),
    (
        "ingredient",
        "get.recipe.by.ingredient.intent",
        Some("ingredient"),
    ),
    ("random", "get.random.recipe.intent", None),
    ("recipe", "get.the.recipe.name.intent", None),
    ("recite", "recite.the.instructions.intent", None),
    ("ingredients", "get.the.ingredients.intent", None),
    ("current", "get.the.current.step.intent", None),
    ("previous", "get.the.previous.step.intent", None),
    ("next", "get.the.next.step.intent", None),
];

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<IntentMessage>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let user = words.next().unwrap_or_default();
    let Some(intent_word) = words.next() else {
        return Err(Error::Intent(format!("Missing intent after user '{}'", user)));
    };

    let (intent_name, free_field) = ALIASES
        .iter()
        .find(|(alias, _, _)| *alias == intent_word)
        .map(|(_, name, field)| (*name, *field))
        .unwrap_or((intent_word, None));

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut free_text: Vec<&str> = Vec::new();
    let mut current_key: Option<String> = None;

    for word in words {
        if let Some((key, value)) = word.split_once('=') {
            fields.insert(key.to_string(), value.to_string());
            current_key = Some(key.to_string());
        } else if let Some(key) = &current_key {
            if let Some(value) = fields.get_mut(key) {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(word);
            }
        } else {
            free_text.push(word);
        }
    }

    if let Some(field) = free_field {
        if !free_text.is_empty() && !fields.contains_key(field) {
            fields.insert(field.to_string(), free_text.join(" "));
        }
    }

    let intent = Intent::from_name(intent_name, &fields)?;
    Ok(Some(IntentMessage::new(user, intent)))
}
