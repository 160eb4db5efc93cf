//! Recipe records and the views derived from them
//!
//! A recipe record is the raw JSON object returned by TheMealDB. Its field
//! names are dictated by the API, so the record is kept opaque and the
//! instruction list and ingredient mapping are recomputed on every request.

use serde_json::{Map, Value};

/// Raw recipe record as returned by the recipe API
pub type RecipeRecord = Map<String, Value>;

/// Display name field
pub const MEAL_NAME_FIELD: &str = "strMeal";
/// Free-text instructions field
pub const INSTRUCTIONS_FIELD: &str = "strInstructions";
/// Number of ingredient/measure slots in a record
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// Unit spellings replaced when ingredients are beautified for speech.
/// Applied in order, after lower-casing the measure.
const SPOKEN_UNITS: [(&str, &str); 7] = [
    ("oz", "ounce"),
    ("1 tbl", "1 table spoon"),
    ("tbl", "table spoons"),
    ("1 tsp", "tea spoon"),
    ("tsp", "tea spoons"),
    ("ml ", "milliliter "),
    ("cl ", "centiliter "),
];

/// Read a non-empty string field from a record
pub fn text_field<'a>(record: &'a RecipeRecord, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Display name of the recipe, if the record carries one
pub fn meal_name(record: &RecipeRecord) -> Option<&str> {
    text_field(record, MEAL_NAME_FIELD)
}

/// Split the instructions field into ordered steps.
///
/// Carriage returns and newlines are dropped before splitting on `.`, and
/// empty fragments are discarded.
pub fn instructions(record: &RecipeRecord) -> Vec<String> {
    let text: String = record
        .get(INSTRUCTIONS_FIELD)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    text.split('.')
        .filter(|step| !step.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Collect the ingredient mapping from the numbered slots.
///
/// Slots are scanned 1..=20 and the scan stops at the first empty
/// ingredient, even when later slots are populated.
pub fn ingredients(record: &RecipeRecord) -> Ingredients {
    let mut result = Ingredients::default();

    for slot in 1..=MAX_INGREDIENT_SLOTS {
        let Some(ingredient) = text_field(record, &format!("strIngredient{}", slot)) else {
            break;
        };
        let measure = text_field(record, &format!("strMeasure{}", slot));
        result.insert(ingredient, measure);
    }

    result
}

/// Ordered ingredient → measure mapping
///
/// A `None` measure means the recipe gives no measurement for that
/// ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingredients {
    entries: Vec<(String, Option<String>)>,
}

impl Ingredients {
    /// Insert an ingredient. A repeated name overwrites the earlier measure
    /// but keeps its original position.
    pub fn insert(&mut self, ingredient: impl Into<String>, measure: Option<&str>) {
        let ingredient = ingredient.into();
        let measure = measure.map(ToString::to_string);

        match self.entries.iter_mut().find(|(name, _)| *name == ingredient) {
            Some(entry) => entry.1 = measure,
            None => self.entries.push((ingredient, measure)),
        }
    }

    /// Look up the measure for an ingredient.
    ///
    /// Returns `None` if the ingredient is not listed and `Some(None)` if it
    /// is listed without a measurement.
    pub fn get(&self, ingredient: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, measure)| measure.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, measure)| (name.as_str(), measure.as_deref()))
    }

    /// Rewrite measures so unit abbreviations read naturally when spoken
    pub fn beautify(&mut self) {
        for (_, measure) in self.entries.iter_mut() {
            if let Some(text) = measure {
                let mut spoken = text.to_lowercase();
                for (word, replacement) in SPOKEN_UNITS {
                    spoken = spoken.replace(word, replacement);
                }
                *text = spoken;
            }
        }
    }

    /// Flatten into a single "ingredient measure" phrase list.
    ///
    /// Returns `None` when there are no ingredients.
    pub fn to_phrase(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, measure)| match measure {
                Some(m) => format!("{} {}", name, m),
                None => name.clone(),
            })
            .collect();

        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RecipeRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_instructions_strip_line_breaks() {
        let rec = record(json!({
            "strMeal": "Arrabiata",
            "strInstructions": "Boil pasta.\r\nAdd sauce.\n"
        }));

        assert_eq!(instructions(&rec), vec!["Boil pasta", "Add sauce"]);
    }

    #[test]
    fn test_instructions_missing_field() {
        let rec = record(json!({"strMeal": "Toast"}));
        assert!(instructions(&rec).is_empty());

        let rec = record(json!({"strInstructions": null}));
        assert!(instructions(&rec).is_empty());
    }

    #[test]
    fn test_instructions_idempotent() {
        let rec = record(json!({
            "strInstructions": "Chop.. Fry.\nServe hot.\r\n\r\nEnjoy"
        }));

        let first = instructions(&rec);
        let second = instructions(&rec);
        assert_eq!(first, second);
        assert_eq!(first, vec!["Chop", " Fry", "Serve hot", "Enjoy"]);
    }

    #[test]
    fn test_ingredients_with_and_without_measure() {
        let rec = record(json!({
            "strIngredient1": "Flour",
            "strMeasure1": "2 cups",
            "strIngredient2": "Salt",
            "strMeasure2": ""
        }));

        let ing = ingredients(&rec);
        assert_eq!(ing.len(), 2);
        assert_eq!(ing.get("Flour"), Some(Some("2 cups")));
        assert_eq!(ing.get("Salt"), Some(None));
        assert_eq!(ing.get("Sugar"), None);
    }

    #[test]
    fn test_ingredients_stop_at_first_gap() {
        let rec = record(json!({
            "strIngredient1": "Eggs", "strMeasure1": "2",
            "strIngredient2": "Milk", "strMeasure2": "1 cup",
            "strIngredient3": "Butter", "strMeasure3": "1 tbl",
            "strIngredient4": "Sugar", "strMeasure4": "1 tsp",
            "strIngredient5": "",
            "strIngredient6": "Vanilla", "strMeasure6": "1 drop"
        }));

        let ing = ingredients(&rec);
        assert_eq!(ing.len(), 4);
        assert_eq!(ing.get("Vanilla"), None);
    }

    #[test]
    fn test_ingredients_null_slot_terminates() {
        let rec = record(json!({
            "strIngredient1": null,
            "strIngredient2": "Rice", "strMeasure2": "1 cup"
        }));

        assert!(ingredients(&rec).is_empty());
    }

    #[test]
    fn test_duplicate_ingredient_overwrites_in_place() {
        let mut ing = Ingredients::default();
        ing.insert("Salt", Some("pinch"));
        ing.insert("Pepper", None);
        ing.insert("Salt", Some("1 tsp"));

        let names: Vec<&str> = ing.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Salt", "Pepper"]);
        assert_eq!(ing.get("Salt"), Some(Some("1 tsp")));
    }

    #[test]
    fn test_to_phrase() {
        let mut ing = Ingredients::default();
        assert_eq!(ing.to_phrase(), None);

        ing.insert("Flour", Some("2 cups"));
        ing.insert("Salt", None);
        assert_eq!(ing.to_phrase().as_deref(), Some("Flour 2 cups Salt"));
    }

    #[test]
    fn test_beautify_units() {
        let mut ing = Ingredients::default();
        ing.insert("Butter", Some("1 tbl"));
        ing.insert("Oil", Some("3 Tbl"));
        ing.insert("Cinnamon", Some("1 tsp"));
        ing.insert("Cheese", Some("8 oz"));
        ing.insert("Cream", Some("200 ml of cream"));
        ing.insert("Salt", None);

        ing.beautify();

        assert_eq!(ing.get("Butter"), Some(Some("1 table spoon")));
        assert_eq!(ing.get("Oil"), Some(Some("3 table spoons")));
        assert_eq!(ing.get("Cinnamon"), Some(Some("tea spoon")));
        assert_eq!(ing.get("Cheese"), Some(Some("8 ounce")));
        assert_eq!(ing.get("Cream"), Some(Some("200 milliliter of cream")));
        assert_eq!(ing.get("Salt"), Some(None));
    }

    #[test]
    fn test_meal_name() {
        let rec = record(json!({"strMeal": "Teriyaki Chicken"}));
        assert_eq!(meal_name(&rec), Some("Teriyaki Chicken"));

        let rec = record(json!({"strMeal": ""}));
        assert_eq!(meal_name(&rec), None);
    }
}
