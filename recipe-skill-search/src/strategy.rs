//! Recipe search strategies
//!
//! The three ways of finding a recipe share one contract: request fields in,
//! a recipe record or nothing out. API failures never escape a strategy;
//! they are logged and reported as "not found".

use crate::base::RecipeApi;
use async_trait::async_trait;
use recipe_skill_core::recipe::{self, RecipeRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fields the host extracted from the user's request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub recipe_name: Option<String>,
    pub ingredient: Option<String>,
}

impl SearchRequest {
    pub fn by_name(recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_name: Some(recipe_name.into()),
            ingredient: None,
        }
    }

    pub fn by_ingredient(ingredient: impl Into<String>) -> Self {
        Self {
            recipe_name: None,
            ingredient: Some(ingredient.into()),
        }
    }
}

/// Trait for recipe search strategies
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Strategy name, used in logs
    fn name(&self) -> &str;

    /// Run the search. `None` means no recipe was found.
    async fn search(&self, request: &SearchRequest) -> Option<RecipeRecord>;
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Search by recipe name
pub struct SearchByName {
    api: Arc<dyn RecipeApi>,
}

impl SearchByName {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SearchStrategy for SearchByName {
    fn name(&self) -> &str {
        "by_name"
    }

    async fn search(&self, request: &SearchRequest) -> Option<RecipeRecord> {
        let Some(name) = non_empty(request.recipe_name.as_ref()) else {
            debug!("Search by name without a recipe name");
            return None;
        };

        match self.api.lookup_by_name(name).await {
            Ok(found) => found,
            Err(e) => {
                warn!(recipe_name = %name, "Recipe lookup failed: {}", e);
                None
            }
        }
    }
}

/// Search by main ingredient
///
/// Resolves the ingredient to the first matching recipe's name through the
/// filter endpoint, then delegates to [`SearchByName`].
pub struct SearchByIngredient {
    api: Arc<dyn RecipeApi>,
    by_name: SearchByName,
}

impl SearchByIngredient {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self {
            by_name: SearchByName::new(Arc::clone(&api)),
            api,
        }
    }
}

#[async_trait]
impl SearchStrategy for SearchByIngredient {
    fn name(&self) -> &str {
        "by_ingredient"
    }

    async fn search(&self, request: &SearchRequest) -> Option<RecipeRecord> {
        let Some(ingredient) = non_empty(request.ingredient.as_ref()) else {
            debug!("Search by ingredient without an ingredient");
            return None;
        };

        // The filter endpoint expects multi-word ingredients joined by '_'
        let ingredient = ingredient.replace(' ', "_");
        let matches = match self.api.filter_by_ingredient(&ingredient).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(ingredient = %ingredient, "Ingredient filter failed: {}", e);
                return None;
            }
        };

        let recipe_name = matches.first().and_then(recipe::meal_name)?;
        debug!(ingredient = %ingredient, recipe_name = %recipe_name, "Resolved ingredient to recipe");

        self.by_name
            .search(&SearchRequest::by_name(recipe_name))
            .await
    }
}

/// Pick a random recipe; ignores the request fields
pub struct SearchRandom {
    api: Arc<dyn RecipeApi>,
}

impl SearchRandom {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SearchStrategy for SearchRandom {
    fn name(&self) -> &str {
        "random"
    }

    async fn search(&self, _request: &SearchRequest) -> Option<RecipeRecord> {
        match self.api.lookup_random().await {
            Ok(found) => found,
            Err(e) => {
                warn!("Random recipe lookup failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ApiError, ApiResult};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn record(value: Value) -> RecipeRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[derive(Default)]
    struct FakeApi {
        by_name: HashMap<String, RecipeRecord>,
        by_ingredient: HashMap<String, Vec<RecipeRecord>>,
        random: Option<RecipeRecord>,
        fail: bool,
        name_queries: Mutex<Vec<String>>,
    }

    fn decode_failure() -> ApiError {
        serde_json::from_str::<Value>("{").unwrap_err().into()
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn lookup_by_name(&self, name: &str) -> ApiResult<Option<RecipeRecord>> {
            self.name_queries.lock().unwrap().push(name.to_string());
            if self.fail {
                return Err(decode_failure());
            }
            Ok(self.by_name.get(name).cloned())
        }

        async fn lookup_random(&self) -> ApiResult<Option<RecipeRecord>> {
            if self.fail {
                return Err(decode_failure());
            }
            Ok(self.random.clone())
        }

        async fn filter_by_ingredient(&self, ingredient: &str) -> ApiResult<Vec<RecipeRecord>> {
            if self.fail {
                return Err(decode_failure());
            }
            Ok(self.by_ingredient.get(ingredient).cloned().unwrap_or_default())
        }
    }

    fn fake() -> FakeApi {
        let mut api = FakeApi::default();
        api.by_name.insert(
            "Chicken Ham and Leek Pie".to_string(),
            record(json!({"strMeal": "Chicken Ham and Leek Pie", "strInstructions": "Bake."})),
        );
        api.by_ingredient.insert(
            "chicken_breast".to_string(),
            vec![
                record(json!({"strMeal": "Chicken Ham and Leek Pie"})),
                record(json!({"strMeal": "Chicken Couscous"})),
            ],
        );
        api.random = Some(record(json!({"strMeal": "Kumpir"})));
        api
    }

    #[tokio::test]
    async fn test_by_name_found_and_missing() {
        let strategy = SearchByName::new(Arc::new(fake()));

        let found = strategy
            .search(&SearchRequest::by_name("Chicken Ham and Leek Pie"))
            .await;
        assert!(found.is_some());

        assert!(strategy.search(&SearchRequest::by_name("Nope")).await.is_none());
        assert!(strategy.search(&SearchRequest::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_trimmed() {
        let api = Arc::new(fake());
        let by_name = SearchByName::new(api.clone());
        let by_ingredient = SearchByIngredient::new(api.clone());

        assert!(by_name
            .search(&SearchRequest::by_name("  Chicken Ham and Leek Pie \t"))
            .await
            .is_some());
        assert!(by_ingredient
            .search(&SearchRequest::by_ingredient(" chicken breast "))
            .await
            .is_some());
        assert!(by_name.search(&SearchRequest::by_name("   ")).await.is_none());

        assert_eq!(
            *api.name_queries.lock().unwrap(),
            vec![
                "Chicken Ham and Leek Pie".to_string(),
                "Chicken Ham and Leek Pie".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_by_ingredient_composes_by_name() {
        let api = Arc::new(fake());
        let strategy = SearchByIngredient::new(api.clone());

        let found = strategy
            .search(&SearchRequest::by_ingredient("chicken breast"))
            .await
            .unwrap();

        assert_eq!(found["strInstructions"], "Bake.");
        assert_eq!(
            *api.name_queries.lock().unwrap(),
            vec!["Chicken Ham and Leek Pie".to_string()]
        );
    }

    #[tokio::test]
    async fn test_by_ingredient_no_matches() {
        let api = Arc::new(fake());
        let strategy = SearchByIngredient::new(api.clone());

        assert!(strategy
            .search(&SearchRequest::by_ingredient("chicken"))
            .await
            .is_none());
        assert!(api.name_queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_random() {
        let strategy = SearchRandom::new(Arc::new(fake()));
        let found = strategy.search(&SearchRequest::default()).await.unwrap();
        assert_eq!(found["strMeal"], "Kumpir");
    }

    #[tokio::test]
    async fn test_api_failures_are_not_found() {
        let api: Arc<dyn RecipeApi> = Arc::new(FakeApi {
            fail: true,
            ..fake()
        });

        assert!(SearchByName::new(api.clone())
            .search(&SearchRequest::by_name("Chicken Ham and Leek Pie"))
            .await
            .is_none());
        assert!(SearchByIngredient::new(api.clone())
            .search(&SearchRequest::by_ingredient("chicken breast"))
            .await
            .is_none());
        assert!(SearchRandom::new(api)
            .search(&SearchRequest::default())
            .await
            .is_none());
    }
}
