//! Base trait for recipe lookup APIs

use async_trait::async_trait;
use recipe_skill_core::recipe::RecipeRecord;
use thiserror::Error;

/// Error type for recipe API operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only recipe lookup API
///
/// An empty result is `Ok(None)` / `Ok(vec![])`; errors are reserved for
/// transport and decoding failures.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Find the first recipe whose name matches
    async fn lookup_by_name(&self, name: &str) -> ApiResult<Option<RecipeRecord>>;

    /// Fetch one random recipe
    async fn lookup_random(&self) -> ApiResult<Option<RecipeRecord>>;

    /// List recipe summaries whose main ingredient matches
    async fn filter_by_ingredient(&self, ingredient: &str) -> ApiResult<Vec<RecipeRecord>>;
}
