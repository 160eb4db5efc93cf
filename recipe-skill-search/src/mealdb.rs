//! TheMealDB HTTP client

use crate::base::{ApiResult, RecipeApi};
use async_trait::async_trait;
use recipe_skill_core::config::ApiConfig;
use recipe_skill_core::recipe::RecipeRecord;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SEARCH_ENDPOINT: &str = "search.php";
const RANDOM_ENDPOINT: &str = "random.php";
const FILTER_ENDPOINT: &str = "filter.php";

/// Client for TheMealDB JSON API
///
/// Every endpoint answers `{"meals": [...]}`, with `null` for no match.
/// Non-2xx statuses and a missing or non-array `meals` value are reported
/// as an empty result.
pub struct MealDbClient {
    client: Client,
    api_root: String,
}

impl MealDbClient {
    /// Create a client from the API configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_root: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.api_key
            ),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.api_root, name)
    }

    async fn fetch_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<Vec<RecipeRecord>> {
        let url = self.endpoint(endpoint);
        debug!(url = %url, ?query, "Requesting recipes");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Recipe API returned non-success status");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;
        Ok(extract_meals(data))
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    async fn lookup_by_name(&self, name: &str) -> ApiResult<Option<RecipeRecord>> {
        let meals = self.fetch_meals(SEARCH_ENDPOINT, &[("s", name)]).await?;
        Ok(meals.into_iter().next())
    }

    async fn lookup_random(&self) -> ApiResult<Option<RecipeRecord>> {
        let meals = self.fetch_meals(RANDOM_ENDPOINT, &[]).await?;
        Ok(meals.into_iter().next())
    }

    async fn filter_by_ingredient(&self, ingredient: &str) -> ApiResult<Vec<RecipeRecord>> {
        self.fetch_meals(FILTER_ENDPOINT, &[("i", ingredient)]).await
    }
}

fn extract_meals(data: Value) -> Vec<RecipeRecord> {
    let Value::Object(mut root) = data else {
        return Vec::new();
    };

    match root.remove("meals") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> MealDbClient {
        let config = ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        };
        MealDbClient::new(&config).unwrap()
    }

    #[test]
    fn test_extract_meals_shapes() {
        assert!(extract_meals(json!({"meals": null})).is_empty());
        assert!(extract_meals(json!({"meals": "Invalid ID"})).is_empty());
        assert!(extract_meals(json!([1, 2])).is_empty());

        let meals = extract_meals(json!({"meals": [{"strMeal": "Soup"}, 3]}));
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0]["strMeal"], "Soup");
    }

    #[tokio::test]
    async fn test_lookup_by_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/1/search.php")
            .match_query(Matcher::UrlEncoded("s".into(), "Arrabiata".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"meals": [
                    {"strMeal": "Spicy Arrabiata Penne", "strInstructions": "Boil pasta."},
                    {"strMeal": "Other"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let recipe = client.lookup_by_name("Arrabiata").await.unwrap().unwrap();

        assert_eq!(recipe["strMeal"], "Spicy Arrabiata Penne");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_by_name_no_match() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/search.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals":null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.lookup_by_name("Nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/random.php")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.lookup_random().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/random.php")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.lookup_random().await.is_err());
    }

    #[tokio::test]
    async fn test_filter_by_ingredient() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken_breast".into()))
            .with_status(200)
            .with_body(
                json!({"meals": [
                    {"strMeal": "Chicken Fajita Mac and Cheese", "idMeal": "52818"},
                    {"strMeal": "Chicken Ham and Leek Pie", "idMeal": "52875"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let meals = client.filter_by_ingredient("chicken_breast").await.unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[1]["idMeal"], "52875");
    }

    #[test]
    fn test_api_root_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://example.com/api/json/v1/".to_string(),
            api_key: "1".to_string(),
            timeout_secs: 5,
        };
        let client = MealDbClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("random.php"),
            "https://example.com/api/json/v1/1/random.php"
        );
    }
}
