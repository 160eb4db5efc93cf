//! Recipe lookup for recipe-skill
//!
//! This crate wraps TheMealDB behind the [`RecipeApi`] trait and builds the
//! by-name, by-ingredient and random search strategies on top of it.

pub mod base;
pub mod mealdb;
pub mod strategy;

pub use base::{ApiError, ApiResult, RecipeApi};
pub use mealdb::MealDbClient;
pub use strategy::{SearchByIngredient, SearchByName, SearchRandom, SearchRequest, SearchStrategy};
