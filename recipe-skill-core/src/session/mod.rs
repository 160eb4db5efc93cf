//! Per-user recipe sessions
//!
//! A session tracks which recipe a user last found and which instruction
//! step they are on. Sessions live in memory for the lifetime of the process.

pub mod manager;
pub mod store;

pub use manager::{SessionStore, SharedSession};
pub use store::RecipeSession;
