//! Core types and state for recipe-skill
//!
//! This crate holds the per-user recipe session state machine, the derived
//! recipe views, dialog templates, the intent/dialog message bus and the
//! configuration and logging setup shared by the other recipe-skill crates.

pub mod bus;
pub mod config;
pub mod dialog;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod session;

pub use error::{Error, Result};
