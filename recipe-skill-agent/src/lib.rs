//! Skill logic for recipe-skill
//!
//! This crate provides the intent handlers and the loop that feeds them
//! from the message bus.

pub mod skill;
pub mod skill_loop;

pub use skill::RecipeSkill;
pub use skill_loop::SkillLoop;
