//! Message bus between the host runtime and the skill
//!
//! Intents flow in, spoken dialogs flow out.

pub mod events;
pub mod queue;

pub use events::{Intent, IntentMessage};
pub use queue::MessageBus;
