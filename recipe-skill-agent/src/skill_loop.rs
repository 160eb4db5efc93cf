//! Skill loop: feeds intents from the bus to the skill

use recipe_skill_core::bus::MessageBus;
use recipe_skill_core::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

use crate::skill::RecipeSkill;

/// Processes intents one at a time, each to completion
pub struct SkillLoop {
    bus: MessageBus,
    skill: Arc<RecipeSkill>,
}

impl SkillLoop {
    /// Create a new skill loop
    pub fn new(bus: MessageBus, skill: Arc<RecipeSkill>) -> Self {
        Self { bus, skill }
    }

    /// Run until `shutdown` resolves.
    ///
    /// Intents already queued when `shutdown` fires are still handled.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let Some(mut inbound_rx) = self.bus.take_inbound_receiver().await else {
            error!("Failed to take inbound receiver");
            return Err(Error::Channel("Inbound receiver already taken".to_string()));
        };

        info!("Skill loop started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                msg = inbound_rx.recv() => match msg {
                    Some(msg) => self.skill.handle(msg).await,
                    None => {
                        info!("Intent queue closed, stopping skill loop");
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping skill loop");
                    break;
                }
            }
        }

        Ok(())
    }
}
