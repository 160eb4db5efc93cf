//! Recipe skill: one handler per intent
//!
//! Handlers never return a value. Every outcome, including failures, is a
//! dialog spoken through the [`DialogSink`]. Navigation bounds are checked
//! here rather than in [`RecipeSession`], which stays a plain state holder.

use recipe_skill_core::bus::{Intent, IntentMessage};
use recipe_skill_core::config::SpeechConfig;
use recipe_skill_core::dialog::{DialogSink, DialogTemplate, SpokenDialog};
use recipe_skill_core::recipe::{self, RecipeRecord};
use recipe_skill_core::session::{RecipeSession, SessionStore};
use recipe_skill_search::{
    RecipeApi, SearchByIngredient, SearchByName, SearchRandom, SearchRequest, SearchStrategy,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

/// The recipe skill
pub struct RecipeSkill {
    sessions: Arc<SessionStore>,
    sink: Arc<dyn DialogSink>,
    by_name: Arc<dyn SearchStrategy>,
    by_ingredient: Arc<dyn SearchStrategy>,
    random: Arc<dyn SearchStrategy>,
    default_meal_label: String,
    beautify_units: bool,
}

impl RecipeSkill {
    /// Create a skill searching `api` and speaking through `sink`
    pub fn new(
        api: Arc<dyn RecipeApi>,
        sink: Arc<dyn DialogSink>,
        sessions: Arc<SessionStore>,
        speech: &SpeechConfig,
    ) -> Self {
        Self {
            sessions,
            sink,
            by_name: Arc::new(SearchByName::new(Arc::clone(&api))),
            by_ingredient: Arc::new(SearchByIngredient::new(Arc::clone(&api))),
            random: Arc::new(SearchRandom::new(api)),
            default_meal_label: speech.default_meal_label.clone(),
            beautify_units: speech.beautify_units,
        }
    }

    /// The session store backing this skill
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Dispatch one intent to its handler
    pub async fn handle(&self, msg: IntentMessage) {
        let span = info_span!(
            "intent",
            trace_id = %msg.id,
            user = %msg.user,
            intent = msg.intent.name()
        );

        async {
            info!("Handling intent");
            let user = msg.user.as_str();
            match &msg.intent {
                Intent::SearchByName { recipe_name } => {
                    self.handle_search_by_name(user, recipe_name).await
                }
                Intent::SearchByIngredient { ingredient } => {
                    self.handle_search_by_ingredient(user, ingredient).await
                }
                Intent::SearchRandom => self.handle_search_random(user).await,
                Intent::RecipeName => self.handle_get_recipe_name(user),
                Intent::ReciteInstructions => self.handle_recite_instructions(user),
                Intent::Ingredients => self.handle_get_ingredients(user),
                Intent::CurrentStep => self.handle_get_current_step(user),
                Intent::PreviousStep => self.handle_get_previous_step(user),
                Intent::NextStep => self.handle_get_next_step(user),
            }
        }
        .instrument(span)
        .await
    }

    pub async fn handle_search_by_name(&self, user: &str, recipe_name: &str) {
        let request = SearchRequest::by_name(recipe_name);
        self.search(user, self.by_name.as_ref(), &request).await;
    }

    pub async fn handle_search_by_ingredient(&self, user: &str, ingredient: &str) {
        let request = SearchRequest::by_ingredient(ingredient);
        self.search(user, self.by_ingredient.as_ref(), &request).await;
    }

    pub async fn handle_search_random(&self, user: &str) {
        self.search(user, self.random.as_ref(), &SearchRequest::default()).await;
    }

    pub fn handle_get_recipe_name(&self, user: &str) {
        let name = self.sessions.lookup(user).and_then(|shared| {
            let session = shared.lock();
            recipe::meal_name(session.data()).map(ToString::to_string)
        });

        match name {
            Some(recipe_name) => self.speak(
                SpokenDialog::new(user, DialogTemplate::CurrentRecipe)
                    .with("recipe_name", recipe_name),
            ),
            None => self.speak(SpokenDialog::new(user, DialogTemplate::NoRecipe)),
        }
    }

    pub fn handle_recite_instructions(&self, user: &str) {
        let Some(shared) = self.sessions.lookup(user) else {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoInstructions));
            return;
        };

        let mut session = shared.lock();
        let instructions = session.instructions();
        if instructions.is_empty() {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoInstructions));
            return;
        }

        for (index, step) in instructions.into_iter().enumerate() {
            session.advance_to(index);
            self.speak(SpokenDialog::new(user, DialogTemplate::ReciteStep).with("step", step));
        }
    }

    pub fn handle_get_ingredients(&self, user: &str) {
        let Some(shared) = self.sessions.lookup(user) else {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoIngredients));
            return;
        };

        let dialog = {
            let session = shared.lock();
            self.you_will_need(user, session.data())
        };
        match dialog {
            Some(dialog) => self.speak(dialog),
            None => self.speak(SpokenDialog::new(user, DialogTemplate::NoIngredients)),
        }
    }

    pub fn handle_get_current_step(&self, user: &str) {
        let Some(shared) = self.sessions.lookup(user) else {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoInstructions));
            return;
        };

        let session = shared.lock();
        let instructions = session.instructions();
        match instructions.get(session.current_index()) {
            Some(step) => self.speak(
                SpokenDialog::new(user, DialogTemplate::CurrentStep)
                    .with("recipe_name", session.meal_name_or(&self.default_meal_label))
                    .with("step", step.as_str()),
            ),
            None => self.speak(SpokenDialog::new(user, DialogTemplate::NoInstructions)),
        }
    }

    pub fn handle_get_previous_step(&self, user: &str) {
        let Some(shared) = self.sessions.lookup(user) else {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoPreviousStep));
            return;
        };

        let mut session = shared.lock();
        let cursor = session.current_index();
        // Guards the index underflow of cursor - 1
        if cursor == 0 {
            debug!("Already on the first step");
            self.speak(SpokenDialog::new(user, DialogTemplate::NoPreviousStep));
            return;
        }

        let previous = cursor - 1;
        let instructions = session.instructions();
        match instructions.get(previous) {
            Some(step) => {
                self.speak(
                    SpokenDialog::new(user, DialogTemplate::PreviousStep)
                        .with("recipe_name", session.meal_name_or(&self.default_meal_label))
                        .with("step", step.as_str()),
                );
                session.advance_to(previous);
            }
            None => self.speak(SpokenDialog::new(user, DialogTemplate::NoPreviousStep)),
        }
    }

    pub fn handle_get_next_step(&self, user: &str) {
        let Some(shared) = self.sessions.lookup(user) else {
            self.speak(SpokenDialog::new(user, DialogTemplate::NoNextSteps));
            return;
        };

        let mut session = shared.lock();
        let next = session.current_index() + 1;
        let instructions = session.instructions();
        match instructions.get(next) {
            Some(step) => {
                self.speak(
                    SpokenDialog::new(user, DialogTemplate::NextStep)
                        .with("recipe_name", session.meal_name_or(&self.default_meal_label))
                        .with("step", step.as_str()),
                );
                session.advance_to(next);
            }
            None => {
                debug!(cursor = next - 1, steps = instructions.len(), "No next step");
                self.speak(SpokenDialog::new(user, DialogTemplate::NoNextSteps));
            }
        }
    }

    /// Run a search strategy and hand its result to [`Self::after_search`]
    async fn search(&self, user: &str, strategy: &dyn SearchStrategy, request: &SearchRequest) {
        debug!(strategy = strategy.name(), "Searching for recipe");
        let recipe = strategy.search(request).await;
        self.after_search(user, recipe);
    }

    /// Store a found recipe as the user's new session and read out the
    /// ingredients, or report that the search failed.
    pub fn after_search(&self, user: &str, recipe: Option<RecipeRecord>) {
        let Some(record) = recipe else {
            info!("Search found no recipe");
            self.speak(SpokenDialog::new(user, DialogTemplate::SearchFailed));
            return;
        };

        let dialog = self.you_will_need(user, &record).unwrap_or_else(|| {
            SpokenDialog::new(user, DialogTemplate::YouWillNeed)
                .with(
                    "recipe_name",
                    recipe::meal_name(&record).unwrap_or(&self.default_meal_label),
                )
                .with("ingredients", Value::Null)
        });

        info!(
            recipe_name = recipe::meal_name(&record).unwrap_or_default(),
            "Starting new recipe session"
        );
        self.sessions.assign(user, RecipeSession::new(record));
        self.speak(dialog);
    }

    /// `YouWillNeed` dialog for a record, or `None` if it lists no ingredients
    fn you_will_need(&self, user: &str, record: &RecipeRecord) -> Option<SpokenDialog> {
        let mut ingredients = recipe::ingredients(record);
        if self.beautify_units {
            ingredients.beautify();
        }
        let phrase = ingredients.to_phrase()?;

        Some(
            SpokenDialog::new(user, DialogTemplate::YouWillNeed)
                .with(
                    "recipe_name",
                    recipe::meal_name(record).unwrap_or(&self.default_meal_label),
                )
                .with("ingredients", phrase),
        )
    }

    fn speak(&self, dialog: SpokenDialog) {
        debug!(template = %dialog.template, "Speaking dialog");
        self.sink.speak(dialog);
    }
}
