use thiserror::Error;

use crate::api_connection::{ApiConnectionError, RecipeProvider, SearchFilters};
use crate::favorites::{FavoriteStats, Favorites};
use crate::planner::{Day, DayPlan, MealType, PlanError, WeeklyPlan};
use crate::quiz::{QuizAnswers, QuizError, QuizResults};
use crate::recipe::{Recipe, RecipeSummary};
use crate::shopping_list::{aggregate_stored, ShoppingList};
use crate::storage::{PlanStore, StorageError};

/// Favorites shown on the home page.
pub const RECENT_FAVORITES: usize = 4;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiConnectionError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary {
    pub today: Day,
    pub todays_meals: DayPlan,
    pub meals_planned: usize,
    pub saved_recipes: usize,
    pub recent_favorites: Vec<RecipeSummary>,
}

impl HomeSummary {
    pub fn build(plan: &WeeklyPlan, favorites: &Favorites, today: Day) -> Self {
        Self {
            today,
            todays_meals: plan.day(today).clone(),
            meals_planned: plan.planned_count(),
            saved_recipes: favorites.len(),
            recent_favorites: favorites.recent(RECENT_FAVORITES).to_vec(),
        }
    }
}

/// The planner's use cases, wired to a store and a recipe source.
pub struct PlateUp<S, P> {
    store: S,
    provider: P,
}

impl<S: PlanStore, P: RecipeProvider> PlateUp<S, P> {
    pub fn new(store: S, provider: P) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn plan(&self) -> Result<WeeklyPlan> {
        Ok(self.store.plan_or_default()?)
    }

    /// Fetches the recipe and puts it in the slot, replacing what was there.
    pub async fn plan_recipe(&self, day: Day, meal: MealType, recipe_id: u64) -> Result<Recipe> {
        let recipe = self.provider.get_by_id(recipe_id).await?;
        let mut plan = self.plan()?;
        plan.assign(day, meal, recipe.clone());
        self.store.save_plan(&plan)?;
        tracing::info!(%day, %meal, recipe_id, "planned recipe");
        Ok(recipe)
    }

    pub fn remove_meal(&self, day: Day, meal: MealType) -> Result<Option<Recipe>> {
        let mut plan = self.plan()?;
        let removed = plan.remove(day, meal);
        if removed.is_some() {
            self.store.save_plan(&plan)?;
            tracing::info!(%day, %meal, "removed meal");
        }
        Ok(removed)
    }

    pub fn clear_plan(&self) -> Result<()> {
        self.store.save_plan(&WeeklyPlan::new())?;
        Ok(())
    }

    /// Never fails: an unreadable plan gives an empty list.
    pub fn shopping_list(&self) -> ShoppingList {
        aggregate_stored(self.store.load_plan())
    }

    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<RecipeSummary>> {
        Ok(self.provider.search(filters).await?)
    }

    pub fn favorites(&self) -> Result<Favorites> {
        Ok(self.store.favorites_or_default()?)
    }

    /// Looks the recipe up and saves it. Returns `false` if it was already
    /// a favorite.
    pub async fn add_favorite(&self, recipe_id: u64) -> Result<bool> {
        let mut favorites = self.favorites()?;
        if favorites.contains(recipe_id) {
            return Ok(false);
        }
        let recipe = self.provider.get_by_id(recipe_id).await?;
        favorites.add(recipe.summary());
        self.store.save_favorites(&favorites)?;
        Ok(true)
    }

    pub fn toggle_favorite(&self, recipe: RecipeSummary) -> Result<bool> {
        let mut favorites = self.favorites()?;
        let favorited = favorites.toggle(recipe);
        self.store.save_favorites(&favorites)?;
        Ok(favorited)
    }

    pub fn remove_favorite(&self, recipe_id: u64) -> Result<Option<RecipeSummary>> {
        let mut favorites = self.favorites()?;
        let removed = favorites.remove(recipe_id);
        if removed.is_some() {
            self.store.save_favorites(&favorites)?;
        }
        Ok(removed)
    }

    pub fn favorite_stats(&self) -> Result<FavoriteStats> {
        Ok(self.favorites()?.stats())
    }

    pub fn save_quiz(&self, answers: QuizAnswers) -> Result<QuizResults> {
        let results = answers.finish()?;
        self.store.save_quiz_results(&results)?;
        tracing::info!("saved quiz results");
        Ok(results)
    }

    pub fn quiz_results(&self) -> Result<Option<QuizResults>> {
        Ok(self.store.load_quiz_results()?)
    }

    pub fn home(&self, today: Day) -> HomeSummary {
        // The home page still renders when stored data is unreadable.
        let plan = self.store.load_plan().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load weekly plan");
            None
        });
        let favorites = self.store.load_favorites().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load favourites");
            None
        });
        HomeSummary::build(
            &plan.unwrap_or_default(),
            &favorites.unwrap_or_default(),
            today,
        )
    }
}
