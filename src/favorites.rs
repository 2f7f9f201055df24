use serde::{Deserialize, Serialize};

use crate::recipe::RecipeSummary;

/// Saved recipes, oldest first. Ids are unique within the collection.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Favorites {
    recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct FavoriteStats {
    pub total_favourites: usize,
    pub total_cook_time_hours: f64,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeSummary> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.recipes.iter().any(|fav| fav.id == id)
    }

    /// Returns `false` if a recipe with the same id is already saved.
    pub fn add(&mut self, recipe: RecipeSummary) -> bool {
        if self.contains(recipe.id) {
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    pub fn remove(&mut self, id: u64) -> Option<RecipeSummary> {
        let index = self.recipes.iter().position(|fav| fav.id == id)?;
        Some(self.recipes.remove(index))
    }

    /// Saves the recipe if it isn't saved yet, otherwise removes it.
    /// Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, recipe: RecipeSummary) -> bool {
        if self.remove(recipe.id).is_some() {
            false
        } else {
            self.recipes.push(recipe);
            true
        }
    }

    pub fn recent(&self, n: usize) -> &[RecipeSummary] {
        &self.recipes[..n.min(self.recipes.len())]
    }

    pub fn stats(&self) -> FavoriteStats {
        let minutes: u64 = self
            .recipes
            .iter()
            .map(|fav| u64::from(fav.ready_in_minutes.unwrap_or(0)))
            .sum();
        let hours = minutes as f64 / 60.0;
        FavoriteStats {
            total_favourites: self.recipes.len(),
            total_cook_time_hours: (hours * 10.0).round() / 10.0,
        }
    }
}
