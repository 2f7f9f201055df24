use std::cell::RefCell;

use crate::favorites::Favorites;
use crate::planner::WeeklyPlan;
use crate::quiz::QuizResults;

use super::{PlanStore, Result};

/// Keeps everything in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plan: RefCell<Option<WeeklyPlan>>,
    favorites: RefCell<Option<Favorites>>,
    quiz: RefCell<Option<QuizResults>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanStore for MemoryStore {
    fn load_plan(&self) -> Result<Option<WeeklyPlan>> {
        Ok(self.plan.borrow().clone())
    }

    fn save_plan(&self, plan: &WeeklyPlan) -> Result<()> {
        *self.plan.borrow_mut() = Some(plan.clone());
        Ok(())
    }

    fn load_favorites(&self) -> Result<Option<Favorites>> {
        Ok(self.favorites.borrow().clone())
    }

    fn save_favorites(&self, favorites: &Favorites) -> Result<()> {
        *self.favorites.borrow_mut() = Some(favorites.clone());
        Ok(())
    }

    fn load_quiz_results(&self) -> Result<Option<QuizResults>> {
        Ok(self.quiz.borrow().clone())
    }

    fn save_quiz_results(&self, results: &QuizResults) -> Result<()> {
        *self.quiz.borrow_mut() = Some(results.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_saved() {
        let store = MemoryStore::new();
        assert_eq!(store.plan_or_default().unwrap().planned_count(), 0);
        assert!(store.favorites_or_default().unwrap().is_empty());
        assert!(store.load_quiz_results().unwrap().is_none());
    }
}
