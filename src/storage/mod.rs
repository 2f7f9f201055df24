pub mod json_backend;
pub mod memory;

use thiserror::Error;

use crate::favorites::Favorites;
use crate::planner::WeeklyPlan;
use crate::quiz::QuizResults;

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Where the planner keeps its state between runs. `Ok(None)` means nothing
/// has been saved yet.
pub trait PlanStore {
    fn load_plan(&self) -> Result<Option<WeeklyPlan>>;
    fn save_plan(&self, plan: &WeeklyPlan) -> Result<()>;

    fn load_favorites(&self) -> Result<Option<Favorites>>;
    fn save_favorites(&self, favorites: &Favorites) -> Result<()>;

    fn load_quiz_results(&self) -> Result<Option<QuizResults>>;
    fn save_quiz_results(&self, results: &QuizResults) -> Result<()>;

    /// The saved plan, or an empty week when there is none.
    fn plan_or_default(&self) -> Result<WeeklyPlan> {
        Ok(self.load_plan()?.unwrap_or_default())
    }

    fn favorites_or_default(&self) -> Result<Favorites> {
        Ok(self.load_favorites()?.unwrap_or_default())
    }
}
