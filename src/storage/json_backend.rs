use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::favorites::Favorites;
use crate::planner::WeeklyPlan;
use crate::quiz::QuizResults;

use super::{PlanStore, Result};

const MEAL_PLANS_KEY: &str = "mealPlans";
const FAVOURITES_KEY: &str = "userFavourites";
const QUIZ_RESULTS_KEY: &str = "quizResults";
const TMP_SUFFIX: &str = "tmp";

/// One pretty-printed JSON document per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() || data.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_string_pretty(value)?;
        let path = self.path_for(key);
        write_atomic(&path, &data)?;
        tracing::debug!(path = %path.display(), "saved {}", key);
        Ok(())
    }
}

impl PlanStore for JsonStore {
    fn load_plan(&self) -> Result<Option<WeeklyPlan>> {
        self.read(MEAL_PLANS_KEY)
    }

    fn save_plan(&self, plan: &WeeklyPlan) -> Result<()> {
        self.write(MEAL_PLANS_KEY, plan)
    }

    fn load_favorites(&self) -> Result<Option<Favorites>> {
        self.read(FAVOURITES_KEY)
    }

    fn save_favorites(&self, favorites: &Favorites) -> Result<()> {
        self.write(FAVOURITES_KEY, favorites)
    }

    fn load_quiz_results(&self) -> Result<Option<QuizResults>> {
        self.read(QUIZ_RESULTS_KEY)
    }

    fn save_quiz_results(&self, results: &QuizResults) -> Result<()> {
        self.write(QUIZ_RESULTS_KEY, results)
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(TMP_SUFFIX);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
