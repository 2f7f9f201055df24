use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::SPOONACULAR_BASE_URL;

pub const API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "SPOONACULAR_BASE_URL";
pub const DATA_DIR_ENV_VAR: &str = "PLATE_UP_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".plate_up";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the variable holding the API key, not the key itself.
    pub api_key_env_var: String,
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            base_url: SPOONACULAR_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    /// Defaults overridden by the environment, after loading any `.env` file.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key_env_var: defaults.api_key_env_var,
            base_url: present(BASE_URL_ENV_VAR).unwrap_or(defaults.base_url),
            data_dir: present(DATA_DIR_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://api.spoonacular.com");
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            (BASE_URL_ENV_VAR, "http://localhost:9000"),
            (DATA_DIR_ENV_VAR, "/tmp/plates"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/plates"));
    }

    #[test]
    fn test_flag_beats_environment() {
        let config = Config::from_lookup(|key| {
            (key == DATA_DIR_ENV_VAR).then(|| "/from/env".to_string())
        })
        .with_data_dir(Some(PathBuf::from("/from/flag")));
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
    }
}
