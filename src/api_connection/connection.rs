use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::{Client, Request};
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{
    complex_search_path, recipe_information_path, ComplexSearchResponse, SearchFilters,
};
use crate::config::Config;
use crate::recipe::{Recipe, RecipeSummary};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    NotFound(u64),
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::NotFound(id) => write!(f, "Recipe {} not found", id),
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

/// Source of recipes for the planner.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn search(&self, filters: &SearchFilters)
        -> Result<Vec<RecipeSummary>, ApiConnectionError>;

    async fn get_by_id(&self, id: u64) -> Result<Recipe, ApiConnectionError>;
}

/// HTTP client for the Spoonacular recipe API. Holds the *name* of the
/// environment variable carrying the key; the key itself is read per call.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
    api_key_env_var: String,
}

impl SpoonacularClient {
    pub fn new(base_url: impl Into<String>, api_key_env_var: &str) -> Self {
        dotenv().ok();
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_env_var: api_key_env_var.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), &config.api_key_env_var)
    }

    fn api_key(&self) -> Result<String, ApiConnectionError> {
        env::var(&self.api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(self.api_key_env_var.clone()))
    }

    pub fn search_request(&self, filters: &SearchFilters) -> Result<Request, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, complex_search_path());
        let request = self
            .http
            .get(url)
            .query(&[("apiKey", api_key.as_str())])
            .query(&filters.to_query())
            .build()?;
        Ok(request)
    }

    pub fn information_request(&self, id: u64) -> Result<Request, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, recipe_information_path(id));
        let request = self
            .http
            .get(url)
            .query(&[("apiKey", api_key.as_str())])
            .build()?;
        Ok(request)
    }

    async fn execute(&self, request: Request) -> Result<String, ApiConnectionError> {
        tracing::debug!(path = request.url().path(), "calling recipe API");
        let response = self.http.execute(request).await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::warn!(%status, "recipe API returned an error");
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<RecipeSummary>, ApiConnectionError> {
        let request = self.search_request(filters)?;
        let body = self.execute(request).await?;
        let response: ComplexSearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            results = response.results.len(),
            total = response.total_results,
            "search complete"
        );
        Ok(response.results)
    }

    async fn get_by_id(&self, id: u64) -> Result<Recipe, ApiConnectionError> {
        let request = self.information_request(id)?;
        match self.execute(request).await {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(ApiConnectionError::ApiError { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                Err(ApiConnectionError::NotFound(id))
            }
            Err(e) => Err(e),
        }
    }
}
