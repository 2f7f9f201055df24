use async_trait::async_trait;
use dotenv::dotenv;
use plate_up::api_connection::{ApiConnectionError, RecipeProvider, SearchFilters, SpoonacularClient};
use plate_up::config::API_KEY_ENV_VAR;
use std::env;

const TEST_BASE_URL: &str = "https://api.spoonacular.com";

fn setup_test_environment() {
    dotenv().ok();
}

#[tokio::test]
async fn test_missing_api_key_error() {
    setup_test_environment();
    let client = SpoonacularClient::new(TEST_BASE_URL, "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let result = client.search(&SearchFilters::query("pasta")).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
    if let Err(ApiConnectionError::MissingApiKey(key_name)) = result {
        assert_eq!(key_name, "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    }

    let result = client.get_by_id(716429).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
}

#[test]
fn test_search_request_carries_key_and_filters() {
    const KEY_VAR: &str = "PLATE_UP_TEST_KEY_FOR_SEARCH_REQUEST";
    unsafe {
        std::env::set_var(KEY_VAR, "abc123");
    }
    let client = SpoonacularClient::new("http://localhost:8080/", KEY_VAR);
    let filters = SearchFilters {
        query: "chili".to_string(),
        cuisine: Some("Mexican".to_string()),
        intolerances: vec!["dairy".to_string(), "gluten".to_string()],
        ..Default::default()
    };
    let request = client.search_request(&filters).unwrap();
    let url = request.url();
    assert_eq!(url.path(), "/recipes/complexSearch");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs[0], ("apiKey".to_string(), "abc123".to_string()));
    assert!(pairs.contains(&("query".to_string(), "chili".to_string())));
    assert!(pairs.contains(&("cuisine".to_string(), "Mexican".to_string())));
    assert!(pairs.contains(&("intolerances".to_string(), "dairy,gluten".to_string())));
    assert!(pairs.contains(&("fillIngredients".to_string(), "true".to_string())));
    unsafe {
        std::env::remove_var(KEY_VAR);
    }
}

#[test]
fn test_information_request_path() {
    const KEY_VAR: &str = "PLATE_UP_TEST_KEY_FOR_INFO_REQUEST";
    unsafe {
        std::env::set_var(KEY_VAR, "xyz");
    }
    let client = SpoonacularClient::new(TEST_BASE_URL, KEY_VAR);
    let request = client.information_request(42).unwrap();
    assert_eq!(request.url().path(), "/recipes/42/information");
    assert_eq!(request.url().query(), Some("apiKey=xyz"));
    unsafe {
        std::env::remove_var(KEY_VAR);
    }
}

struct AlwaysDown;

#[async_trait]
impl RecipeProvider for AlwaysDown {
    async fn search(
        &self,
        _filters: &SearchFilters,
    ) -> Result<Vec<plate_up::recipe::RecipeSummary>, ApiConnectionError> {
        Err(ApiConnectionError::ApiError {
            status: reqwest::StatusCode::PAYMENT_REQUIRED,
            error_body: "daily quota used".to_string(),
        })
    }

    async fn get_by_id(&self, id: u64) -> Result<plate_up::recipe::Recipe, ApiConnectionError> {
        Err(ApiConnectionError::NotFound(id))
    }
}

#[tokio::test]
async fn test_provider_errors_display() {
    let provider = AlwaysDown;
    let err = provider.search(&SearchFilters::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 402 Payment Required: daily quota used");
    let err = provider.get_by_id(9).await.unwrap_err();
    assert_eq!(err.to_string(), "Recipe 9 not found");
}

#[tokio::test]
#[ignore]
async fn test_live_search_and_lookup() {
    setup_test_environment();
    if env::var(API_KEY_ENV_VAR).is_err() {
        println!("Skipping test_live_search_and_lookup: {} not set.", API_KEY_ENV_VAR);
        return;
    }

    let client = SpoonacularClient::new(TEST_BASE_URL, API_KEY_ENV_VAR);
    let filters = SearchFilters {
        query: "pasta".to_string(),
        number: Some(2),
        ..Default::default()
    };
    let results = client.search(&filters).await;
    assert!(results.is_ok(), "API call failed: {:?}", results.err());
    let results = results.unwrap();
    assert!(!results.is_empty());

    let recipe = client.get_by_id(results[0].id).await.unwrap();
    assert_eq!(recipe.id, results[0].id);
    assert!(!recipe.extended_ingredients.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_api_error_with_invalid_key() {
    setup_test_environment();

    const INVALID_KEY_ENV_NAME_FOR_THIS_TEST: &str = "ENV_VAR_WITH_BAD_SPOONACULAR_KEY";
    unsafe {
        std::env::set_var(INVALID_KEY_ENV_NAME_FOR_THIS_TEST, "this_is_a_deliberately_bad_api_key");
    }

    let client = SpoonacularClient::new(TEST_BASE_URL, INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    let result = client.search(&SearchFilters::query("soup")).await;
    assert!(matches!(result, Err(ApiConnectionError::ApiError { .. })), "Expected ApiError, got {:?}", result);
    if let Err(ApiConnectionError::ApiError { status, .. }) = result {
        assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    }

    unsafe {
        std::env::remove_var(INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    }
}
