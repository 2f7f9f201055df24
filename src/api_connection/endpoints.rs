use serde::{Deserialize, Serialize};

use crate::recipe::RecipeSummary;

pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_RESULT_COUNT: u32 = 20;

/// Marker some callers use for "no intolerances"; never sent to the API.
const NO_INTOLERANCE: &str = "none";

pub fn complex_search_path() -> &'static str {
    "/recipes/complexSearch"
}

pub fn recipe_information_path(id: u64) -> String {
    format!("/recipes/{}/information", id)
}

/// Filters for a recipe search. Unset fields are left out of the request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub query: String,
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub max_ready_time: Option<u32>,
    pub min_servings: Option<u32>,
    pub intolerances: Vec<String>,
    pub number: Option<u32>,
}

impl SearchFilters {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Query-string pairs for `complexSearch`, without the API key.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.trim().to_string()),
            ("number", self.number.unwrap_or(DEFAULT_RESULT_COUNT).to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("instructionsRequired", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ];
        if let Some(diet) = non_blank(&self.diet) {
            params.push(("diet", diet.to_string()));
        }
        if let Some(cuisine) = non_blank(&self.cuisine) {
            params.push(("cuisine", cuisine.to_string()));
        }
        if let Some(minutes) = self.max_ready_time {
            params.push(("maxReadyTime", minutes.to_string()));
        }
        if let Some(servings) = self.min_servings {
            params.push(("minServings", servings.to_string()));
        }
        let intolerances: Vec<&str> = self
            .intolerances
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty() && !i.eq_ignore_ascii_case(NO_INTOLERANCE))
            .collect();
        if !intolerances.is_empty() {
            params.push(("intolerances", intolerances.join(",")));
        }
        params
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    pub results: Vec<RecipeSummary>,
    pub offset: u32,
    pub number: u32,
    pub total_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_query() {
        let params = SearchFilters::query("pasta").to_query();
        assert_eq!(
            params,
            vec![
                ("query", "pasta".to_string()),
                ("number", "20".to_string()),
                ("addRecipeInformation", "true".to_string()),
                ("instructionsRequired", "true".to_string()),
                ("fillIngredients", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_filters_and_none_intolerance_dropped() {
        let filters = SearchFilters {
            query: "curry".to_string(),
            diet: Some("vegetarian".to_string()),
            cuisine: Some("Indian".to_string()),
            max_ready_time: Some(30),
            min_servings: Some(2),
            intolerances: vec!["none".to_string(), "dairy".to_string(), "peanut".to_string()],
            number: Some(3),
        };
        let params = filters.to_query();
        assert!(params.contains(&("number", "3".to_string())));
        assert!(params.contains(&("diet", "vegetarian".to_string())));
        assert!(params.contains(&("cuisine", "Indian".to_string())));
        assert!(params.contains(&("maxReadyTime", "30".to_string())));
        assert!(params.contains(&("minServings", "2".to_string())));
        assert!(params.contains(&("intolerances", "dairy,peanut".to_string())));
    }

    #[test]
    fn test_blank_diet_is_skipped() {
        let filters = SearchFilters {
            diet: Some("  ".to_string()),
            intolerances: vec!["None".to_string()],
            ..Default::default()
        };
        let params = filters.to_query();
        assert!(params.iter().all(|(k, _)| *k != "diet" && *k != "intolerances"));
    }

    #[test]
    fn test_search_response_parses() {
        let body = r#"{"results":[{"id":1,"title":"Pad Thai","image":"x.jpg","readyInMinutes":25,"servings":2,"cheap":true}],"offset":0,"number":1,"totalResults":87}"#;
        let response: ComplexSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_results, 87);
        assert_eq!(response.results[0].ready_in_minutes, Some(25));
    }
}
