pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, RecipeProvider, SpoonacularClient};
pub use endpoints::SearchFilters;
