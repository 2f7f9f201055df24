use serde::{Deserialize, Deserializer, Serialize};

/// One ingredient line as returned by the recipe API's `extendedIngredients`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct IngredientEntry {
    /// The API sends `-1` for ingredients it could not identify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub name_clean: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub original: Option<String>,
}

impl IngredientEntry {
    /// Lowercased name used on the shopping list: `nameClean`, then `name`,
    /// then the free-text `original` when the entry carries no name at all.
    pub fn display_name(&self) -> String {
        non_blank(&self.name_clean)
            .or_else(|| non_blank(&self.name))
            .or_else(|| non_blank(&self.original))
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn unit(&self) -> Option<&str> {
        non_blank(&self.unit)
    }

    pub fn original(&self) -> Option<&str> {
        non_blank(&self.original)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Reads `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InstructionBlock {
    pub name: String,
    pub steps: Vec<InstructionStep>,
}

/// A recipe as stored in a meal slot. Only the fields the planner keeps are
/// modelled; anything else the API sends is dropped on deserialization.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<IngredientEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<InstructionBlock>,
}

impl Recipe {
    /// Instruction steps flattened across blocks, in order.
    pub fn steps(&self) -> impl Iterator<Item = &InstructionStep> {
        self.analyzed_instructions.iter().flat_map(|block| block.steps.iter())
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
        }
    }
}

/// Search hit / favorite: the recipe without ingredients or instructions.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
}
