use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

use crate::planner::WeeklyPlan;
use crate::recipe::IngredientEntry;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShoppingListItem {
    pub id: u32,
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub checked: bool,
}

/// A derived, checkable shopping list. Checked state lives only as long as
/// the value; rebuilding from a plan starts every item unchecked.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

/// Builds the shopping list for a week.
///
/// Entries are de-duplicated on their lowercased `original` text, or on
/// `name-amount-unit` when there is none. The first occurrence wins and
/// quantities are never summed, so "2 eggs" and "3 eggs" stay separate lines.
pub fn aggregate(plan: &WeeklyPlan) -> ShoppingList {
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    let entries = plan
        .meals()
        .flat_map(|(_, _, recipe)| recipe.extended_ingredients.iter());

    for entry in entries {
        let name = entry.display_name();
        if !seen.insert(dedup_key(entry, &name)) {
            continue;
        }
        let mut quantity = format_quantity(entry.amount, entry.unit());
        if quantity.is_empty() {
            quantity = entry.original().unwrap_or_default().to_string();
        }
        items.push(ShoppingListItem {
            id: items.len() as u32 + 1,
            name: capitalize(&name),
            quantity,
            checked: false,
        });
    }

    tracing::debug!(items = items.len(), "aggregated shopping list");
    ShoppingList { items }
}

/// Aggregates whatever a store handed back. An absent plan or one that
/// failed to load gives an empty list rather than an error.
pub fn aggregate_stored<E: Display>(stored: Result<Option<WeeklyPlan>, E>) -> ShoppingList {
    match stored {
        Ok(Some(plan)) => aggregate(&plan),
        Ok(None) => ShoppingList::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not load weekly plan; shopping list is empty");
            ShoppingList::default()
        }
    }
}

fn dedup_key(entry: &IngredientEntry, display_name: &str) -> String {
    if let Some(original) = entry.original() {
        return original.to_lowercase();
    }
    let amount = entry
        .amount
        .filter(|a| *a != 0.0)
        .map(|a| a.to_string())
        .unwrap_or_default();
    format!("{}-{}-{}", display_name, amount, entry.unit().unwrap_or_default())
}

/// Whole amounts render without a decimal point, anything else with two
/// decimals. The unit follows after a space when present.
pub fn format_quantity(amount: Option<f64>, unit: Option<&str>) -> String {
    let unit = unit.filter(|u| !u.is_empty());
    let Some(amount) = amount else {
        return unit.unwrap_or_default().to_string();
    };
    // Adding zero turns -0.0 into 0.0.
    let amount = amount + 0.0;
    let amount = if amount.fract() == 0.0 {
        format!("{}", amount)
    } else {
        format!("{:.2}", amount)
    };
    match unit {
        Some(unit) => format!("{} {}", amount, unit),
        None => amount,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: u32) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flips the checked flag of item `id`. Returns the new state, or `None`
    /// if there is no such item.
    pub fn toggle(&mut self, id: u32) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    /// Drops every checked item, keeping the rest in order. Returns how many
    /// were removed.
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        before - self.items.len()
    }

    /// Appends a hand-written line. Blank names or quantities are refused.
    pub fn add_item(&mut self, name: &str, quantity: &str) -> Option<&ShoppingListItem> {
        let (name, quantity) = (name.trim(), quantity.trim());
        if name.is_empty() || quantity.is_empty() {
            return None;
        }
        let id = self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        self.items.push(ShoppingListItem {
            id,
            name: name.to_string(),
            quantity: quantity.to_string(),
            checked: false,
        });
        self.items.last()
    }
}
