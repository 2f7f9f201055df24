use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::recipe::Recipe;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("unknown meal type: {0}")]
    UnknownMealType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Plan iteration order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }

    pub fn today() -> Self {
        Self::from_weekday(Local::now().weekday())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Day {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| PlanError::UnknownDay(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|meal| meal.as_str() == wanted)
            .ok_or_else(|| PlanError::UnknownMealType(s.to_string()))
    }
}

/// The three slots of one day. Missing slots deserialize as empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DayPlan {
    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
}

impl DayPlan {
    pub fn slot(&self, meal: MealType) -> Option<&Recipe> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    fn slot_mut(&mut self, meal: MealType) -> &mut Option<Recipe> {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Slots in breakfast, lunch, dinner order.
    pub fn meals(&self) -> impl Iterator<Item = (MealType, Option<&Recipe>)> {
        MealType::ALL.into_iter().map(move |meal| (meal, self.slot(meal)))
    }

    pub fn planned_count(&self) -> usize {
        self.meals().filter(|(_, recipe)| recipe.is_some()).count()
    }
}

/// A week of meals keyed by day name. All seven days are always present,
/// so a stored plan missing some of them loads with those days empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WeeklyPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    fn day_mut(&mut self, day: Day) -> &mut DayPlan {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &DayPlan)> {
        Day::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    pub fn slot(&self, day: Day, meal: MealType) -> Option<&Recipe> {
        self.day(day).slot(meal)
    }

    /// Puts `recipe` in the slot, returning whatever was there before.
    pub fn assign(&mut self, day: Day, meal: MealType, recipe: Recipe) -> Option<Recipe> {
        self.day_mut(day).slot_mut(meal).replace(recipe)
    }

    pub fn remove(&mut self, day: Day, meal: MealType) -> Option<Recipe> {
        self.day_mut(day).slot_mut(meal).take()
    }

    pub fn planned_count(&self) -> usize {
        self.days().map(|(_, plan)| plan.planned_count()).sum()
    }

    /// Every assigned recipe in day, then slot order.
    pub fn meals(&self) -> impl Iterator<Item = (Day, MealType, &Recipe)> {
        self.days().flat_map(|(day, plan)| {
            plan.meals()
                .filter_map(move |(meal, recipe)| recipe.map(|r| (day, meal, r)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: u64, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_plan_has_every_slot_empty() {
        let plan = WeeklyPlan::new();
        assert_eq!(plan.days().count(), 7);
        assert_eq!(plan.planned_count(), 0);
        let json = serde_json::to_value(&plan).unwrap();
        for day in Day::ALL {
            for meal in MealType::ALL {
                assert!(json[day.as_str()][meal.as_str()].is_null());
            }
        }
    }

    #[test]
    fn test_assign_and_remove() {
        let mut plan = WeeklyPlan::new();
        assert!(plan.assign(Day::Monday, MealType::Lunch, recipe(1, "Soup")).is_none());
        let previous = plan.assign(Day::Monday, MealType::Lunch, recipe(2, "Salad"));
        assert_eq!(previous.map(|r| r.id), Some(1));
        assert_eq!(plan.slot(Day::Monday, MealType::Lunch).map(|r| r.id), Some(2));
        assert_eq!(plan.planned_count(), 1);

        let removed = plan.remove(Day::Monday, MealType::Lunch);
        assert_eq!(removed.map(|r| r.title), Some("Salad".to_string()));
        assert!(plan.slot(Day::Monday, MealType::Lunch).is_none());
        assert!(plan.remove(Day::Monday, MealType::Lunch).is_none());
    }

    #[test]
    fn test_partial_stored_plan_fills_missing_days() {
        let stored = r#"{"tuesday": {"dinner": {"id": 7, "title": "Stew"}}}"#;
        let plan: WeeklyPlan = serde_json::from_str(stored).unwrap();
        assert_eq!(plan.planned_count(), 1);
        assert_eq!(plan.slot(Day::Tuesday, MealType::Dinner).map(|r| r.id), Some(7));
        assert!(plan.slot(Day::Sunday, MealType::Breakfast).is_none());
    }

    #[test]
    fn test_meals_iterate_in_plan_order() {
        let mut plan = WeeklyPlan::new();
        plan.assign(Day::Sunday, MealType::Breakfast, recipe(3, "Pancakes"));
        plan.assign(Day::Monday, MealType::Dinner, recipe(2, "Curry"));
        plan.assign(Day::Monday, MealType::Breakfast, recipe(1, "Oats"));
        let order: Vec<u64> = plan.meals().map(|(_, _, r)| r.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_day_and_meal_names() {
        assert_eq!("Friday".parse::<Day>(), Ok(Day::Friday));
        assert_eq!(" DINNER ".parse::<MealType>(), Ok(MealType::Dinner));
        assert_eq!(
            "someday".parse::<Day>(),
            Err(PlanError::UnknownDay("someday".to_string()))
        );
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_from_weekday() {
        assert_eq!(Day::from_weekday(Weekday::Sun), Day::Sunday);
        assert_eq!(Day::from_weekday(Weekday::Wed), Day::Wednesday);
    }
}
