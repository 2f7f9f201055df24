use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::api_connection::SearchFilters;
use crate::planner::{Day, MealType};
use crate::quiz::{QuizAnswers, QuizError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the saved plan, favourites and quiz results
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or edit the weekly meal plan
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Build the shopping list from the current plan
    ShoppingList(ShoppingListArgs),
    /// Manage saved recipes
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Search recipes
    Search(SearchArgs),
    /// Preference quiz
    #[command(subcommand)]
    Quiz(QuizCommand),
    /// Today's meals and quick stats
    Home,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    Show,
    /// Put a recipe in a slot
    Set {
        day: Day,
        meal: MealType,
        recipe_id: u64,
    },
    /// Empty a slot
    Remove { day: Day, meal: MealType },
    /// Empty every slot
    Clear,
}

#[derive(Args, Debug)]
pub struct ShoppingListArgs {
    /// Mark an item as bought (repeatable)
    #[arg(long = "check", value_name = "ID")]
    pub check: Vec<u32>,
    /// Drop checked items before printing
    #[arg(long)]
    pub clear_checked: bool,
    /// Append an item by hand
    #[arg(long, num_args = 2, value_names = ["NAME", "QUANTITY"])]
    pub add: Option<Vec<String>>,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    List,
    Add { recipe_id: u64 },
    Remove { recipe_id: u64 },
    Stats,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(default_value = "")]
    pub query: String,
    #[arg(long)]
    pub diet: Option<String>,
    #[arg(long)]
    pub cuisine: Option<String>,
    /// Maximum minutes to prepare
    #[arg(long)]
    pub max_ready_time: Option<u32>,
    #[arg(long)]
    pub min_servings: Option<u32>,
    #[arg(long = "intolerance")]
    pub intolerances: Vec<String>,
    /// Number of results
    #[arg(long)]
    pub number: Option<u32>,
}

impl From<SearchArgs> for SearchFilters {
    fn from(args: SearchArgs) -> Self {
        SearchFilters {
            query: args.query,
            diet: args.diet,
            cuisine: args.cuisine,
            max_ready_time: args.max_ready_time,
            min_servings: args.min_servings,
            intolerances: args.intolerances,
            number: args.number,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum QuizCommand {
    /// List the questions and their options
    Questions,
    /// Answer every question and save the results
    Take(QuizArgs),
    /// Show the saved results
    Show,
}

#[derive(Args, Debug)]
pub struct QuizArgs {
    #[arg(long)]
    pub people: String,
    #[arg(long)]
    pub budget: String,
    #[arg(long, required = true)]
    pub dietary: Vec<String>,
    #[arg(long, required = true)]
    pub cuisine: Vec<String>,
    #[arg(long)]
    pub experience: String,
    #[arg(long)]
    pub time: String,
}

impl QuizArgs {
    pub fn into_answers(self) -> Result<QuizAnswers, QuizError> {
        let mut answers = QuizAnswers::new();
        answers.choose_single("people", &self.people)?;
        answers.choose_single("budget", &self.budget)?;
        answers.choose_single("experience", &self.experience)?;
        answers.choose_single("time", &self.time)?;
        for option in &self.dietary {
            answers.toggle_multiple("dietary", option)?;
        }
        for option in &self.cuisine {
            answers.toggle_multiple("cuisine", option)?;
        }
        Ok(answers)
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_set() {
        let cli = Cli::try_parse_from(["plate_up", "plan", "set", "Monday", "dinner", "42"]).unwrap();
        match cli.command {
            Command::Plan(PlanCommand::Set { day, meal, recipe_id }) => {
                assert_eq!(day, Day::Monday);
                assert_eq!(meal, MealType::Dinner);
                assert_eq!(recipe_id, 42);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_day() {
        assert!(Cli::try_parse_from(["plate_up", "plan", "remove", "funday", "lunch"]).is_err());
    }

    #[test]
    fn test_shopping_list_flags() {
        let cli = Cli::try_parse_from([
            "plate_up",
            "shopping-list",
            "--check",
            "1",
            "--check",
            "3",
            "--clear-checked",
            "--add",
            "Milk",
            "1 l",
        ])
        .unwrap();
        let Command::ShoppingList(args) = cli.command else {
            panic!("expected shopping-list");
        };
        assert_eq!(args.check, vec![1, 3]);
        assert!(args.clear_checked);
        assert_eq!(args.add, Some(vec!["Milk".to_string(), "1 l".to_string()]));
    }

    #[test]
    fn test_search_args_become_filters() {
        let cli = Cli::try_parse_from([
            "plate_up",
            "search",
            "pasta",
            "--diet",
            "vegan",
            "--intolerance",
            "gluten",
            "--max-ready-time",
            "20",
        ])
        .unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        let filters = SearchFilters::from(args);
        assert_eq!(filters.query, "pasta");
        assert_eq!(filters.diet.as_deref(), Some("vegan"));
        assert_eq!(filters.intolerances, vec!["gluten".to_string()]);
        assert_eq!(filters.max_ready_time, Some(20));
    }

    #[test]
    fn test_quiz_take_builds_complete_answers() {
        let cli = Cli::try_parse_from([
            "plate_up", "quiz", "take", "--people", "Two", "--budget", "Ksh.1,500+",
            "--dietary", "None", "--cuisine", "Thai", "--cuisine", "French",
            "--experience", "Advanced", "--time", "2+ hours",
        ])
        .unwrap();
        let Command::Quiz(QuizCommand::Take(args)) = cli.command else {
            panic!("expected quiz take");
        };
        let answers = args.into_answers().unwrap();
        assert!(answers.is_complete());
    }
}
