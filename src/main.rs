use anyhow::{Context, Result};
use plate_up::api_connection::{RecipeProvider, SpoonacularClient};
use plate_up::app::{HomeSummary, PlateUp};
use plate_up::cli::{parse_args, Command, FavoritesCommand, PlanCommand, QuizCommand, ShoppingListArgs};
use plate_up::config::Config;
use plate_up::planner::{Day, MealType, WeeklyPlan};
use plate_up::quiz::{Answer, QuestionKind, QUESTIONS};
use plate_up::recipe::RecipeSummary;
use plate_up::storage::{JsonStore, PlanStore};

#[tokio::main]
async fn main() -> Result<()> {
    plate_up::init();

    let cli = parse_args();
    let config = Config::from_env().with_data_dir(cli.data_dir);
    let store = JsonStore::new(&config.data_dir)
        .with_context(|| format!("Failed to open data directory '{}'", config.data_dir.display()))?;
    let app = PlateUp::new(store, SpoonacularClient::from_config(&config));

    match cli.command {
        Command::Plan(command) => run_plan(&app, command).await?,
        Command::ShoppingList(args) => run_shopping_list(&app, args),
        Command::Favorites(command) => run_favorites(&app, command).await?,
        Command::Search(args) => {
            let results = app.search(&args.into()).await.context("Recipe search failed")?;
            if results.is_empty() {
                println!("No recipes found. Try a different search or filter.");
            }
            for recipe in &results {
                print_summary(recipe);
            }
        }
        Command::Quiz(command) => run_quiz(&app, command)?,
        Command::Home => print_home(&app.home(Day::today())),
    }

    Ok(())
}

async fn run_plan<S: PlanStore, P: RecipeProvider>(app: &PlateUp<S, P>, command: PlanCommand) -> Result<()> {
    match command {
        PlanCommand::Show => print_plan(&app.plan().context("Failed to load meal plan")?),
        PlanCommand::Set { day, meal, recipe_id } => {
            let recipe = app
                .plan_recipe(day, meal, recipe_id)
                .await
                .with_context(|| format!("Failed to add recipe {} to {} {}", recipe_id, day, meal))?;
            println!("{} {}: {}", day, meal, recipe.title);
        }
        PlanCommand::Remove { day, meal } => match app.remove_meal(day, meal)? {
            Some(recipe) => println!("Removed {} from {} {}", recipe.title, day, meal),
            None => println!("{} {} was already empty", day, meal),
        },
        PlanCommand::Clear => {
            app.clear_plan()?;
            println!("Meal plan cleared.");
        }
    }
    Ok(())
}

fn run_shopping_list<S: PlanStore, P: RecipeProvider>(app: &PlateUp<S, P>, args: ShoppingListArgs) {
    let mut list = app.shopping_list();
    if let Some([name, quantity]) = args.add.as_deref() {
        if list.add_item(name, quantity).is_none() {
            eprintln!("Skipping item: name and quantity are both required.");
        }
    }
    for id in args.check {
        if list.toggle(id).is_none() {
            eprintln!("No item with id {}", id);
        }
    }
    if args.clear_checked {
        let removed = list.clear_checked();
        println!("Cleared {} checked item(s).", removed);
    }

    if list.is_empty() {
        println!("Your shopping list is empty. Plan some meals first!");
        return;
    }
    for item in &list.items {
        let mark = if item.checked { "x" } else { " " };
        if item.quantity.is_empty() {
            println!("[{}] {:>3}. {}", mark, item.id, item.name);
        } else {
            println!("[{}] {:>3}. {} ({})", mark, item.id, item.name, item.quantity);
        }
    }
}

async fn run_favorites<S: PlanStore, P: RecipeProvider>(app: &PlateUp<S, P>, command: FavoritesCommand) -> Result<()> {
    match command {
        FavoritesCommand::List => {
            let favorites = app.favorites()?;
            if favorites.is_empty() {
                println!("No favourites yet.");
            }
            for recipe in favorites.iter() {
                print_summary(recipe);
            }
        }
        FavoritesCommand::Add { recipe_id } => {
            if app.add_favorite(recipe_id).await? {
                println!("Saved recipe {}", recipe_id);
            } else {
                println!("Recipe {} is already a favourite", recipe_id);
            }
        }
        FavoritesCommand::Remove { recipe_id } => match app.remove_favorite(recipe_id)? {
            Some(recipe) => println!("Removed {}", recipe.title),
            None => println!("Recipe {} is not a favourite", recipe_id),
        },
        FavoritesCommand::Stats => {
            let stats = app.favorite_stats()?;
            println!("Favourites: {}", stats.total_favourites);
            println!("Total cook time: {:.1} h", stats.total_cook_time_hours);
        }
    }
    Ok(())
}

fn run_quiz<S: PlanStore, P: RecipeProvider>(app: &PlateUp<S, P>, command: QuizCommand) -> Result<()> {
    match command {
        QuizCommand::Questions => {
            for question in QUESTIONS {
                let kind = match question.kind {
                    QuestionKind::Single => "pick one",
                    QuestionKind::Multiple => "pick any",
                };
                println!("--{} ({}): {}", question.id, kind, question.prompt);
                println!("    {}", question.options.join(" | "));
            }
        }
        QuizCommand::Take(args) => {
            let results = app.save_quiz(args.into_answers()?)?;
            println!("Quiz saved at {}", results.timestamp.to_rfc3339());
        }
        QuizCommand::Show => match app.quiz_results()? {
            Some(results) => {
                println!("Taken {}", results.timestamp.to_rfc3339());
                for question in QUESTIONS {
                    let answer = match results.answers.get(question.id) {
                        Some(Answer::Single(choice)) => choice.clone(),
                        Some(Answer::Multiple(choices)) => choices.join(", "),
                        None => "-".to_string(),
                    };
                    println!("{}: {}", question.id, answer);
                }
            }
            None => println!("No quiz results saved."),
        },
    }
    Ok(())
}

fn print_summary(recipe: &RecipeSummary) {
    let minutes = recipe
        .ready_in_minutes
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| "? min".to_string());
    let servings = recipe
        .servings
        .map(|s| format!("{} servings", s))
        .unwrap_or_default();
    println!("{:>8}  {}  [{}] {}", recipe.id, recipe.title, minutes, servings);
}

fn print_plan(plan: &WeeklyPlan) {
    for (day, meals) in plan.days() {
        println!("{}", day);
        for (meal, recipe) in meals.meals() {
            let title = recipe.map(|r| r.title.as_str()).unwrap_or("-");
            println!("  {:<9} {}", meal, title);
        }
    }
}

fn print_home(home: &HomeSummary) {
    println!("Today ({}):", home.today);
    for meal in MealType::ALL {
        let title = home
            .todays_meals
            .slot(meal)
            .map(|r| r.title.as_str())
            .unwrap_or("nothing planned");
        println!("  {:<9} {}", meal, title);
    }
    println!("Meals planned this week: {}", home.meals_planned);
    println!("Saved recipes: {}", home.saved_recipes);
    if !home.recent_favorites.is_empty() {
        println!("Recent favourites:");
        for recipe in &home.recent_favorites {
            print_summary(recipe);
        }
    }
}
