//! RB-008: CLI subcommands: browse, create, favorite, comment, rate, plan.
//!
//! The CLI is the producing UI: it enforces comment length, rating bounds and
//! draft form rules before handing values to the store.

use crate::core::planner::{MealPlanner, Slot};
use crate::core::query::{self, RecipeQuery, SortOrder, SUGGESTION_LIMIT};
use crate::core::store::RecipeStore;
use crate::core::{parser, types};
use crate::error::{Error, Result};
use crate::storage::FileStorage;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to recipebox.yaml
    #[arg(short, long, global = true, default_value = "recipebox.yaml")]
    pub config: PathBuf,

    /// State directory (overrides state_dir in the config)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new recipebox project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate recipebox.yaml
    Validate,

    /// List recipes, optionally filtered and sorted
    List {
        /// Match title, description or ingredients (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only this category
        #[arg(long)]
        category: Option<types::Category>,

        /// Maximum cooking time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// newest, oldest, rating, alphabetical, cooking-time
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show one recipe with its comments
    Show { id: String },

    /// Create a recipe from a YAML draft
    Add {
        /// Draft file (camelCase keys)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Merge fields from a YAML patch into a recipe
    Update {
        id: String,

        /// Patch file (camelCase keys)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a recipe
    Delete { id: String },

    /// Toggle a recipe in favorites
    Favorite { id: String },

    /// List favorite recipes
    Favorites,

    /// Suggest recipes from the most favorited category
    Suggest {
        #[arg(long, default_value_t = SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Comment on a recipe as the profile user
    Comment { id: String, text: String },

    /// Rate a recipe
    Rate { id: String, rating: f64 },

    /// Show profile activity
    Profile,

    /// Weekly meal plan
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Show each day and the weekly summary
    Show,

    /// Append a recipe to a day
    Add { day: types::Weekday, id: String },

    /// Remove every occurrence of a recipe from a day
    Remove { day: types::Weekday, id: String },

    /// Move an entry to another position (drag and drop)
    Move {
        from_day: types::Weekday,
        from_index: usize,

        /// Omit to cancel the move
        #[arg(long, requires = "to_index")]
        to_day: Option<types::Weekday>,

        #[arg(long, requires = "to_day")]
        to_index: Option<usize>,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, opts: &GlobalOpts) -> Result<()> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate => cmd_validate(&opts.config),
        cmd => {
            let mut kitchen = Kitchen::open(opts)?;
            run(&mut kitchen, cmd)
        }
    }
}

/// Run a command that needs the opened store and planner.
fn run(kitchen: &mut Kitchen, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { .. } | Commands::Validate => Ok(()),
        Commands::List {
            search,
            category,
            max_time,
            sort,
        } => {
            let q = RecipeQuery {
                search,
                category,
                max_cooking_time: max_time,
                sort,
            };
            cmd_list(kitchen, &q);
            Ok(())
        }
        Commands::Show { id } => cmd_show(kitchen, &id),
        Commands::Add { file } => cmd_add(kitchen, &file).map(|_| ()),
        Commands::Update { id, file } => cmd_update(kitchen, &id, &file),
        Commands::Delete { id } => cmd_delete(kitchen, &id),
        Commands::Favorite { id } => cmd_favorite(kitchen, &id),
        Commands::Favorites => {
            cmd_favorites(kitchen);
            Ok(())
        }
        Commands::Suggest { limit } => {
            cmd_suggest(kitchen, limit);
            Ok(())
        }
        Commands::Comment { id, text } => cmd_comment(kitchen, &id, &text),
        Commands::Rate { id, rating } => cmd_rate(kitchen, &id, rating),
        Commands::Profile => {
            cmd_profile(kitchen);
            Ok(())
        }
        Commands::Plan { action } => cmd_plan(kitchen, action),
    }
}

/// Config, store and planner opened over one state directory.
pub struct Kitchen {
    pub config: types::RecipeboxConfig,
    pub store: RecipeStore<FileStorage>,
    pub planner: MealPlanner<FileStorage>,
}

impl Kitchen {
    pub fn open(opts: &GlobalOpts) -> Result<Self> {
        let config = parse_and_validate(&opts.config)?;
        let state_dir = match opts.state_dir {
            Some(ref dir) => dir.clone(),
            None => resolve_state_dir(&opts.config, &config.state_dir),
        };
        tracing::debug!(state_dir = %state_dir.display(), "opening kitchen");

        let storage = FileStorage::new(state_dir);
        let store = RecipeStore::open_with(storage.clone(), config.seed)?;
        let planner = MealPlanner::open(storage);
        Ok(Self {
            config,
            store,
            planner,
        })
    }
}

/// Relative state dirs are anchored at the config file's directory.
fn resolve_state_dir(config_path: &Path, state_dir: &str) -> PathBuf {
    let dir = Path::new(state_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    config_path
        .parent()
        .map(|p| p.join(dir))
        .unwrap_or_else(|| dir.to_path_buf())
}

/// Parse and validate a config file, returning errors if invalid.
fn parse_and_validate(file: &Path) -> Result<types::RecipeboxConfig> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err(errors.into())
}

fn cmd_init(path: &Path) -> Result<()> {
    let config_path = path.join("recipebox.yaml");
    if config_path.exists() {
        return Err(Error::Config(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    let state_dir = path.join("state");
    std::fs::create_dir_all(&state_dir)?;

    let template = r#"version: "1.0"
name: my-kitchen
description: "Managed by recipebox"

state_dir: state
seed: true

profile:
  id: chef1
  username: FoodLover

limits:
  comment_max_chars: 500
  max_rating: 5
"#;
    std::fs::write(&config_path, template)?;

    println!("Initialized recipebox project at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Created: {}/", state_dir.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<()> {
    let config = parse_and_validate(file)?;
    println!(
        "OK: {} (profile {}, state in {})",
        config.name, config.profile.username, config.state_dir
    );
    Ok(())
}

fn print_recipe_line(recipe: &types::Recipe, favorite: bool) {
    println!(
        "  {} [{}] {} - {} min, serves {}, {:.1}★{}",
        recipe.id,
        recipe.category,
        recipe.title,
        recipe.cooking_time,
        recipe.servings,
        recipe.rating,
        if favorite { " ♥" } else { "" }
    );
}

fn cmd_list(kitchen: &Kitchen, q: &RecipeQuery) {
    let found = query::filter_recipes(kitchen.store.recipes(), q);
    println!("Recipes ({} found, sorted by {}):", found.len(), q.sort);
    for recipe in found {
        print_recipe_line(recipe, kitchen.store.is_favorite(&recipe.id));
    }
}

fn cmd_show(kitchen: &Kitchen, id: &str) -> Result<()> {
    let recipe = kitchen
        .store
        .get_recipe_by_id(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    println!("{} ({})", recipe.title, recipe.category);
    println!("  {}", recipe.description);
    println!(
        "  {} min · serves {} · {:.1}★ · by {} on {}",
        recipe.cooking_time,
        recipe.servings,
        recipe.rating,
        recipe.created_by,
        recipe.created_at.format("%Y-%m-%d")
    );
    let n = &recipe.nutritional_info;
    println!(
        "  {} kcal · {}g protein · {}g fat · {}g carbs",
        n.calories, n.protein, n.fat, n.carbs
    );
    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }
    println!();
    println!("Instructions:");
    println!("  {}", recipe.instructions);
    println!();
    println!("Comments ({}):", recipe.comments.len());
    for c in &recipe.comments {
        println!(
            "  {} ({}): {}",
            c.username,
            c.timestamp.format("%Y-%m-%d %H:%M"),
            c.text
        );
    }
    Ok(())
}

fn cmd_add(kitchen: &mut Kitchen, file: &Path) -> Result<String> {
    let content = std::fs::read_to_string(file)?;
    let mut draft = parser::normalize_draft(parser::parse_draft(&content)?);
    if draft.created_by.is_empty() {
        draft.created_by.clone_from(&kitchen.config.profile.id);
    }
    let errors = parser::validate_draft(&draft);
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let title = draft.title.clone();
    let id = kitchen.store.add_recipe(draft)?;
    println!("Added {} ({})", title, id);
    Ok(id)
}

fn cmd_update(kitchen: &mut Kitchen, id: &str, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let patch = parser::parse_patch(&content)?;
    let errors = parser::validate_patch(&patch);
    if !errors.is_empty() {
        return Err(errors.into());
    }
    if !kitchen.store.update_recipe(id, &patch)? {
        return Err(Error::NotFound(id.to_string()));
    }
    println!("Updated {}", id);
    Ok(())
}

fn cmd_delete(kitchen: &mut Kitchen, id: &str) -> Result<()> {
    if !kitchen.store.delete_recipe(id)? {
        return Err(Error::NotFound(id.to_string()));
    }
    println!("Deleted {}", id);
    Ok(())
}

fn cmd_favorite(kitchen: &mut Kitchen, id: &str) -> Result<()> {
    if kitchen.store.toggle_favorite(id)? {
        println!("♥ {} added to favorites", id);
    } else {
        println!("  {} removed from favorites", id);
    }
    Ok(())
}

fn cmd_favorites(kitchen: &Kitchen) {
    let favorites = query::favorite_recipes(kitchen.store.recipes(), kitchen.store.favorites());
    println!("Favorites ({}):", favorites.len());
    for recipe in favorites {
        print_recipe_line(recipe, true);
    }
}

fn cmd_suggest(kitchen: &Kitchen, limit: usize) {
    let picks = query::suggest_recipes(kitchen.store.recipes(), kitchen.store.favorites(), limit);
    if picks.is_empty() {
        println!("No suggestions yet. Favorite a few recipes first.");
        return;
    }
    println!("Suggested for you:");
    for recipe in picks {
        print_recipe_line(recipe, false);
    }
}

fn cmd_comment(kitchen: &mut Kitchen, id: &str, text: &str) -> Result<()> {
    let text = text.trim();
    let max = kitchen.config.limits.comment_max_chars;
    if text.is_empty() {
        return Err(Error::Validation(vec!["comment must not be empty".into()]));
    }
    if text.chars().count() > max {
        return Err(Error::Validation(vec![format!(
            "comment exceeds {} characters",
            max
        )]));
    }

    let username = kitchen.config.profile.username.clone();
    match kitchen.store.add_comment(id, text, &username)? {
        Some(comment_id) => {
            println!("Comment {} added to {}", comment_id, id);
            Ok(())
        }
        None => Err(Error::NotFound(id.to_string())),
    }
}

fn cmd_rate(kitchen: &mut Kitchen, id: &str, rating: f64) -> Result<()> {
    let max = kitchen.config.limits.max_rating;
    if !(0.0..=max).contains(&rating) {
        return Err(Error::Validation(vec![format!(
            "rating must be between 0 and {}",
            max
        )]));
    }
    if !kitchen.store.rate_recipe(id, rating)? {
        return Err(Error::NotFound(id.to_string()));
    }
    println!("Rated {} {:.1}★", id, rating);
    Ok(())
}

fn cmd_profile(kitchen: &Kitchen) {
    let profile = &kitchen.config.profile;
    let stats = query::profile_stats(
        kitchen.store.recipes(),
        kitchen.store.favorites(),
        &profile.id,
        &profile.username,
    );
    println!("{} ({})", profile.username, profile.id);
    println!(
        "  {} recipes · {} favorites · {} comments",
        stats.authored.len(),
        stats.favorites,
        stats.comments_written
    );
    for recipe in stats.authored {
        print_recipe_line(recipe, kitchen.store.is_favorite(&recipe.id));
    }
}

fn cmd_plan(kitchen: &mut Kitchen, action: PlanCommand) -> Result<()> {
    match action {
        PlanCommand::Show => {
            print_plan(kitchen);
            Ok(())
        }
        PlanCommand::Add { day, id } => {
            if kitchen.store.get_recipe_by_id(&id).is_none() {
                return Err(Error::NotFound(id));
            }
            kitchen.planner.add_recipe_to_day(day, &id)?;
            println!("Planned {} on {}", id, day);
            Ok(())
        }
        PlanCommand::Remove { day, id } => {
            let removed = kitchen.planner.remove_recipe_from_day(day, &id)?;
            println!("Removed {} x{} from {}", id, removed, day);
            Ok(())
        }
        PlanCommand::Move {
            from_day,
            from_index,
            to_day,
            to_index,
        } => {
            let destination = to_day.zip(to_index).map(|(day, index)| Slot::new(day, index));
            let moved = kitchen
                .planner
                .reorder(Slot::new(from_day, from_index), destination)?;
            if moved {
                println!("Moved {} #{}", from_day, from_index);
            } else {
                println!("Nothing to move.");
            }
            Ok(())
        }
    }
}

/// Display the plan and its summary to stdout.
fn print_plan(kitchen: &Kitchen) {
    println!("Meal plan:");
    for day in types::Weekday::ALL {
        let recipes = kitchen.planner.resolved_day(day, &kitchen.store);
        println!("{}:", day);
        if recipes.is_empty() {
            println!("  (nothing planned)");
        }
        for (i, recipe) in recipes.iter().enumerate() {
            println!("  {}. {} ({} min)", i, recipe.title, recipe.cooking_time);
        }
    }

    let s = kitchen.planner.summary(&kitchen.store);
    println!();
    println!(
        "Summary: {} recipes planned, {} min total cooking, ~{} avg servings",
        s.total_recipes, s.total_cooking_time, s.average_servings
    );
    println!(
        "  {} kcal · {}g protein · {}g fat · {}g carbs",
        s.nutrition.calories, s.nutrition.protein, s.nutrition.fat, s.nutrition.carbs
    );
}
