//! RB-006: Read-only recipe views: search and sort, favorites, suggestions,
//! and per-user profile statistics.

use super::types::{Category, Recipe};
use crate::error::Error;
use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Rating,
    Alphabetical,
    CookingTime,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
            Self::Rating => write!(f, "rating"),
            Self::Alphabetical => write!(f, "alphabetical"),
            Self::CookingTime => write!(f, "cooking-time"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "rating" => Ok(Self::Rating),
            "alphabetical" | "title" => Ok(Self::Alphabetical),
            "cooking-time" | "cookingtime" | "time" => Ok(Self::CookingTime),
            other => Err(Error::Config(format!("unknown sort order '{}'", other))),
        }
    }
}

/// Filter and ordering for a recipe listing. The default matches everything,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeQuery {
    /// Case-insensitive substring of title, description, or any ingredient
    pub search: Option<String>,

    /// `None` means all categories
    pub category: Option<Category>,

    /// Inclusive upper bound in minutes
    pub max_cooking_time: Option<u32>,

    pub sort: SortOrder,
}

impl RecipeQuery {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        matches_search(recipe, self.search.as_deref().unwrap_or(""))
            && self.category.is_none_or(|c| recipe.category == c)
            && self
                .max_cooking_time
                .is_none_or(|max| recipe.cooking_time <= max)
    }
}

fn matches_search(recipe: &Recipe, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    recipe.title.to_lowercase().contains(&term)
        || recipe.description.to_lowercase().contains(&term)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(&term))
}

fn compare(a: &Recipe, b: &Recipe, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Newest => b.created_at.cmp(&a.created_at),
        SortOrder::Oldest => a.created_at.cmp(&b.created_at),
        SortOrder::Rating => b.rating.total_cmp(&a.rating),
        SortOrder::Alphabetical => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOrder::CookingTime => a.cooking_time.cmp(&b.cooking_time),
    }
}

/// Apply `query` to `recipes`. Ties keep collection order.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], query: &RecipeQuery) -> Vec<&'a Recipe> {
    let mut out: Vec<&Recipe> = recipes.iter().filter(|r| query.matches(r)).collect();
    out.sort_by(|a, b| compare(a, b, query.sort));
    out
}

/// Favorited recipes in collection order. Dangling favorites are skipped.
pub fn favorite_recipes<'a>(recipes: &'a [Recipe], favorites: &IndexSet<String>) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|r| favorites.contains(&r.id))
        .collect()
}

/// Default number of suggestions.
pub const SUGGESTION_LIMIT: usize = 3;

/// Up to `limit` unfavorited recipes from the most favorited category, best
/// rated first. Ties between categories go to the one seen first.
pub fn suggest_recipes<'a>(
    recipes: &'a [Recipe],
    favorites: &IndexSet<String>,
    limit: usize,
) -> Vec<&'a Recipe> {
    let mut counts: IndexMap<Category, usize> = IndexMap::new();
    for recipe in favorite_recipes(recipes, favorites) {
        *counts.entry(recipe.category).or_default() += 1;
    }

    let mut top: Option<(Category, usize)> = None;
    for (&category, &count) in &counts {
        if top.is_none_or(|(_, best)| count > best) {
            top = Some((category, count));
        }
    }
    let Some((category, _)) = top else {
        return Vec::new();
    };

    let mut picks: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| r.category == category && !favorites.contains(&r.id))
        .collect();
    picks.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    picks.truncate(limit);
    picks
}

/// Activity of one user across the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats<'a> {
    /// Recipes with `createdBy` equal to the user id
    pub authored: Vec<&'a Recipe>,

    /// Favorites that still resolve
    pub favorites: usize,

    /// Comments signed with the username
    pub comments_written: usize,
}

pub fn profile_stats<'a>(
    recipes: &'a [Recipe],
    favorites: &IndexSet<String>,
    user_id: &str,
    username: &str,
) -> ProfileStats<'a> {
    ProfileStats {
        authored: recipes.iter().filter(|r| r.created_by == user_id).collect(),
        favorites: favorite_recipes(recipes, favorites).len(),
        comments_written: recipes
            .iter()
            .flat_map(|r| &r.comments)
            .filter(|c| c.username == username)
            .count(),
    }
}
