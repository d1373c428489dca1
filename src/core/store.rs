//! RB-004: Recipe store: recipe collection and favorites, mirrored to storage.
//!
//! Every mutation builds the next snapshot, persists it, and only then makes it
//! the readable state. Missing ids are no-ops, never errors. A mutation fails
//! on a storage write error, or on a NaN or infinite number that the JSON
//! snapshot could not hold; either way state is unchanged.

use super::seed;
use super::types::{self, Comment, Recipe, RecipeDraft, RecipePatch};
use crate::error::Result;
use crate::storage::{self, Storage, FAVORITES_KEY, RECIPES_KEY};
use chrono::Utc;
use indexmap::IndexSet;

/// Resolves recipe ids to recipes. Unknown ids resolve to `None`.
pub trait RecipeLookup {
    fn recipe(&self, id: &str) -> Option<&Recipe>;
}

impl RecipeLookup for [Recipe] {
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.iter().find(|r| r.id == id)
    }
}

/// Owns the recipe collection (insertion order) and the favorites set.
#[derive(Debug)]
pub struct RecipeStore<S: Storage> {
    storage: S,
    recipes: Vec<Recipe>,
    favorites: IndexSet<String>,
    id_floor: u64,
}

impl<S: Storage> RecipeStore<S> {
    /// Load the persisted snapshot, seeding sample recipes when none exists.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with(storage, true)
    }

    /// Load the persisted snapshot. With `seed`, an absent or malformed
    /// `recipes` entry is replaced by the sample collection and persisted.
    pub fn open_with(mut storage: S, seed: bool) -> Result<Self> {
        let recipes = match storage::load_json::<Vec<Recipe>>(&storage, RECIPES_KEY) {
            Some(recipes) => recipes,
            None if seed => {
                let recipes = seed::sample_recipes();
                storage::save_json(&mut storage, RECIPES_KEY, &recipes)?;
                tracing::info!(count = recipes.len(), "seeded sample recipes");
                recipes
            }
            None => Vec::new(),
        };
        let favorites: IndexSet<String> =
            storage::load_json::<Vec<String>>(&storage, FAVORITES_KEY)
                .unwrap_or_default()
                .into_iter()
                .collect();

        tracing::debug!(
            recipes = recipes.len(),
            favorites = favorites.len(),
            "recipe store loaded"
        );
        Ok(Self {
            storage,
            recipes,
            favorites,
            id_floor: 0,
        })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Favorited ids in the order they were added. May contain dangling ids.
    pub fn favorites(&self) -> &IndexSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get_recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Create a recipe with a fresh id, zero rating and no comments.
    /// Returns the new id.
    pub fn add_recipe(&mut self, draft: RecipeDraft) -> Result<String> {
        draft.nutritional_info.ensure_finite()?;
        let id = fresh_id(&mut self.id_floor, |c| {
            self.recipes.iter().any(|r| r.id == c)
        });
        let recipe = Recipe {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            cooking_time: draft.cooking_time,
            servings: draft.servings,
            category: draft.category,
            rating: 0.0,
            nutritional_info: draft.nutritional_info,
            comments: Vec::new(),
            created_by: draft.created_by,
            created_at: Utc::now(),
            image: draft.image,
        };

        let mut next = self.recipes.clone();
        next.push(recipe);
        self.commit_recipes(next)?;
        tracing::debug!(id = %id, "recipe added");
        Ok(id)
    }

    /// Merge `patch` into the recipe. `Ok(false)` when the id is unknown.
    pub fn update_recipe(&mut self, id: &str, patch: &RecipePatch) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "update skipped, recipe not found");
            return Ok(false);
        };
        if let Some(ref n) = patch.nutritional_info {
            n.ensure_finite()?;
        }
        let mut next = self.recipes.clone();
        patch.apply_to(&mut next[idx]);
        self.commit_recipes(next)?;
        tracing::debug!(id, "recipe updated");
        Ok(true)
    }

    /// Remove the recipe. Favorites and meal plans keep their references.
    pub fn delete_recipe(&mut self, id: &str) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "delete skipped, recipe not found");
            return Ok(false);
        };
        let mut next = self.recipes.clone();
        next.remove(idx);
        self.commit_recipes(next)?;
        tracing::debug!(id, "recipe deleted");
        Ok(true)
    }

    /// Flip favorite membership. Returns whether `id` is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let mut next = self.favorites.clone();
        let now_favorite = if next.shift_remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };
        storage::save_json(&mut self.storage, FAVORITES_KEY, &next)?;
        self.favorites = next;
        tracing::debug!(id, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Append a comment. Returns the comment id, or `None` when the recipe
    /// is unknown. Timestamps never go backwards within a recipe.
    pub fn add_comment(
        &mut self,
        recipe_id: &str,
        text: &str,
        username: &str,
    ) -> Result<Option<String>> {
        let Some(idx) = self.position(recipe_id) else {
            tracing::debug!(recipe_id, "comment skipped, recipe not found");
            return Ok(None);
        };
        let mut next = self.recipes.clone();
        let recipe = &mut next[idx];

        let now = Utc::now();
        let timestamp = recipe
            .comments
            .last()
            .map_or(now, |last| last.timestamp.max(now));
        let comment_id = fresh_id(&mut self.id_floor, |c| {
            recipe.comments.iter().any(|existing| existing.id == c)
        });
        recipe.comments.push(Comment {
            id: comment_id.clone(),
            username: username.to_string(),
            text: text.to_string(),
            timestamp,
        });

        self.commit_recipes(next)?;
        tracing::debug!(recipe_id, comment_id = %comment_id, "comment added");
        Ok(Some(comment_id))
    }

    /// Overwrite the rating. Finite values are stored as given, without
    /// clamping; NaN and infinities are rejected.
    pub fn rate_recipe(&mut self, recipe_id: &str, rating: f64) -> Result<bool> {
        let Some(idx) = self.position(recipe_id) else {
            tracing::debug!(recipe_id, "rating skipped, recipe not found");
            return Ok(false);
        };
        types::ensure_finite("rating", rating)?;
        let mut next = self.recipes.clone();
        next[idx].rating = rating;
        self.commit_recipes(next)?;
        tracing::debug!(recipe_id, rating, "recipe rated");
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == id)
    }

    fn commit_recipes(&mut self, next: Vec<Recipe>) -> Result<()> {
        storage::save_json(&mut self.storage, RECIPES_KEY, &next)?;
        self.recipes = next;
        Ok(())
    }
}

impl<S: Storage> RecipeLookup for RecipeStore<S> {
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.get_recipe_by_id(id)
    }
}

/// Time-derived id, strictly above every id issued by this store and not
/// `taken` by an existing entry.
fn fresh_id(floor: &mut u64, taken: impl Fn(&str) -> bool) -> String {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let mut candidate = now.max(*floor + 1);
    while taken(&candidate.to_string()) {
        candidate += 1;
    }
    *floor = candidate;
    candidate.to_string()
}
