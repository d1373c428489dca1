//! RB-001: Domain types: recipes, comments, meal plans, and the project config.
//!
//! Recipes and comments derive Serialize/Deserialize with camelCase field names,
//! so persisted snapshots read `cookingTime`, `nutritionalInfo`, `createdBy`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// Recipes
// ============================================================================

/// One dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque unique identifier, immutable after creation
    pub id: String,

    pub title: String,

    pub description: String,

    /// Ordered ingredient lines (duplicates allowed)
    #[serde(default)]
    pub ingredients: Vec<String>,

    pub instructions: String,

    /// Minutes
    pub cooking_time: u32,

    pub servings: u32,

    pub category: Category,

    /// Single scalar, overwritten by each rating
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rating: f64,

    pub nutritional_info: NutritionalInfo,

    /// Chronological (insertion) order
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Authoring user id (no ownership semantics)
    pub created_by: String,

    pub created_at: DateTime<Utc>,

    /// URL or embedded data for a displayable image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Fixed recipe category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Dessert,
        Self::Snack,
        Self::Appetizer,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breakfast => write!(f, "Breakfast"),
            Self::Lunch => write!(f, "Lunch"),
            Self::Dinner => write!(f, "Dinner"),
            Self::Dessert => write!(f, "Dessert"),
            Self::Snack => write!(f, "Snack"),
            Self::Appetizer => write!(f, "Appetizer"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Per-recipe nutrition. All fields non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    #[serde(deserialize_with = "null_as_zero")]
    pub calories: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub protein: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub fat: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub carbs: f64,
}

impl NutritionalInfo {
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbs", self.carbs),
        ]
    }

    /// Every field must be finite to survive a JSON snapshot.
    pub fn ensure_finite(&self) -> Result<(), Error> {
        for (field, value) in self.fields() {
            ensure_finite(field, value)?;
        }
        Ok(())
    }
}

/// Reject NaN and infinities.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFinite { field, value })
    }
}

/// Reads `null` as 0.0; serde_json writes non-finite floats as `null`.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::ops::AddAssign for NutritionalInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.fat += rhs.fat;
        self.carbs += rhs.carbs;
    }
}

/// One remark on a recipe. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within the owning recipe
    pub id: String,

    /// Author display name (not a user reference)
    pub username: String,

    pub text: String,

    pub timestamp: DateTime<Utc>,
}

/// Everything a caller supplies to create a recipe. The store fills in
/// `id`, `createdAt`, `comments` and `rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    pub instructions: String,

    pub cooking_time: u32,

    pub servings: u32,

    pub category: Category,

    #[serde(default)]
    pub nutritional_info: NutritionalInfo,

    /// Filled from the active profile when left empty
    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update merged into an existing recipe. `id`, `createdAt`,
/// `createdBy`, `rating` and `comments` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub category: Option<Category>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub image: Option<String>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `recipe`.
    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(ref v) = self.title {
            recipe.title.clone_from(v);
        }
        if let Some(ref v) = self.description {
            recipe.description.clone_from(v);
        }
        if let Some(ref v) = self.ingredients {
            recipe.ingredients.clone_from(v);
        }
        if let Some(ref v) = self.instructions {
            recipe.instructions.clone_from(v);
        }
        if let Some(v) = self.cooking_time {
            recipe.cooking_time = v;
        }
        if let Some(v) = self.servings {
            recipe.servings = v;
        }
        if let Some(v) = self.category {
            recipe.category = v;
        }
        if let Some(v) = self.nutritional_info {
            recipe.nutritional_info = v;
        }
        if let Some(ref v) = self.image {
            recipe.image = Some(v.clone());
        }
    }
}

// ============================================================================
// Meal plan
// ============================================================================

/// The seven plan days, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownWeekday(s.to_string()))
    }
}

/// Weekday → ordered recipe ids. An absent day is an empty day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPlan {
    days: BTreeMap<Weekday, Vec<String>>,
}

impl MealPlan {
    /// Raw id sequence for a day, dangling ids included.
    pub fn day(&self, day: Weekday) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut Vec<String> {
        self.days.entry(day).or_default()
    }

    /// Every id reference across all days, Monday first.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.days.values().flatten().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Persisted form: day name → ids.
    pub fn to_persisted(&self) -> IndexMap<String, Vec<String>> {
        self.days
            .iter()
            .map(|(day, ids)| (day.to_string(), ids.clone()))
            .collect()
    }

    /// Build from the persisted form, dropping keys that are not weekdays.
    pub fn from_persisted(raw: IndexMap<String, Vec<String>>) -> Self {
        let mut days = BTreeMap::new();
        for (key, ids) in raw {
            match key.parse::<Weekday>() {
                Ok(day) => {
                    days.insert(day, ids);
                }
                Err(_) => tracing::warn!(key = %key, "dropping unknown meal plan day"),
            }
        }
        Self { days }
    }
}

impl FromIterator<(Weekday, Vec<String>)> for MealPlan {
    fn from_iter<I: IntoIterator<Item = (Weekday, Vec<String>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// recipebox.yaml
// ============================================================================

/// Project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeboxConfig {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Human-readable kitchen name
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// FileStorage directory
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Seed sample recipes when no snapshot exists
    #[serde(default = "default_true")]
    pub seed: bool,

    /// Active user (stand-in for the identity provider)
    pub profile: Profile,

    #[serde(default)]
    pub limits: Limits,
}

/// The user recipes and comments are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

/// Input bounds enforced by the CLI before calling the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_comment_max_chars")]
    pub comment_max_chars: usize,

    #[serde(default = "default_max_rating")]
    pub max_rating: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            comment_max_chars: default_comment_max_chars(),
            max_rating: default_max_rating(),
        }
    }
}

fn default_state_dir() -> String {
    "state".to_string()
}

fn default_true() -> bool {
    true
}

fn default_comment_max_chars() -> usize {
    500
}

fn default_max_rating() -> f64 {
    5.0
}

// ============================================================================
// Tests
// ============================================================================
