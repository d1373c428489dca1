//! RB-005: Weekly meal planner: per-day ordered recipe ids, drag-and-drop
//! reordering, and derived totals.
//!
//! The planner only references recipes by id. Projections resolve ids through a
//! [`RecipeLookup`] and silently drop ids that no longer resolve.

use super::store::RecipeLookup;
use super::types::{MealPlan, NutritionalInfo, Recipe, Weekday};
use crate::error::{Error, Result};
use crate::storage::{self, Storage, MEAL_PLAN_KEY};
use indexmap::IndexMap;

/// A position within a day's sequence (one end of a drag gesture).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub day: Weekday,
    pub index: usize,
}

impl Slot {
    pub fn new(day: Weekday, index: usize) -> Self {
        Self { day, index }
    }
}

/// Totals across every resolved reference in the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanSummary {
    pub nutrition: NutritionalInfo,
    pub total_recipes: usize,
    pub total_cooking_time: u64,
    pub average_servings: u32,
}

/// Owns the meal plan, mirrored to storage.
#[derive(Debug)]
pub struct MealPlanner<S: Storage> {
    storage: S,
    plan: MealPlan,
}

impl<S: Storage> MealPlanner<S> {
    /// Load the persisted plan. Absent or malformed state yields an empty plan.
    pub fn open(storage: S) -> Self {
        let plan = storage::load_json::<IndexMap<String, Vec<String>>>(&storage, MEAL_PLAN_KEY)
            .map(MealPlan::from_persisted)
            .unwrap_or_default();
        tracing::debug!(references = plan.references().count(), "meal plan loaded");
        Self { storage, plan }
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append `recipe_id` to the end of `day`. Duplicates are allowed.
    pub fn add_recipe_to_day(&mut self, day: Weekday, recipe_id: &str) -> Result<()> {
        let mut next = self.plan.clone();
        next.day_mut(day).push(recipe_id.to_string());
        self.commit(next)?;
        tracing::debug!(%day, recipe_id, "recipe planned");
        Ok(())
    }

    /// Remove every occurrence of `recipe_id` from `day`. Returns how many
    /// were removed; nothing is persisted when that is zero.
    pub fn remove_recipe_from_day(&mut self, day: Weekday, recipe_id: &str) -> Result<usize> {
        let removed = self.plan.day(day).iter().filter(|id| *id == recipe_id).count();
        if removed == 0 {
            tracing::debug!(%day, recipe_id, "remove skipped, not planned");
            return Ok(0);
        }
        let mut next = self.plan.clone();
        next.day_mut(day).retain(|id| id != recipe_id);
        self.commit(next)?;
        tracing::debug!(%day, recipe_id, removed, "recipe unplanned");
        Ok(removed)
    }

    /// Complete a drag gesture. A missing destination (drop outside any day)
    /// or a drop back onto the source slot changes nothing and returns
    /// `Ok(false)`.
    pub fn reorder(&mut self, source: Slot, destination: Option<Slot>) -> Result<bool> {
        let Some(destination) = destination else {
            tracing::debug!(?source, "drag cancelled");
            return Ok(false);
        };
        if source == destination {
            return Ok(false);
        }
        let next = reorder_plan(&self.plan, source, destination)?;
        self.commit(next)?;
        tracing::debug!(?source, ?destination, "plan reordered");
        Ok(true)
    }

    /// Recipes planned for `day`, in plan order, dangling ids dropped.
    pub fn resolved_day<'a, L: RecipeLookup + ?Sized>(
        &self,
        day: Weekday,
        lookup: &'a L,
    ) -> Vec<&'a Recipe> {
        self.plan
            .day(day)
            .iter()
            .filter_map(|id| lookup.recipe(id))
            .collect()
    }

    /// Summed nutrition; a recipe planned twice counts twice.
    pub fn aggregate_nutrition<L: RecipeLookup + ?Sized>(&self, lookup: &L) -> NutritionalInfo {
        let mut total = NutritionalInfo::default();
        for recipe in self.resolved_all(lookup) {
            total += recipe.nutritional_info;
        }
        total
    }

    /// Raw reference count across all days, dangling ids included.
    pub fn total_recipe_count(&self) -> usize {
        self.plan.references().count()
    }

    pub fn total_cooking_time<L: RecipeLookup + ?Sized>(&self, lookup: &L) -> u64 {
        self.resolved_all(lookup)
            .iter()
            .map(|r| u64::from(r.cooking_time))
            .sum()
    }

    /// Mean servings over resolved references, rounded; 0 for an empty plan.
    pub fn average_servings<L: RecipeLookup + ?Sized>(&self, lookup: &L) -> u32 {
        let resolved = self.resolved_all(lookup);
        if resolved.is_empty() {
            return 0;
        }
        let total: u64 = resolved.iter().map(|r| u64::from(r.servings)).sum();
        let mean = total as f64 / resolved.len() as f64;
        mean.round() as u32
    }

    pub fn summary<L: RecipeLookup + ?Sized>(&self, lookup: &L) -> PlanSummary {
        PlanSummary {
            nutrition: self.aggregate_nutrition(lookup),
            total_recipes: self.total_recipe_count(),
            total_cooking_time: self.total_cooking_time(lookup),
            average_servings: self.average_servings(lookup),
        }
    }

    fn resolved_all<'a, L: RecipeLookup + ?Sized>(&self, lookup: &'a L) -> Vec<&'a Recipe> {
        self.plan
            .references()
            .filter_map(|id| lookup.recipe(id))
            .collect()
    }

    fn commit(&mut self, next: MealPlan) -> Result<()> {
        storage::save_json(&mut self.storage, MEAL_PLAN_KEY, &next.to_persisted())?;
        self.plan = next;
        Ok(())
    }
}

/// Move the id at `source` to `destination`, returning the new plan.
///
/// When both slots are on the same day the destination index addresses the
/// sequence after removal. A destination past the end is clamped to the end.
/// A source index outside its day is an error and `plan` is left untouched.
pub fn reorder_plan(plan: &MealPlan, source: Slot, destination: Slot) -> Result<MealPlan> {
    let len = plan.day(source.day).len();
    if source.index >= len {
        return Err(Error::IndexOutOfRange {
            day: source.day.to_string(),
            index: source.index,
            len,
        });
    }

    let mut next = plan.clone();
    let moved = next.day_mut(source.day).remove(source.index);
    let to = next.day_mut(destination.day);
    let at = destination.index.min(to.len());
    to.insert(at, moved);
    Ok(next)
}
