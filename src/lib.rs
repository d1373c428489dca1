//! Recipebox: recipes, favorites, and a weekly meal planner.
//!
//! State lives in three durable key/value entries (`recipes`, `favorites`,
//! `mealPlan`) behind an injectable storage port.

pub mod cli;
pub mod core;
pub mod error;
pub mod storage;

pub use error::{Error, Result};
