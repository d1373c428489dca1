//! RB-010: Storage port: durable string key/value entries behind a trait.
//!
//! The store never reaches for a global: each `RecipeStore`/`MealPlanner`
//! is constructed over a `Storage` handle, and both may share one.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Snapshot key for the recipe collection.
pub const RECIPES_KEY: &str = "recipes";

/// Snapshot key for favorited recipe ids.
pub const FAVORITES_KEY: &str = "favorites";

/// Snapshot key for the weekly meal plan.
pub const MEAL_PLAN_KEY: &str = "mealPlan";

/// String key/value storage with synchronous, whole-value writes.
pub trait Storage {
    /// Read an entry. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite an entry.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Load and decode a JSON entry. Unreadable or malformed entries are
/// reported as absent.
pub fn load_json<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "unreadable entry, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed entry, treating as absent");
            None
        }
    }
}

/// Encode a value as JSON and overwrite the entry.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Storage that fails every read and write.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(Error::storage(key, "device unavailable"))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(Error::storage(key, "device unavailable"))
        }
    }

    #[test]
    fn test_rb010_load_json_absent() {
        let storage = MemoryStorage::new();
        let v: Option<Vec<String>> = load_json(&storage, FAVORITES_KEY);
        assert!(v.is_none());
    }

    #[test]
    fn test_rb010_load_json_malformed_is_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, "{not json").unwrap();
        let v: Option<Vec<String>> = load_json(&storage, FAVORITES_KEY);
        assert!(v.is_none());
    }

    #[test]
    fn test_rb010_load_json_wrong_shape_is_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, r#"{"a": 1}"#).unwrap();
        let v: Option<Vec<String>> = load_json(&storage, FAVORITES_KEY);
        assert!(v.is_none());
    }

    #[test]
    fn test_rb010_load_json_unreadable_is_absent() {
        let v: Option<Vec<String>> = load_json(&BrokenStorage, RECIPES_KEY);
        assert!(v.is_none());
    }

    #[test]
    fn test_rb010_save_then_load() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, FAVORITES_KEY, &["1", "3"]).unwrap();
        let v: Option<Vec<String>> = load_json(&storage, FAVORITES_KEY);
        assert_eq!(v.unwrap(), vec!["1", "3"]);
    }

    #[test]
    fn test_rb010_save_propagates_write_error() {
        let err = save_json(&mut BrokenStorage, RECIPES_KEY, &[1, 2]).unwrap_err();
        assert!(err.to_string().contains("recipes"));
    }
}
