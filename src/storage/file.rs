//! RB-012: Directory-backed storage: one JSON file per key, atomic writes.

use super::Storage;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Storage rooted at a state directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Derive the file path for a key within the state directory.
pub fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = entry_path(&self.dir, key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::storage(key, format!("cannot read {}: {}", path.display(), e)))?;
        Ok(Some(content))
    }

    /// Write to a temp file, then rename over the entry.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            Error::storage(key, format!("cannot create dir {}: {}", self.dir.display(), e))
        })?;

        let path = entry_path(&self.dir, key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value).map_err(|e| {
            Error::storage(key, format!("cannot write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            Error::storage(
                key,
                format!(
                    "cannot rename {} → {}: {}",
                    tmp_path.display(),
                    path.display(),
                    e
                ),
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rb012_entry_path() {
        let p = entry_path(Path::new("/state"), "mealPlan");
        assert_eq!(p, PathBuf::from("/state/mealPlan.json"));
    }

    #[test]
    fn test_rb012_get_nonexistent() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStorage::new(dir.path());
        assert!(s.get("recipes").unwrap().is_none());
    }

    #[test]
    fn test_rb012_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = FileStorage::new(dir.path().join("nested"));
        s.set("favorites", "[\"1\"]").unwrap();
        assert_eq!(s.get("favorites").unwrap().as_deref(), Some("[\"1\"]"));

        let reopened = FileStorage::new(dir.path().join("nested"));
        assert_eq!(
            reopened.get("favorites").unwrap().as_deref(),
            Some("[\"1\"]")
        );
    }

    #[test]
    fn test_rb012_atomic_write_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = FileStorage::new(dir.path());
        s.set("recipes", "[]").unwrap();
        assert!(!dir.path().join("recipes.json.tmp").exists());
        assert!(dir.path().join("recipes.json").exists());
    }

    #[test]
    fn test_rb012_set_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut s = FileStorage::new(&blocker);
        let err = s.set("recipes", "[]").unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
