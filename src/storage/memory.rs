//! RB-011: In-memory storage. Clones share one map.

use super::Storage;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared in-memory key/value map. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rb011_get_missing() {
        let s = MemoryStorage::new();
        assert!(s.get("recipes").unwrap().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn test_rb011_set_overwrites() {
        let mut s = MemoryStorage::new();
        s.set("k", "one").unwrap();
        s.set("k", "two").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_rb011_clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.set("favorites", "[\"1\"]").unwrap();
        assert_eq!(b.get("favorites").unwrap().as_deref(), Some("[\"1\"]"));
    }
}
