//! In-memory store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::{CacheError, KeyValueStore};

/// A [`KeyValueStore`] held entirely in memory.
///
/// Used for tests and headless hosts. Writes can be made to fail on demand
/// with [`MemoryStore::fail_writes`] to exercise storage-failure handling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Make every subsequent `set`/`delete` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<(), CacheError> {
        if self.fail_writes.get() {
            return Err(CacheError::StoreError(format!("write rejected for {key}")));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.check_writable(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check_writable(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_wholesale() {
        let store = MemoryStore::new();
        store.set("cart", "[1]").unwrap();
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_unset_key() {
        let store = MemoryStore::new();
        assert!(store.delete("missing").is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_writes_leave_value_untouched() {
        let store = MemoryStore::with_entries([("cart", "[]")]);
        store.fail_writes(true);

        assert!(matches!(
            store.set("cart", "[{}]"),
            Err(CacheError::StoreError(_))
        ));
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.fail_writes(false);
        assert!(store.set("cart", "[{}]").is_ok());
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::with_entries([("darkMode", "true"), ("cart", "[]")]);
        assert_eq!(store.keys().unwrap(), vec!["cart", "darkMode"]);
        assert!(store.exists("cart").unwrap());
    }
}
