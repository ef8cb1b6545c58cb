//! Type-safe map wrapper that prevents auto-vivification bugs.
//!
//! Object tables are indexed by instance number. Looking up an instance that
//! was never created must fail, never quietly allocate a default object, so
//! `SyncMap` only creates entries through explicit calls.
//!
//! - `get()` returns `Option<&V>`
//! - `insert_new()` refuses to overwrite an existing key
//! - `rekey()` moves a value to a new key without clobbering another entry

use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

/// Error type for SyncMap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncMapError {
    #[error("Key not found")]
    KeyNotFound,

    #[error("Key already exists")]
    KeyExists,
}

/// A type-safe map wrapper that prevents auto-vivification bugs.
///
/// # Example
///
/// ```
/// use bacnet_object_common::SyncMap;
///
/// let mut map: SyncMap<u32, &str> = SyncMap::new();
///
/// // get() returns None for missing keys (doesn't create entry)
/// assert!(map.get(&7).is_none());
/// assert!(map.is_empty());
///
/// map.insert_new(7, "port").unwrap();
/// assert!(map.insert_new(7, "other").is_err());
/// assert_eq!(map.get(&7), Some(&"port"));
/// ```
#[derive(Debug, Clone)]
pub struct SyncMap<K, V> {
    inner: HashMap<K, V>,
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the map contains the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns a reference to the value for the given key.
    ///
    /// **This never creates entries.**
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Inserts a key-value pair only if the key is absent.
    pub fn insert_new(&mut self, key: K, value: V) -> Result<(), SyncMapError> {
        if self.inner.contains_key(&key) {
            return Err(SyncMapError::KeyExists);
        }
        self.inner.insert(key, value);
        Ok(())
    }

    /// Moves the value stored under `old` to `new`.
    ///
    /// Fails without modifying the map if `old` is missing or `new` is
    /// already taken. Rekeying an entry to its own key is a no-op.
    pub fn rekey(&mut self, old: &K, new: K) -> Result<(), SyncMapError> {
        if !self.inner.contains_key(old) {
            return Err(SyncMapError::KeyNotFound);
        }
        if *old == new {
            return Ok(());
        }
        if self.inner.contains_key(&new) {
            return Err(SyncMapError::KeyExists);
        }
        let value = self.inner.remove(old).ok_or(SyncMapError::KeyNotFound)?;
        self.inner.insert(new, value);
        Ok(())
    }

    /// Removes a key from the map.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    /// Clears all entries from the map.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    /// Returns an iterator over keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    /// Gets the value for a key, or inserts one built by `f`.
    ///
    /// Unlike `get()`, this method **will** create an entry if the key
    /// is not present. Use this when you explicitly want this behavior.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.inner.entry(key).or_insert_with(f)
    }
}

impl<K, V> Default for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_never_creates() {
        let mut map: SyncMap<u32, u32> = SyncMap::new();

        assert!(map.get(&1).is_none());
        assert!(map.is_empty());

        assert!(map.rekey(&1, 2).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_new_rejects_existing() {
        let mut map: SyncMap<u32, &str> = SyncMap::new();
        map.insert_new(1, "a").unwrap();
        assert_eq!(map.insert_new(1, "b"), Err(SyncMapError::KeyExists));
        assert_eq!(map.get(&1), Some(&"a"));
    }

    #[test]
    fn test_rekey() {
        let mut map: SyncMap<u32, &str> = SyncMap::new();
        map.insert_new(1, "a").unwrap();
        map.insert_new(2, "b").unwrap();

        assert_eq!(map.rekey(&1, 2), Err(SyncMapError::KeyExists));
        assert_eq!(map.rekey(&9, 3), Err(SyncMapError::KeyNotFound));
        assert_eq!(map.rekey(&1, 1), Ok(()));

        map.rekey(&1, 3).unwrap();
        assert!(map.get(&1).is_none());
        assert_eq!(map.get(&3), Some(&"a"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: SyncMap<u32, i32> = SyncMap::new();

        let value = map.get_or_insert_with(5, || 42);
        assert_eq!(*value, 42);

        let value = map.get_or_insert_with(5, || 100);
        assert_eq!(*value, 42);
        assert_eq!(map.len(), 1);
    }
}
