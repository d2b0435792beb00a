//! Typed metadata store for an environment.
//!
//! Values are stored type-erased and recovered through a [`Key`] that carries
//! the value type, so a lookup can never observe a value of the wrong type.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Default memory handed to the template engine (`key=value` pairs from the
/// command line).
pub type Memory = BTreeMap<String, String>;

/// The default memory of the run.
pub const MEMORY: Key<Memory> = Key::new("memory");

/// The resolved project root (the input path).
pub const PROJECT: Key<PathBuf> = Key::new("project");

/// The resolved output root.
pub const OUTPUT: Key<PathBuf> = Key::new("output");

/// A named metadata key for values of type `T`.
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derives would require `T: Clone`/`T: Copy`.
impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

/// Key/value metadata store.
#[derive(Default)]
pub struct Meta {
    entries: FxHashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the value it replaced.
    ///
    /// A replaced value of a different type is dropped and `None` is returned.
    pub fn put<T: Any + Send + Sync>(&mut self, key: Key<T>, value: T) -> Option<T> {
        self.entries
            .insert(key.name, Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: Any + Send + Sync>(&self, key: Key<T>) -> Option<&T> {
        self.entries
            .get(key.name)
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn contains<T: Any + Send + Sync>(&self, key: Key<T>) -> bool {
        self.get(key).is_some()
    }

    pub fn remove<T: Any + Send + Sync>(&mut self, key: Key<T>) -> Option<T> {
        if !self.contains(key) {
            return None;
        }
        self.entries
            .remove(key.name)
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("Meta").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut meta = Meta::new();
        assert!(meta.is_empty());

        meta.put(PROJECT, PathBuf::from("/tmp/project"));
        assert_eq!(meta.get(PROJECT), Some(&PathBuf::from("/tmp/project")));
        assert!(meta.get(OUTPUT).is_none());
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_put_returns_previous_value() {
        let mut meta = Meta::new();
        assert!(meta.put(OUTPUT, PathBuf::from("a")).is_none());
        assert_eq!(meta.put(OUTPUT, PathBuf::from("b")), Some(PathBuf::from("a")));
        assert_eq!(meta.get(OUTPUT), Some(&PathBuf::from("b")));
    }

    #[test]
    fn test_mismatched_type_is_invisible() {
        const PROJECT_NAME: Key<String> = Key::new("project");

        let mut meta = Meta::new();
        meta.put(PROJECT, PathBuf::from("/tmp/project"));

        assert!(meta.get(PROJECT_NAME).is_none());
        assert!(meta.remove(PROJECT_NAME).is_none());
        assert!(meta.contains(PROJECT));
    }

    #[test]
    fn test_memory_key() {
        let mut memory = Memory::new();
        memory.insert("name".to_string(), "value".to_string());

        let mut meta = Meta::new();
        meta.put(MEMORY, memory.clone());

        assert_eq!(meta.get(MEMORY), Some(&memory));
        assert_eq!(meta.remove(MEMORY), Some(memory));
        assert!(meta.is_empty());
    }
}
