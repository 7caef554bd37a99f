//=========================================================================
// Persistence
//=========================================================================
//
// String key/value storage used to remember small pieces of navigation
// state between sessions, such as the last visible destination.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== KeyValueStore Trait =================================================

/// Minimal local key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str);
}

//=== MemoryStore =========================================================

/// In-memory store, handy for tests and tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
