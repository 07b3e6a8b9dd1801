//! Id-keyed, insertion-ordered entity collection.

use std::collections::HashMap;

/// Something with a stable string identity.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for super::Resource {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for super::Match {
    fn key(&self) -> &str {
        &self.id
    }
}

/// In-memory registry of entities keyed by id.
///
/// Lookups are by id; iteration follows insertion order so listings and
/// searches are reproducible for a given registry state.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item. Returns `false` (and keeps the existing one) if the
    /// id is already taken.
    pub fn insert(&mut self, item: T) -> bool {
        let key = item.key().to_string();
        if self.items.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.items.insert(key, item);
        true
    }

    /// Removes an item by id.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let item = self.items.remove(id)?;
        self.order.retain(|k| k != id);
        Some(item)
    }

    /// Looks up an item.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    /// Whether an id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(move |k| self.items.get(k))
    }

    /// Mutable items, unordered.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items.values_mut()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RefereeRole, Resource};

    #[test]
    fn test_insertion_order_preserved() {
        let mut reg = Registry::new();
        for id in ["c", "a", "b"] {
            assert!(reg.insert(Resource::referee(id, RefereeRole::Line).with_id(id)));
        }
        let ids: Vec<&str> = reg.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut reg = Registry::new();
        assert!(reg.insert(Resource::generic("first").with_id("X")));
        assert!(!reg.insert(Resource::generic("second").with_id("X")));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("X").unwrap().name, "first");
    }

    #[test]
    fn test_remove() {
        let mut reg = Registry::new();
        reg.insert(Resource::generic("a").with_id("A"));
        reg.insert(Resource::generic("b").with_id("B"));
        assert!(reg.remove("A").is_some());
        assert!(reg.remove("A").is_none());
        assert!(!reg.contains("A"));
        assert_eq!(reg.iter().count(), 1);
        assert!(reg.remove("B").is_some());
        assert!(reg.is_empty());
    }
}
