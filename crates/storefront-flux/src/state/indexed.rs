//! Ordered, id-keyed collection

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entities addressed by id, iterated in `all_ids` order
///
/// `all_ids` and the keys of `by_id` always hold the same set of ids.
/// New ids are appended; only a wholesale replacement reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indexed<T> {
    pub all_ids: Vec<String>,
    pub by_id: BTreeMap<String, T>,
}

impl<T> Default for Indexed<T> {
    fn default() -> Self {
        Self {
            all_ids: Vec::new(),
            by_id: BTreeMap::new(),
        }
    }
}

impl<T> Indexed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, entity)` pairs; a repeated id keeps its first position
    pub fn from_entries(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut indexed = Self::new();
        for (id, entity) in entries {
            indexed.insert(id, entity);
        }
        indexed
    }

    /// Insert or replace; new ids go to the end
    pub fn insert(&mut self, id: String, entity: T) {
        if !self.by_id.contains_key(&id) {
            self.all_ids.push(id.clone());
        }
        self.by_id.insert(id, entity);
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.by_id.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }

    /// Entities in display order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.all_ids.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.by_id.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_sync() {
        let mut indexed = Indexed::new();
        indexed.insert("b".to_string(), 1);
        indexed.insert("a".to_string(), 2);
        indexed.insert("b".to_string(), 3);

        assert_eq!(indexed.all_ids, vec!["b", "a"]);
        assert_eq!(indexed.by_id.len(), 2);
        assert_eq!(indexed.iter().copied().collect::<Vec<_>>(), vec![3, 2]);
    }
}
