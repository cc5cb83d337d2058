//! LRU Tracker Module
//!
//! Access order used by the in-process store to pick eviction victims.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered by last access: front is the most recent, back the oldest.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_touch_existing_key_moves_it_to_front() {
        let mut lru = LruTracker::new();

        lru.touch("product:1");
        lru.touch("product:2");
        lru.touch("product:3");
        lru.touch("product:1");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.evict_oldest(), Some("product:2".to_string()));
        assert_eq!(lru.evict_oldest(), Some("product:3".to_string()));
        assert_eq!(lru.evict_oldest(), Some("product:1".to_string()));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch("product:1");
        lru.touch("product:2");
        lru.remove("product:1");
        lru.remove("missing");

        assert_eq!(lru.len(), 1);
        assert!(!lru.contains("product:1"));
        assert!(lru.contains("product:2"));
    }
}
