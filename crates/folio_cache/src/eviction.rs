//! Pluggable eviction for the locator cache.

use std::collections::VecDeque;
use std::fmt;

/// Decides which filename to drop when the cache grows.
///
/// The cache reports every insert, hit and removal; the policy answers inserts
/// with the filename to evict, if any.
pub trait EvictionPolicy: Send + fmt::Debug {
    /// A new filename was inserted. Returns a filename to evict.
    fn record_insert(&mut self, filename: &str) -> Option<String>;

    /// A cached filename was resolved again.
    fn record_access(&mut self, filename: &str);

    /// A filename was removed from the cache.
    fn record_remove(&mut self, filename: &str);

    /// The cache was cleared.
    fn reset(&mut self);
}

/// Never evicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl EvictionPolicy for Unbounded {
    fn record_insert(&mut self, _filename: &str) -> Option<String> {
        None
    }

    fn record_access(&mut self, _filename: &str) {}

    fn record_remove(&mut self, _filename: &str) {}

    fn reset(&mut self) {}
}

/// Evicts the least recently resolved filename beyond a fixed capacity.
///
/// # Example
///
/// ```
/// use folio_cache::{EvictionPolicy, LruPolicy};
///
/// let mut lru = LruPolicy::new(2);
/// assert_eq!(lru.record_insert("a.jpg"), None);
/// assert_eq!(lru.record_insert("b.jpg"), None);
/// lru.record_access("a.jpg");
/// assert_eq!(lru.record_insert("c.jpg").as_deref(), Some("b.jpg"));
/// ```
#[derive(Debug, Clone)]
pub struct LruPolicy {
    capacity: usize,
    access_order: VecDeque<String>,
}

impl LruPolicy {
    /// Create an LRU policy holding at most `capacity` filenames (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            access_order: VecDeque::new(),
        }
    }

    /// Maximum number of filenames kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn forget(&mut self, filename: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == filename) {
            self.access_order.remove(pos);
        }
    }
}

impl EvictionPolicy for LruPolicy {
    fn record_insert(&mut self, filename: &str) -> Option<String> {
        self.forget(filename);
        self.access_order.push_back(filename.to_string());
        if self.access_order.len() > self.capacity {
            self.access_order.pop_front()
        } else {
            None
        }
    }

    fn record_access(&mut self, filename: &str) {
        self.forget(filename);
        self.access_order.push_back(filename.to_string());
    }

    fn record_remove(&mut self, filename: &str) {
        self.forget(filename);
    }

    fn reset(&mut self) {
        self.access_order.clear();
    }
}
