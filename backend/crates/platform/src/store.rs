//! Expiring LRU store
//!
//! A bounded in-memory key-value store with per-entry expiry. Expired
//! entries are treated as absent even before they are physically purged;
//! capacity-based eviction (least-recently-used first) is a memory bound
//! only and is never visible to callers.

use std::collections::HashMap;

/// One stored value with its expiry and recency bookkeeping
#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    expires_at_ms: i64,
    /// Monotonic access counter used for LRU ordering
    touched: u64,
}

/// Bounded key-value store with TTL semantics and LRU eviction
///
/// `get` and `insert` take the caller's clock (`now_ms`) so the store has
/// no ambient time dependency; a value whose `expires_at_ms <= now_ms` is
/// reported absent and dropped.
#[derive(Debug)]
pub struct ExpiringLru<V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<String, Slot<V>>,
}

impl<V> ExpiringLru<V> {
    /// Create a store holding at most `capacity` live entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tick: 0,
            entries: HashMap::new(),
        }
    }

    /// Look up a live value, marking it as recently used
    ///
    /// Returns `None` for missing keys and for entries whose TTL has
    /// elapsed; expired entries are dropped on the spot.
    pub fn get(&mut self, key: &str, now_ms: i64) -> Option<&V> {
        match self.entries.get(key) {
            Some(slot) if slot.expires_at_ms <= now_ms => {
                self.entries.remove(key);
                None
            }
            Some(_) => {
                self.tick += 1;
                let tick = self.tick;
                let slot = self.entries.get_mut(key)?;
                slot.touched = tick;
                Some(&slot.value)
            }
            None => None,
        }
    }

    /// Insert or overwrite a value
    ///
    /// When the store is full, expired entries are purged first; if none
    /// were expired, the least-recently-used entry is evicted silently.
    pub fn insert(&mut self, key: impl Into<String>, value: V, expires_at_ms: i64, now_ms: i64) {
        let key = key.into();
        self.tick += 1;
        let slot = Slot {
            value,
            expires_at_ms,
            touched: self.tick,
        };

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.entries.retain(|_, s| s.expires_at_ms > now_ms);
            if self.entries.len() >= self.capacity {
                self.evict_lru();
            }
        }

        self.entries.insert(key, slot);
    }

    /// Remove a key unconditionally
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|slot| slot.value)
    }

    /// Number of physically stored entries (may include expired ones)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Linear scan is fine here: capacity bounds the key space to the
    // active caller population, which stays small.
    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| slot.touched)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent() {
        let mut store: ExpiringLru<u32> = ExpiringLru::new(4);
        assert!(store.get("missing", 0).is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = ExpiringLru::new(4);
        store.insert("a", 1u32, 1_000, 0);
        assert_eq!(store.get("a", 500), Some(&1));
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let mut store = ExpiringLru::new(4);
        store.insert("a", 1u32, 1_000, 0);

        // Exactly at expiry counts as expired
        assert!(store.get("a", 1_000).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_extends_expiry() {
        let mut store = ExpiringLru::new(4);
        store.insert("a", 1u32, 1_000, 0);
        store.insert("a", 2u32, 5_000, 900);
        assert_eq!(store.get("a", 2_000), Some(&2));
    }

    #[test]
    fn test_capacity_evicts_lru() {
        let mut store = ExpiringLru::new(2);
        store.insert("a", 1u32, 10_000, 0);
        store.insert("b", 2u32, 10_000, 0);

        // Touch "a" so "b" becomes least recently used
        assert!(store.get("a", 1).is_some());

        store.insert("c", 3u32, 10_000, 2);
        assert_eq!(store.len(), 2);
        assert!(store.get("b", 3).is_none());
        assert!(store.get("a", 3).is_some());
        assert!(store.get("c", 3).is_some());
    }

    #[test]
    fn test_capacity_prefers_purging_expired() {
        let mut store = ExpiringLru::new(2);
        store.insert("a", 1u32, 100, 0);
        store.insert("b", 2u32, 10_000, 0);

        // "a" is expired by now; it should be purged instead of evicting "b"
        store.insert("c", 3u32, 10_000, 5_000);
        assert!(store.get("b", 5_001).is_some());
        assert!(store.get("c", 5_001).is_some());
    }

    #[test]
    fn test_remove() {
        let mut store = ExpiringLru::new(4);
        store.insert("a", 1u32, 10_000, 0);
        assert_eq!(store.remove("a"), Some(1));
        assert!(store.get("a", 0).is_none());
    }
}
