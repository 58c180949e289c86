use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde_json::Value;

/// Key-value store with per-entry expiry.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value, ttl: Duration);
    fn delete(&self, key: &str);
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache; expired entries are dropped on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_owned(), entry);
    }

    fn delete(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());
        cache.set("k", json!({"a": 1}), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(json!({"a": 1})));
        cache.delete("k");
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn entries_expire() {
        let cache = MemoryCache::new();
        cache.set("k", json!(1), Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get("k").is_none());
    }
}
