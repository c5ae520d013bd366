use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use tracing::debug;

struct Entry<V> {
    value: V,
    last_used: u64,
}

/// Capacity-bounded memoization cache with least-recently-used eviction.
///
/// Owned by whoever does the expensive lookup, with the capacity injected at
/// construction so tests can control and reset it deterministically. The
/// mutex only serves the shared-reference API; the data-access path runs one
/// request at a time and no cross-request synchronization is promised.
pub struct LruCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    inner: Mutex<State<K, V>>,
    capacity: usize,
}

struct State<K, V> {
    entries: HashMap<K, Entry<V>>,
    tick: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be non-zero");
        Self {
            inner: Mutex::new(State {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity,
        }
    }

    /// Returns the cached value for `key`, refreshing its recency.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.inner.lock().unwrap();
        let tick = state.tick + 1;
        state.tick = tick;
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = tick;
                debug!("Cache HIT for key: {:?}", key);
                Some(entry.value.clone())
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    /// Stores `value` under `key`, evicting the least-recently-used entry
    /// if the cache is full.
    pub fn put(&self, key: K, value: V) {
        let mut state = self.inner.lock().unwrap();
        let tick = state.tick + 1;
        state.tick = tick;

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            if let Some(oldest) = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(k, _)| k.clone())
            {
                debug!("Cache EVICT for key: {:?}", oldest);
                state.entries.remove(&oldest);
            }
        }

        debug!("Cache PUT for key: {:?}", key);
        state.entries.insert(
            key,
            Entry {
                value,
                last_used: tick,
            },
        );
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.inner.lock().unwrap().entries.contains_key(key)
    }
}
