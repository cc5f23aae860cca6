//! Cache of decoded read queries, tagged by collection.
//!
//! Entries are never edited in place: a mutation bumps the collection's
//! revision, which drops every entry recorded under an older revision, and
//! the revisions of every collection that displays lookups from it. Entries
//! older than `stale_ms` are misses, and the least recently used entry is
//! evicted once `max_entries` is exceeded.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    List,
    Search,
    All,
    ById,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub collection: &'static str,
    pub kind: QueryKind,
    /// Encoded parameters (query string or id)
    pub params: String,
}

impl QueryKey {
    pub fn new(collection: &'static str, kind: QueryKind, params: impl Into<String>) -> Self {
        Self {
            collection,
            kind,
            params: params.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Age in milliseconds after which an entry is refetched
    pub stale_ms: u64,
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_ms: 30_000,
            max_entries: 200,
        }
    }
}

/// Milliseconds since the epoch
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

fn wall_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

struct Entry {
    revision: u64,
    fetched_at: i64,
    last_used: u64,
    value: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    revisions: HashMap<&'static str, u64>,
    /// referenced collection -> collections showing its lookups
    dependents: HashMap<&'static str, Vec<&'static str>>,
    tick: u64,
}

impl CacheState {
    fn revision(&self, collection: &str) -> u64 {
        self.revisions.get(collection).copied().unwrap_or(0)
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_lru(&mut self, max_entries: usize) {
        while self.entries.len() > max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    log::debug!("query cache: evicting {:?}", key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

/// Shared handle; clones see the same entries
#[derive(Clone)]
pub struct QueryCache {
    state: Arc<Mutex<CacheState>>,
    settings: CacheSettings,
    clock: Clock,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_settings(CacheSettings::default())
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CacheSettings) -> Self {
        Self::with_clock(settings, Arc::new(wall_clock))
    }

    pub fn with_clock(settings: CacheSettings, clock: Clock) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            settings,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn is_fresh(&self, fetched_at: i64, now: i64) -> bool {
        now.saturating_sub(fetched_at) <= self.settings.stale_ms as i64
    }

    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let now = (self.clock)();
        let mut state = self.lock();
        let current = state.revision(key.collection);
        let usable = state
            .entries
            .get(key)
            .map(|entry| entry.revision == current && self.is_fresh(entry.fetched_at, now))?;
        if !usable {
            state.entries.remove(key);
            return None;
        }
        let tick = state.next_tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_used = tick;
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store a value fetched while the collection was at `revision`.
    ///
    /// A response that raced with an invalidation carries an old revision
    /// and is not stored.
    pub fn insert_at<T: Send + Sync + 'static>(&self, key: QueryKey, revision: u64, value: T) {
        let now = (self.clock)();
        let mut state = self.lock();
        if state.revision(key.collection) != revision {
            log::debug!("query cache: dropping stale {:?}", key);
            return;
        }
        let tick = state.next_tick();
        state.entries.insert(
            key,
            Entry {
                revision,
                fetched_at: now,
                last_used: tick,
                value: Arc::new(value),
            },
        );
        state.evict_lru(self.settings.max_entries);
    }

    pub fn revision(&self, collection: &str) -> u64 {
        self.lock().revision(collection)
    }

    /// Record that rows of `dependent` carry lookups (names, codes) of
    /// `referenced`, so invalidating `referenced` also drops `dependent`
    pub fn link(&self, referenced: &'static str, dependent: &'static str) {
        if referenced == dependent {
            return;
        }
        let mut state = self.lock();
        let dependents = state.dependents.entry(referenced).or_default();
        if !dependents.contains(&dependent) {
            dependents.push(dependent);
        }
    }

    /// Drop every query tagged with `collection` or a collection linked to it
    pub fn invalidate(&self, collection: &'static str) {
        let mut state = self.lock();
        let mut pending = vec![collection];
        let mut done: Vec<&'static str> = Vec::new();
        while let Some(next) = pending.pop() {
            if done.contains(&next) {
                continue;
            }
            done.push(next);
            *state.revisions.entry(next).or_insert(0) += 1;
            if let Some(dependents) = state.dependents.get(next) {
                pending.extend(dependents.iter().copied());
            }
        }
        state.entries.retain(|key, _| !done.contains(&key.collection));
        log::debug!("query cache: invalidated {:?}", done);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn manual_clock() -> (Arc<AtomicI64>, Clock) {
        let now = Arc::new(AtomicI64::new(1_000));
        let reader = Arc::clone(&now);
        (now, Arc::new(move || reader.load(Ordering::SeqCst)))
    }

    #[test]
    fn test_invalidate_is_scoped_to_collection() {
        let cache = QueryCache::new();
        let banks = QueryKey::new("banks", QueryKind::List, "page=0");
        let states = QueryKey::new("states", QueryKind::List, "page=0");
        cache.insert_at(banks.clone(), 0, vec![1, 2]);
        cache.insert_at(states.clone(), 0, vec![3]);

        cache.invalidate("banks");

        assert_eq!(cache.get::<Vec<i32>>(&banks), None);
        assert_eq!(cache.get::<Vec<i32>>(&states), Some(vec![3]));
        assert_eq!(cache.revision("banks"), 1);
    }

    #[test]
    fn test_stale_insert_is_ignored() {
        let cache = QueryCache::new();
        let key = QueryKey::new("cities", QueryKind::ById, "4");
        let revision = cache.revision("cities");
        cache.invalidate("cities");
        cache.insert_at(key.clone(), revision, "Pune".to_string());
        assert!(cache.get::<String>(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let cache = QueryCache::new();
        let key = QueryKey::new("banks", QueryKind::All, "");
        cache.insert_at(key.clone(), 0, 5_u32);
        assert_eq!(cache.get::<String>(&key), None);
        assert_eq!(cache.get::<u32>(&key), Some(5));
    }

    #[test]
    fn test_old_entries_are_misses() {
        let (now, clock) = manual_clock();
        let settings = CacheSettings {
            stale_ms: 500,
            max_entries: 10,
        };
        let cache = QueryCache::with_clock(settings, clock);
        let key = QueryKey::new("banks", QueryKind::List, "page=0");
        cache.insert_at(key.clone(), 0, 1_u32);

        now.fetch_add(500, Ordering::SeqCst);
        assert_eq!(cache.get::<u32>(&key), Some(1));

        now.fetch_add(1, Ordering::SeqCst);
        assert_eq!(cache.get::<u32>(&key), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let settings = CacheSettings {
            stale_ms: 60_000,
            max_entries: 2,
        };
        let cache = QueryCache::with_settings(settings);
        let first = QueryKey::new("banks", QueryKind::Search, "bankName=a");
        let second = QueryKey::new("banks", QueryKind::Search, "bankName=b");
        let third = QueryKey::new("banks", QueryKind::Search, "bankName=c");
        cache.insert_at(first.clone(), 0, 1_u32);
        cache.insert_at(second.clone(), 0, 2_u32);
        // touching `first` leaves `second` as the oldest
        assert_eq!(cache.get::<u32>(&first), Some(1));

        cache.insert_at(third.clone(), 0, 3_u32);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<u32>(&second), None);
        assert_eq!(cache.get::<u32>(&first), Some(1));
        assert_eq!(cache.get::<u32>(&third), Some(3));
    }

    #[test]
    fn test_distinct_searches_stay_bounded() {
        let cache = QueryCache::with_settings(CacheSettings {
            stale_ms: 60_000,
            max_entries: 50,
        });
        for i in 0..500 {
            cache.insert_at(QueryKey::new("banks", QueryKind::Search, format!("q={}", i)), 0, i);
        }
        assert_eq!(cache.len(), 50);
    }

    #[test]
    fn test_invalidation_reaches_linked_collections() {
        let cache = QueryCache::new();
        cache.link("states", "cities");
        cache.link("cities", "locations");
        let states = QueryKey::new("states", QueryKind::List, "page=0");
        let cities = QueryKey::new("cities", QueryKind::List, "page=0");
        let locations = QueryKey::new("locations", QueryKind::List, "page=0");
        let banks = QueryKey::new("banks", QueryKind::List, "page=0");
        for key in [&states, &cities, &locations, &banks] {
            cache.insert_at(key.clone(), 0, 1_u32);
        }

        cache.invalidate("states");

        assert_eq!(cache.get::<u32>(&cities), None);
        assert_eq!(cache.get::<u32>(&locations), None);
        assert_eq!(cache.get::<u32>(&banks), Some(1));
        assert_eq!(cache.revision("cities"), 1);
        assert_eq!(cache.revision("banks"), 0);
    }
}
