use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::key::QueryKey;

#[derive(Default)]
struct Entry {
    value: Option<Rc<dyn Any>>,
    stale: bool,
    in_flight: bool,
    version: u64,
}

struct Subscriber {
    id: u64,
    prefix: QueryKey,
    listener: Rc<dyn Fn()>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<QueryKey, Entry>,
    subscribers: Vec<Subscriber>,
    next_subscriber: u64,
}

/// Keyed store for cached server reads.
///
/// Clonable handle over shared state; all handles see the same entries.
/// The cache is single-threaded and cooperative: callers mutate it only
/// between await points, so interior mutability is a `RefCell`, not a lock.
///
/// Mutation success handlers call [`invalidate`](Self::invalidate) /
/// [`invalidate_prefix`](Self::invalidate_prefix) on their declared
/// dependency list; invalidation is synchronous, the refetches it provokes
/// are not awaited by the caller.
#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Rc<RefCell<CacheInner>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value under `key`, if any. Stale values are still returned;
    /// check [`is_stale`](Self::is_stale) to decide whether to refetch.
    pub fn get<T: 'static>(&self, key: &QueryKey) -> Option<Rc<T>> {
        let inner = self.inner.borrow();
        let value = inner.entries.get(key)?.value.clone()?;
        value.downcast::<T>().ok()
    }

    /// Store a fresh value under `key` and notify matching subscribers.
    pub fn set<T: 'static>(&self, key: &QueryKey, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.value = Some(Rc::new(value));
            entry.stale = false;
            entry.version += 1;
        }
        self.notify(key);
    }

    /// Whether the next access under `key` should refetch.
    /// Missing and value-less entries count as stale.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        let inner = self.inner.borrow();
        inner
            .entries
            .get(key)
            .map(|e| e.stale || e.value.is_none())
            .unwrap_or(true)
    }

    /// Monotonic per-key change counter; bumps on every set and invalidation.
    pub fn version(&self, key: &QueryKey) -> u64 {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.version)
            .unwrap_or(0)
    }

    /// Mark `key` stale, keeping its value for display while it refetches.
    pub fn invalidate(&self, key: &QueryKey) {
        {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.stale = true;
            entry.version += 1;
        }
        self.notify(key);
    }

    /// Mark every key under `prefix` stale and notify once.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        {
            let mut inner = self.inner.borrow_mut();
            for (key, entry) in inner.entries.iter_mut() {
                if key.starts_with(prefix) {
                    entry.stale = true;
                    entry.version += 1;
                }
            }
        }
        self.notify(prefix);
    }

    /// Evict an entry entirely.
    pub fn remove(&self, key: &QueryKey) {
        self.inner.borrow_mut().entries.remove(key);
        self.notify(key);
    }

    /// Claim the fetch slot for `key`. Returns `false` when another fetch
    /// for the same key is already in flight; the caller should then wait
    /// for that fetch's `set` notification instead of issuing its own
    /// request. This is where same-key requests coalesce.
    pub fn begin_fetch(&self, key: &QueryKey) -> bool {
        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.entry(key.clone()).or_default();
        if entry.in_flight {
            false
        } else {
            entry.in_flight = true;
            true
        }
    }

    /// Release the fetch slot claimed by [`begin_fetch`](Self::begin_fetch).
    pub fn finish_fetch(&self, key: &QueryKey) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(key) {
            entry.in_flight = false;
        }
    }

    /// Register a listener fired whenever a key related to `prefix` is set,
    /// invalidated, or removed. Dropping the returned [`Subscription`]
    /// unregisters it (component-unmount cleanup).
    pub fn subscribe(&self, prefix: QueryKey, listener: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push(Subscriber {
            id,
            prefix,
            listener: Rc::new(listener),
        });
        Subscription {
            id,
            inner: Rc::clone(&self.inner),
        }
    }

    fn notify(&self, key: &QueryKey) {
        // Clone matching listeners first; a listener may re-enter the cache.
        let listeners: Vec<Rc<dyn Fn()>> = {
            let inner = self.inner.borrow();
            inner
                .subscribers
                .iter()
                .filter(|s| key.starts_with(&s.prefix) || s.prefix.starts_with(key))
                .map(|s| Rc::clone(&s.listener))
                .collect()
        };
        for listener in listeners {
            listener();
        }
    }
}

/// Handle for a registered cache listener; unregisters on drop.
pub struct Subscription {
    id: u64,
    inner: Rc<RefCell<CacheInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|s| s.id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn typed_get_and_set() {
        let cache = QueryCache::new();
        let key = QueryKey::from(["accounts"]);

        assert!(cache.get::<Vec<String>>(&key).is_none());
        assert!(cache.is_stale(&key));

        cache.set(&key, vec!["hdfc".to_string()]);
        let value = cache.get::<Vec<String>>(&key).unwrap();
        assert_eq!(value[0], "hdfc");
        assert!(!cache.is_stale(&key));

        // Wrong type downcasts to None rather than panicking.
        assert!(cache.get::<u32>(&key).is_none());
    }

    #[test]
    fn invalidate_keeps_value_but_marks_stale() {
        let cache = QueryCache::new();
        let key = QueryKey::from(["goals"]);
        cache.set(&key, 7u32);
        let v1 = cache.version(&key);

        cache.invalidate(&key);
        assert!(cache.is_stale(&key));
        assert_eq!(*cache.get::<u32>(&key).unwrap(), 7);
        assert!(cache.version(&key) > v1);
    }

    #[test]
    fn mutation_invalidates_list_and_entity_keys() {
        let cache = QueryCache::new();
        let list = QueryKey::from(["accounts"]);
        let entity = list.join("42");
        let other = list.join("7");
        cache.set(&list, 1u8);
        cache.set(&entity, 2u8);
        cache.set(&other, 3u8);

        // What an account-update mutation declares: the list and itself.
        cache.invalidate(&list);
        cache.invalidate(&entity);

        assert!(cache.is_stale(&list));
        assert!(cache.is_stale(&entity));
        assert!(!cache.is_stale(&other));
    }

    #[test]
    fn prefix_invalidation_sweeps_filter_variants() {
        let cache = QueryCache::new();
        let base = QueryKey::from(["transactions"]);
        let debit = base.join("type=DEBIT");
        let by_account = base.join("account_id=42");
        cache.set(&base, 0u8);
        cache.set(&debit, 1u8);
        cache.set(&by_account, 2u8);
        cache.set(&QueryKey::from(["accounts"]), 3u8);

        cache.invalidate_prefix(&base);

        assert!(cache.is_stale(&base));
        assert!(cache.is_stale(&debit));
        assert!(cache.is_stale(&by_account));
        assert!(!cache.is_stale(&QueryKey::from(["accounts"])));
    }

    #[test]
    fn subscription_fires_until_dropped() {
        let cache = QueryCache::new();
        let key = QueryKey::from(["sms"]);
        let fired = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&fired);
        let sub = cache.subscribe(key.clone(), move || counter.set(counter.get() + 1));

        cache.set(&key, 1u8);
        cache.invalidate(&key);
        assert_eq!(fired.get(), 2);

        // A broad listener hears entity-level changes too.
        cache.set(&key.join("5"), 2u8);
        assert_eq!(fired.get(), 3);

        // Unrelated keys stay quiet.
        cache.set(&QueryKey::from(["accounts"]), 4u8);
        assert_eq!(fired.get(), 3);

        drop(sub);
        cache.set(&key, 5u8);
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn entity_listener_hears_prefix_invalidation() {
        let cache = QueryCache::new();
        let entity = QueryKey::from(["transactions", "type=DEBIT"]);
        let fired = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&fired);
        let _sub = cache.subscribe(entity.clone(), move || counter.set(counter.get() + 1));

        cache.set(&entity, 1u8);
        cache.invalidate_prefix(&QueryKey::from(["transactions"]));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn fetch_slot_coalesces() {
        let cache = QueryCache::new();
        let key = QueryKey::from(["accounts"]);

        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        cache.finish_fetch(&key);
        assert!(cache.begin_fetch(&key));
    }

    #[tokio::test]
    async fn concurrent_fetchers_dedupe() {
        let cache = QueryCache::new();
        let key = QueryKey::from(["accounts"]);
        let fetches = Rc::new(Cell::new(0u32));

        // Two hook instances racing for the same key: only the slot winner
        // performs the fetch, the loser picks the value up from the cache.
        let winner = {
            let cache = cache.clone();
            let key = key.clone();
            let fetches = Rc::clone(&fetches);
            async move {
                assert!(cache.begin_fetch(&key));
                fetches.set(fetches.get() + 1);
                // Suspend mid-request so the second fetcher arrives in flight.
                tokio::task::yield_now().await;
                cache.set(&key, 42u32);
                cache.finish_fetch(&key);
                cache.get::<u32>(&key)
            }
        };
        let loser = {
            let cache = cache.clone();
            let key = key.clone();
            let fetches = Rc::clone(&fetches);
            async move {
                if cache.begin_fetch(&key) {
                    fetches.set(fetches.get() + 1);
                    cache.set(&key, 99u32);
                    cache.finish_fetch(&key);
                }
                while cache.get::<u32>(&key).is_none() {
                    tokio::task::yield_now().await;
                }
                cache.get::<u32>(&key)
            }
        };

        let (a, b) = tokio::join!(winner, loser);

        assert_eq!(fetches.get(), 1);
        assert_eq!(*a.unwrap(), 42);
        assert_eq!(*b.unwrap(), 42);
    }
}
