//! Storage for per-feature state.
//!
//! Backed by DashMap, which keeps the [`Storage`] port's `Send + Sync`
//! contract; the enhancer itself only touches it from the page thread.

use crate::application::ports::Storage;
use dashmap::DashMap;
use std::hash::Hash;

/// Thread-safe sharded storage backed by DashMap.
#[derive(Debug)]
pub struct ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    map: DashMap<K, V>,
}

impl<K, V> ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Read a copy of a value without creating it.
    pub fn get_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }
}

impl<K, V> Default for ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Storage<K, V> for ShardedStorage<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        let entry = self.map.entry(key);
        let mut value_ref = entry.or_insert_with(factory);
        accessor(&mut value_ref)
    }

    fn get<R>(&self, key: &K, reader: impl FnOnce(&V) -> R) -> Option<R> {
        self.map.get(key).map(|entry| reader(entry.value()))
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for entry in self.map.iter() {
            f(entry.key(), entry.value());
        }
    }
}

impl<K, V> Storage<K, V> for std::sync::Arc<ShardedStorage<K, V>>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        (**self).with_entry_mut(key, factory, accessor)
    }

    fn get<R>(&self, key: &K, reader: impl FnOnce(&V) -> R) -> Option<R> {
        (**self).get(key, reader)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        (**self).for_each(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::{Feature, FeatureFlag};
    use std::sync::Arc;

    #[test]
    fn test_entry_created_on_first_access() {
        let storage: ShardedStorage<Feature, FeatureFlag> = ShardedStorage::new();
        assert!(storage.is_empty());

        let first = storage.with_entry_mut(Feature::Navigation, FeatureFlag::default, |f| f.mark());
        let second = storage.with_entry_mut(Feature::Navigation, FeatureFlag::default, |f| f.mark());

        assert!(first);
        assert!(!second);
        assert_eq!(storage.len(), 1);
        assert!(storage.contains_key(&Feature::Navigation));
        assert_eq!(
            storage.get_cloned(&Feature::Navigation).map(|f| f.is_set()),
            Some(true)
        );
        assert_eq!(storage.get_cloned(&Feature::Forms), None);
        assert_eq!(storage.get(&Feature::Navigation, FeatureFlag::is_set), Some(true));
        assert_eq!(storage.get(&Feature::Forms, FeatureFlag::is_set), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_for_each_visits_every_entry() {
        let storage: ShardedStorage<Feature, FeatureFlag> = ShardedStorage::new();
        for feature in Feature::ALL {
            storage.with_entry_mut(feature, FeatureFlag::default, |f| f.mark());
        }

        let mut seen = Vec::new();
        storage.for_each(|feature, flag| {
            assert!(flag.is_set());
            seen.push(*feature);
        });
        seen.sort();
        assert_eq!(seen, Feature::ALL.to_vec());
    }

    #[test]
    fn test_concurrent_marking_sets_flag_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::thread;

        let storage: Arc<ShardedStorage<Feature, FeatureFlag>> = Arc::new(ShardedStorage::new());
        let winners = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        for _ in 0..8 {
            let storage = Arc::clone(&storage);
            let winners = Arc::clone(&winners);
            handles.push(thread::spawn(move || {
                if storage.with_entry_mut(Feature::Forms, FeatureFlag::default, |f| f.mark()) {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(storage.len(), 1);
    }
}
