//! One-shot initialization registry.
//!
//! Each feature installs its listeners at most once per enhancer, no matter
//! how many times activation is requested.

use crate::application::ports::Storage;
use crate::domain::feature::{Feature, FeatureFlag};
use tracing::trace;

/// Registry of which features have been initialized.
///
/// Generic over the storage implementation; the enhancer uses
/// `Arc<ShardedStorage>`.
#[derive(Debug, Clone)]
pub struct FeatureRegistry<S>
where
    S: Storage<Feature, FeatureFlag>,
{
    storage: S,
}

impl<S> FeatureRegistry<S>
where
    S: Storage<Feature, FeatureFlag>,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Run `init` for `feature` unless it already ran.
    ///
    /// The flag is set before `init` executes, so a re-entrant activation
    /// from inside `init` is a no-op.
    pub fn run_once<F, R>(&self, feature: Feature, init: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let first = self
            .storage
            .with_entry_mut(feature, FeatureFlag::default, FeatureFlag::mark);
        if !first {
            trace!(feature = feature.name(), "already initialized");
            return None;
        }
        Some(init())
    }

    pub fn is_initialized(&self, feature: Feature) -> bool {
        self.storage
            .get(&feature, FeatureFlag::is_set)
            .unwrap_or(false)
    }

    /// Features initialized so far, in initialization order.
    pub fn initialized(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_initialized(*f))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Feature, &FeatureFlag),
    {
        self.storage.for_each(f);
    }
}
