//! Name-Keyed Caches
//!
//! [`NamedCache`] is the registry behind the source, shader and program
//! caches. Each entry is either *pinned* (the cache owns an `Arc`) or
//! *observed* (the cache holds a `Weak` and the entry disappears once its
//! last external owner drops it).
//!
//! # Retention mode
//!
//! The cache's "preloading" flag decides how new entries are held:
//!
//! | Preloading | New entries | Typical use |
//! |---|---|---|
//! | `true` | pinned | loading screens: keep everything for later scenes |
//! | `false` | observed | steady state: free what no material uses |
//!
//! Switching the flag does not touch existing entries. Use
//! [`NamedCache::unpin_all`] to release pinned entries explicitly.
//!
//! All access goes through one `parking_lot::Mutex`. Builders passed to
//! [`NamedCache::get_or_try_insert_with`] run without the lock held, so they
//! may re-enter the same cache.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::errors::{GlintError, Result};

enum CacheEntry<T> {
    Pinned(Arc<T>),
    Observed(Weak<T>),
}

impl<T> CacheEntry<T> {
    fn new(value: &Arc<T>, pinned: bool) -> Self {
        if pinned {
            Self::Pinned(value.clone())
        } else {
            Self::Observed(Arc::downgrade(value))
        }
    }

    fn upgrade(&self) -> Option<Arc<T>> {
        match self {
            Self::Pinned(value) => Some(value.clone()),
            Self::Observed(weak) => weak.upgrade(),
        }
    }

    fn is_live(&self) -> bool {
        match self {
            Self::Pinned(_) => true,
            Self::Observed(weak) => weak.strong_count() > 0,
        }
    }
}

struct CacheInner<T> {
    entries: FxHashMap<String, CacheEntry<T>>,
    preloading: bool,
}

pub struct NamedCache<T> {
    label: &'static str,
    inner: Mutex<CacheInner<T>>,
}

impl<T> NamedCache<T> {
    /// `label` names the cache in logs and errors.
    #[must_use]
    pub fn new(label: &'static str, preloading: bool) -> Self {
        Self {
            label,
            inner: Mutex::new(CacheInner {
                entries: FxHashMap::default(),
                preloading,
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Adds `value` under `name`.
    ///
    /// Fails if a live entry with that name exists. An expired entry is
    /// silently replaced.
    pub fn add(&self, name: &str, value: &Arc<T>) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.entries.get(name).is_some_and(CacheEntry::is_live) {
            return Err(GlintError::DuplicateCacheEntry {
                cache: self.label,
                name: name.to_string(),
            });
        }
        let entry = CacheEntry::new(value, inner.preloading);
        inner.entries.insert(name.to_string(), entry);
        log::debug!("{}: added '{}'", self.label, name);
        Ok(())
    }

    /// Adds `value` unless a live entry already exists, in which case the
    /// existing entry is returned and `value` is dropped.
    pub fn insert_or_get(&self, name: &str, value: Arc<T>) -> Arc<T> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.entries.get(name).and_then(CacheEntry::upgrade) {
            return existing;
        }
        let entry = CacheEntry::new(&value, inner.preloading);
        inner.entries.insert(name.to_string(), entry);
        log::debug!("{}: added '{}'", self.label, name);
        value
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        let mut inner = self.inner.lock();
        let value = inner.entries.get(name)?.upgrade();
        if value.is_none() {
            inner.entries.remove(name);
        }
        value
    }

    /// Returns the cached entry, or builds, inserts and returns a new one.
    ///
    /// If another caller inserted the same name while `build` ran, the
    /// earlier entry wins.
    pub fn get_or_try_insert_with<F>(&self, name: &str, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<Arc<T>>,
    {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }
        let value = build()?;
        Ok(self.insert_or_get(name, value))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<T>> {
        let removed = self.inner.lock().entries.remove(name)?;
        log::debug!("{}: removed '{}'", self.label, name);
        removed.upgrade()
    }

    pub fn remove_all(&self) {
        let drained: Vec<_> = self.inner.lock().entries.drain().collect();
        log::debug!("{}: removed all {} entries", self.label, drained.len());
        // Entries drop outside the lock
        drop(drained);
    }

    /// Live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.values().filter(|e| e.is_live()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of live entries, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let mut names: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, e)| e.is_live())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn set_preloading(&self, preloading: bool) {
        let mut inner = self.inner.lock();
        if inner.preloading != preloading {
            log::debug!("{}: preloading {}", self.label, if preloading { "on" } else { "off" });
        }
        inner.preloading = preloading;
    }

    #[must_use]
    pub fn is_preloading(&self) -> bool {
        self.inner.lock().preloading
    }

    /// Promotes a live observed entry to pinned. Returns `false` if there is
    /// no live entry with that name.
    pub fn pin(&self, name: &str) -> bool {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.entries.get_mut(name) else {
            return false;
        };
        match entry.upgrade() {
            Some(value) => {
                *entry = CacheEntry::Pinned(value);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pinned(&self, name: &str) -> bool {
        matches!(self.inner.lock().entries.get(name), Some(CacheEntry::Pinned(_)))
    }

    /// Demotes every pinned entry to observed. Entries nothing else owns
    /// are released.
    pub fn unpin_all(&self) {
        let mut released = Vec::new();
        {
            let mut inner = self.inner.lock();
            for entry in inner.entries.values_mut() {
                if let CacheEntry::Pinned(value) = entry {
                    let weak = Arc::downgrade(value);
                    if let CacheEntry::Pinned(value) = std::mem::replace(entry, CacheEntry::Observed(weak)) {
                        released.push(value);
                    }
                }
            }
        }
        log::debug!("{}: unpinned {} entries", self.label, released.len());
    }

    /// Drops expired observed entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| entry.is_live());
        let purged = before - inner.entries.len();
        if purged > 0 {
            log::debug!("{}: purged {} expired entries", self.label, purged);
        }
        purged
    }

    /// Strong handles to every live entry.
    #[must_use]
    pub fn live_values(&self) -> Vec<Arc<T>> {
        self.inner
            .lock()
            .entries
            .values()
            .filter_map(CacheEntry::upgrade)
            .collect()
    }

    /// Calls `f` for each live entry, outside the lock.
    pub fn for_each_live(&self, mut f: impl FnMut(&str, &Arc<T>)) {
        let live: Vec<(String, Arc<T>)> = self
            .inner
            .lock()
            .entries
            .iter()
            .filter_map(|(name, entry)| entry.upgrade().map(|value| (name.clone(), value)))
            .collect();
        for (name, value) in &live {
            f(name, value);
        }
    }
}
