// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout memoization with LRU eviction.

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::fmt::{Debug, Formatter};
use core::hash::Hash;
use hashbrown::HashMap;

use crate::error::Error;
use crate::layout::{TextLayout, compute_layout};
use crate::resolve::resolve_style;
use crate::style::TextStyle;
use crate::surface::{StateGuard, Surface};
use crate::text::StyledText;

/// Capacity of [`MetricsCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// A map holding at most `capacity` entries, evicting the least recently used one on overflow.
///
/// Both [`get`](Self::get) and [`put`](Self::put) count as a use.
pub struct LruCache<K, V> {
    entries: HashMap<K, LruEntry<V>>,
    capacity: usize,
    /// Serial of the most recent use.
    serial: u64,
}

struct LruEntry<V> {
    value: V,
    serial: u64,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            capacity,
            serial: 0,
        }
    }

    /// Returns the value stored for `key` and marks it as most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.serial += 1;
        let serial = self.serial;
        let entry = self.entries.get_mut(key)?;
        entry.serial = serial;
        Some(&entry.value)
    }

    /// Returns whether a value is stored for `key`, without marking it as used.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Stores `value` for `key` as the most recently used entry.
    ///
    /// If that takes the cache over capacity, the least recently used entry is evicted and
    /// returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.serial += 1;
        let serial = self.serial;
        self.entries.insert(key, LruEntry { value, serial });
        if self.entries.len() <= self.capacity {
            return None;
        }
        // Serials are unique, so this matches exactly one entry.
        let oldest_serial = self.entries.values().map(|entry| entry.serial).min()?;
        let (key, entry) = self
            .entries
            .extract_if(|_, entry| entry.serial == oldest_serial)
            .next()?;
        Some((key, entry.value))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Memoizes whole layouts per text and resolved style.
///
/// Styles are resolved against the surface before lookup, so the same document style on
/// surfaces with different ambient state gives distinct entries. Failed layouts are never stored.
pub struct MetricsCache {
    lru: LruCache<String, Arc<TextLayout>>,
    /// Number of cache hits since last `clear_stats()`.
    hits: u64,
    /// Number of cache misses since last `clear_stats()`.
    misses: u64,
}

impl MetricsCache {
    /// Creates an empty cache holding at most `capacity` layouts.
    pub fn new(capacity: usize) -> Self {
        Self {
            lru: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the layout of `text` in `style` on `surface`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Fails when the style can't be resolved; see [`resolve_style`].
    pub fn layout<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &StyledText,
        style: Option<&TextStyle>,
    ) -> Result<Arc<TextLayout>, Error> {
        let mut surface = StateGuard::new(surface);
        let resolved = resolve_style(style, Some(surface.state()), surface.host_direction())?;
        let key = format!("{:?}", (text, &resolved));
        if let Some(layout) = self.lru.get(key.as_str()) {
            self.hits += 1;
            log::trace!("metrics cache hit");
            return Ok(layout.clone());
        }
        self.misses += 1;
        let layout = Arc::new(compute_layout(&mut *surface, text, &resolved));
        if self.lru.put(key, layout.clone()).is_some() {
            log::trace!("metrics cache evicted its least recently used layout");
        }
        log::trace!("metrics cache miss, {} layouts cached", self.lru.len());
        Ok(layout)
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    /// Returns `true` if no layout is cached.
    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// Maximum number of cached layouts.
    pub fn capacity(&self) -> usize {
        self.lru.capacity()
    }

    /// Number of cache hits since the last [`clear_stats`](Self::clear_stats).
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of cache misses since the last [`clear_stats`](Self::clear_stats).
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Resets hit and miss counts without touching cached layouts.
    pub fn clear_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl Debug for MetricsCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("lru", &self.lru)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
