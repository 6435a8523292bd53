//! The ordered map itself.
//!
//! Entries live in a vector kept sorted by `compare_keys`, so lookups are a
//! binary search and inserts/removals shift the tail. Every key and value in
//! the vector was produced by the map's own `copy_*` callbacks and is handed
//! back to the matching `free_*` callback when it leaves the map.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::slice;

use tracing::debug;

use crate::error::MapError;
use crate::ops::{CloneOps, EntryOps, FnOps, FnOpsBuilder};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// What [`OrderedMap::insert_or_update`] did with the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new entry was created.
    Inserted,
    /// An entry with an equal key existed; its value was replaced.
    Updated,
}

/// Sorted key-value container owning copies of everything it stores.
///
/// Keys comparing equal under `compare_keys` are the same logical key; the
/// map never holds two of them. Iteration always yields keys in ascending
/// order.
pub struct OrderedMap<K, V, O: EntryOps<K, V> = CloneOps> {
    entries: Vec<Entry<K, V>>,
    ops: O,
}

impl<K: Ord + Clone, V: Clone> OrderedMap<K, V, CloneOps> {
    pub fn new() -> Self {
        Self::with_ops(CloneOps)
    }
}

impl<K: Ord + Clone, V: Clone> Default for OrderedMap<K, V, CloneOps> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedMap<K, V, FnOps<K, V>> {
    /// Create a map from a set of callbacks, failing with
    /// [`MapError::InvalidConfiguration`] if any of the five is missing.
    pub fn from_callbacks(callbacks: FnOpsBuilder<K, V>) -> Result<Self, MapError> {
        Ok(Self::with_ops(callbacks.build()?))
    }
}

impl<K, V, O: EntryOps<K, V>> OrderedMap<K, V, O> {
    pub fn with_ops(ops: O) -> Self {
        Self {
            entries: Vec::new(),
            ops,
        }
    }

    /// `Ok(index)` of the entry equal to `key`, or `Err(index)` where it
    /// would have to be inserted.
    fn locate(&self, key: &K) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| self.ops.compare_keys(&entry.key, key))
    }

    fn release(&self, entry: Entry<K, V>) {
        self.ops.free_key(entry.key);
        self.ops.free_value(entry.value);
    }

    /// Associate a copy of `value` with `key`.
    ///
    /// A missing key is inserted as a copy at its sorted position. An existing
    /// key keeps its stored copy; only the value is replaced and the old value
    /// is freed. Copies are made before anything is modified, so on
    /// [`MapError::OutOfMemory`] the map is exactly as it was.
    pub fn insert_or_update(&mut self, key: &K, value: &V) -> Result<Insertion, MapError> {
        match self.locate(key) {
            Ok(index) => {
                let value = self.ops.copy_value(value).ok_or_else(|| {
                    debug!("value copy failed while updating an entry");
                    MapError::OutOfMemory
                })?;
                let old = mem::replace(&mut self.entries[index].value, value);
                self.ops.free_value(old);
                Ok(Insertion::Updated)
            }
            Err(index) => {
                self.entries
                    .try_reserve(1)
                    .map_err(|_| MapError::OutOfMemory)?;
                let key = self.ops.copy_key(key).ok_or_else(|| {
                    debug!("key copy failed while inserting an entry");
                    MapError::OutOfMemory
                })?;
                let value = match self.ops.copy_value(value) {
                    Some(value) => value,
                    None => {
                        debug!("value copy failed while inserting an entry");
                        self.ops.free_key(key);
                        return Err(MapError::OutOfMemory);
                    }
                };
                self.entries.insert(index, Entry { key, value });
                Ok(Insertion::Inserted)
            }
        }
    }

    /// Borrow the value stored under a key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key).ok().map(|index| &self.entries[index].value)
    }

    /// Mutable access to a stored value. Keys are never exposed mutably, so
    /// the ordering cannot be disturbed through this.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            Ok(index) => Some(&mut self.entries[index].value),
            Err(_) => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.locate(key).is_ok()
    }

    /// Remove the entry equal to `key`, freeing its key and value.
    ///
    /// Fails with [`MapError::InvalidArgument`] on an empty map and with
    /// [`MapError::ItemNotFound`] when no entry matches.
    pub fn remove(&mut self, key: &K) -> Result<(), MapError> {
        if self.entries.is_empty() {
            return Err(MapError::InvalidArgument);
        }
        let index = self.locate(key).map_err(|_| MapError::ItemNotFound)?;
        let entry = self.entries.remove(index);
        self.release(entry);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|entry| &entry.key)
    }

    pub fn last_key(&self) -> Option<&K> {
        self.entries.last().map(|entry| &entry.key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Owned copies of every key, made with `copy_key`.
    ///
    /// Use this to walk the keys while mutating the map. If any copy fails the
    /// keys copied so far are freed and [`MapError::OutOfMemory`] is returned.
    pub fn key_snapshot(&self) -> Result<Vec<K>, MapError> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(self.entries.len())
            .map_err(|_| MapError::OutOfMemory)?;
        for entry in &self.entries {
            match self.ops.copy_key(&entry.key) {
                Some(key) => keys.push(key),
                None => {
                    debug!(copied = keys.len(), "key copy failed while taking a snapshot");
                    for key in keys {
                        self.ops.free_key(key);
                    }
                    return Err(MapError::OutOfMemory);
                }
            }
        }
        Ok(keys)
    }

    /// Deep copy: a new map with the same operations whose entries were all
    /// re-copied through them. A copy that fails part way is dropped, which
    /// frees whatever it already held.
    pub fn copy(&self) -> Result<Self, MapError>
    where
        O: Clone,
    {
        let mut copy = Self::with_ops(self.ops.clone());
        copy.entries
            .try_reserve_exact(self.entries.len())
            .map_err(|_| MapError::OutOfMemory)?;
        for entry in &self.entries {
            let Some(key) = self.ops.copy_key(&entry.key) else {
                debug!(copied = copy.len(), "key copy failed while copying map");
                return Err(MapError::OutOfMemory);
            };
            let Some(value) = self.ops.copy_value(&entry.value) else {
                debug!(copied = copy.len(), "value copy failed while copying map");
                copy.ops.free_key(key);
                return Err(MapError::OutOfMemory);
            };
            // Source entries are already sorted.
            copy.entries.push(Entry { key, value });
        }
        Ok(copy)
    }

    /// True when every key compares strictly less than its successor.
    pub fn is_strictly_ascending(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| self.ops.compare_keys(&pair[0].key, &pair[1].key) == Ordering::Less)
    }

    /// Free every entry. The map stays usable.
    pub fn clear(&mut self) {
        for entry in mem::take(&mut self.entries) {
            self.release(entry);
        }
    }

    /// Free every entry and the map itself.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<K, V, O: EntryOps<K, V>> Drop for OrderedMap<K, V, O> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O: EntryOps<K, V>> fmt::Debug for OrderedMap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, O: EntryOps<K, V>> IntoIterator for &'a OrderedMap<K, V, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
#[path = "map_tests.rs"]
mod map_tests;
