//! Bucketed hash map.
//!
//! Each bucket owns the entries whose hashes land on it. Once
//! `len > buckets * load_factor` every entry is rehashed into twice as many
//! buckets, up to 2^30. Iteration order follows bucket layout and changes on rehash;
//! don't depend on it.

use crate::config::{ConfigError, TableConfig};
use crate::cursor::{Cursor, RemoveCurrent};
use crate::stamp::{ModCount, Stamp};
use collection_traits::{Associative, CollectionError, HasLength, Result};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use tracing::debug;
use utils::map::BuildHasher as DefaultHasher;

pub use views::{Entries, Keys, Values};

mod views;

const MIN_BUCKETS: usize = 16;
/// Bucket arrays stop growing here; chains lengthen instead.
const MAX_BUCKETS: usize = 1 << 30;

type Bucket<K, V> = SmallVec<[(K, V); 2]>;

pub struct HashTable<K, V, S = DefaultHasher> {
    /// Empty until the first insertion, then a power of two.
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    initial_buckets: usize,
    load_factor: f32,
    hasher: S,
    mods: ModCount,
}

fn buckets_for(capacity: usize, load_factor: f32) -> usize {
    // `as usize` saturates, the clamp keeps the rounding in range.
    let needed = (capacity as f64 / load_factor as f64).ceil() as usize;
    needed.clamp(MIN_BUCKETS, MAX_BUCKETS).next_power_of_two()
}

impl<K, V> HashTable<K, V, DefaultHasher> {
    pub fn new() -> Self {
        Self::with_hasher(DefaultHasher::default())
    }

    /// Creates a table that holds `capacity` entries before its first
    /// rehash.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHasher::default())
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, DefaultHasher::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_valid_config(TableConfig::default().with_initial_capacity(capacity), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        Ok(Self::from_valid_config(config.validate()?, hasher))
    }

    fn from_valid_config(config: TableConfig, hasher: S) -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
            initial_buckets: buckets_for(config.initial_capacity, config.load_factor),
            load_factor: config.load_factor,
            hasher,
            mods: ModCount::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn stamp(&self) -> Stamp {
        self.mods.stamp()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: [].iter(),
            remaining: self.len,
        }
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.buckets
            .iter_mut()
            .flat_map(|bucket| bucket.iter_mut().map(|(_, v)| v))
    }

    /// Live view of the keys. Reads go straight to the table.
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys { table: self }
    }

    pub fn values(&self) -> Values<'_, K, V, S> {
        Values { table: self }
    }

    pub fn entries(&self) -> Entries<'_, K, V, S> {
        Entries { table: self }
    }

    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        self.iter().for_each(|(k, v)| f(k, v))
    }

    /// Replaces every value with the result of `f`.
    pub fn replace_all(&mut self, mut f: impl FnMut(&K, &V) -> V) {
        for (k, v) in self.buckets.iter_mut().flatten() {
            *v = f(k, v);
        }
    }

    /// Removes every entry matching the predicate. Returns the number removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&K, &V) -> bool) -> usize {
        let before = self.len;
        for bucket in &mut self.buckets {
            bucket.retain(|(k, v)| !predicate(k, v));
        }
        self.len = self.buckets.iter().map(|b| b.len()).sum();
        let removed = before - self.len;
        if removed > 0 {
            self.mods.bump();
        }
        removed
    }

    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.buckets.iter_mut().for_each(|b| b.clear());
        self.len = 0;
        self.mods.bump();
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    pub fn cursor(&self) -> TableCursor {
        TableCursor {
            bucket: 0,
            slot: 0,
            last: None,
            stamp: self.stamp(),
        }
    }

    /// Cursor position of the first entry at or after `(bucket, slot)`.
    fn locate(&self, mut bucket: usize, mut slot: usize) -> Option<(usize, usize)> {
        while let Some(entries) = self.buckets.get(bucket) {
            if slot < entries.len() {
                return Some((bucket, slot));
            }
            bucket += 1;
            slot = 0;
        }
        None
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Inserts or replaces, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Some((b, s)) => Some(std::mem::replace(&mut self.buckets[b][s].1, value)),
            None => {
                self.insert_new(key, value);
                None
            }
        }
    }

    /// Inserts only if the key is absent. Returns the existing value
    /// otherwise, dropping `value`.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        match self.find(&key) {
            Some((b, s)) => Some(&self.buckets[b][s].1),
            None => {
                self.insert_new(key, value);
                None
            }
        }
    }

    pub fn put_all(&mut self, entries: impl IntoIterator<Item = (K, V)>) {
        for (k, v) in entries {
            self.put(k, v);
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|(b, s)| &self.buckets[b][s].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (b, s) = self.find(key)?;
        Some(&mut self.buckets[b][s].1)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|(b, s)| {
            let (k, v) = &self.buckets[b][s];
            (k, v)
        })
    }

    pub fn get_or_default<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (b, s) = self.find(key)?;
        Some(self.remove_at(b, s))
    }

    /// Removes the entry only if it currently maps to `expected`.
    pub fn remove_if<Q>(&mut self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        match self.find(key) {
            Some((b, s)) if self.buckets[b][s].1 == *expected => {
                self.remove_at(b, s);
                true
            }
            _ => false,
        }
    }

    /// Replaces the value only if the key is present.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|slot| std::mem::replace(slot, value))
    }

    /// Replaces the value only if the key currently maps to `expected`.
    pub fn replace_if<Q>(&mut self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(slot) if *slot == *expected => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    /// Returns the value for `key`, inserting `f(&key)` first if absent.
    /// `f` is not called when the key is present.
    pub fn compute_if_absent(&mut self, key: K, f: impl FnOnce(&K) -> V) -> &mut V {
        let (b, s) = match self.find(&key) {
            Some(pos) => pos,
            None => {
                let value = f(&key);
                self.insert_new(key, value)
            }
        };
        &mut self.buckets[b][s].1
    }

    /// Recomputes the value of a present key. Returning `None` from `f`
    /// removes the entry. Absent keys are left alone and `f` isn't called.
    pub fn compute_if_present<Q>(&mut self, key: &Q, f: impl FnOnce(&K, &V) -> Option<V>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (b, s) = self.find(key)?;
        let (k, v) = &self.buckets[b][s];
        let value = f(k, v);
        self.store_computed(b, s, value)
    }

    /// Computes a value from the current mapping, if any. `None` from `f`
    /// removes the entry, or leaves the key absent.
    pub fn compute(&mut self, key: K, f: impl FnOnce(&K, Option<&V>) -> Option<V>) -> Option<&V> {
        match self.find(&key) {
            Some((b, s)) => {
                let (k, v) = &self.buckets[b][s];
                let value = f(k, Some(v));
                self.store_computed(b, s, value)
            }
            None => {
                let value = f(&key, None)?;
                let (b, s) = self.insert_new(key, value);
                Some(&self.buckets[b][s].1)
            }
        }
    }

    /// Stores `value` if the key is absent, otherwise stores
    /// `combine(existing, value)`. `None` from `combine` removes the entry.
    pub fn merge(&mut self, key: K, value: V, combine: impl FnOnce(&V, V) -> Option<V>) -> Option<&V> {
        match self.find(&key) {
            Some((b, s)) => {
                let combined = combine(&self.buckets[b][s].1, value);
                self.store_computed(b, s, combined)
            }
            None => {
                let (b, s) = self.insert_new(key, value);
                Some(&self.buckets[b][s].1)
            }
        }
    }

    fn store_computed(&mut self, b: usize, s: usize, value: Option<V>) -> Option<&V> {
        match value {
            Some(value) => {
                let slot = &mut self.buckets[b][s].1;
                *slot = value;
                Some(&*slot)
            }
            None => {
                self.remove_at(b, s);
                None
            }
        }
    }

    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        debug_assert!(self.buckets.len().is_power_of_two());
        (self.hasher.hash_one(key) as usize) & (self.buckets.len() - 1)
    }

    fn find<Q>(&self, key: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.len == 0 {
            return None;
        }
        let b = self.bucket_of(key);
        let s = self.buckets[b].iter().position(|(k, _)| k.borrow() == key)?;
        Some((b, s))
    }

    /// Inserts a key known to be absent, returning its position.
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        if self.buckets.is_empty() {
            self.rehash(self.initial_buckets);
        } else if self.buckets.len() < MAX_BUCKETS
            && (self.len + 1) as f64 > self.buckets.len() as f64 * self.load_factor as f64
        {
            self.rehash(self.buckets.len() * 2);
        }

        let b = self.bucket_of(&key);
        self.buckets[b].push((key, value));
        self.len += 1;
        self.mods.bump();
        (b, self.buckets[b].len() - 1)
    }

    fn rehash(&mut self, bucket_count: usize) {
        debug!(
            from = self.buckets.len(),
            to = bucket_count,
            entries = self.len,
            "rehashing table"
        );
        let old = std::mem::replace(
            &mut self.buckets,
            std::iter::repeat_with(SmallVec::new)
                .take(bucket_count)
                .collect(),
        );
        for (k, v) in old.into_iter().flatten() {
            let b = self.bucket_of(&k);
            self.buckets[b].push((k, v));
        }
    }
}

impl<K, V, S> HashTable<K, V, S> {
    fn remove_at(&mut self, b: usize, s: usize) -> (K, V) {
        let entry = self.buckets[b].remove(s);
        self.len -= 1;
        self.mods.bump();
        entry
    }
}

#[cfg(feature = "parallel")]
impl<K: Sync, V: Sync, S> HashTable<K, V, S> {
    /// Visits every entry from a rayon pool, one task per run of buckets.
    /// Visit order is unspecified.
    pub fn par_for_each(&self, f: impl Fn(&K, &V) + Sync + Send) {
        use rayon::prelude::*;
        self.buckets
            .par_iter()
            .for_each(|bucket| bucket.iter().for_each(|(k, v)| f(k, v)));
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for HashTable<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            initial_buckets: self.initial_buckets,
            load_factor: self.load_factor,
            hasher: self.hasher.clone(),
            mods: self.mods.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Same entries, regardless of order or bucket layout.
impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for HashTable<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for HashTable<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashTable<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashTable<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut table = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for HashTable<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.current.next() {
                self.remaining -= 1;
                return Some((k, v));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<K, V> {
    inner: std::iter::Flatten<std::vec::IntoIter<Bucket<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.buckets.into_iter().flatten(),
            remaining: self.len,
        }
    }
}

/// Fail-fast cursor over a [`HashTable`], in bucket order.
#[derive(Debug, Clone)]
pub struct TableCursor {
    bucket: usize,
    slot: usize,
    last: Option<(usize, usize)>,
    stamp: Stamp,
}

impl<'c, K: 'c, V: 'c, S: 'c> Cursor<'c, HashTable<K, V, S>> for TableCursor {
    type Item = (&'c K, &'c V);

    fn has_next(&self, table: &'c HashTable<K, V, S>) -> Result<bool> {
        table.mods.verify(self.stamp)?;
        Ok(table.locate(self.bucket, self.slot).is_some())
    }

    fn next(&mut self, table: &'c HashTable<K, V, S>) -> Result<Self::Item> {
        table.mods.verify(self.stamp)?;
        let (b, s) = table
            .locate(self.bucket, self.slot)
            .ok_or(CollectionError::NoSuchElement)?;
        self.last = Some((b, s));
        self.bucket = b;
        self.slot = s + 1;
        let (k, v) = &table.buckets[b][s];
        Ok((k, v))
    }
}

impl<K, V, S> RemoveCurrent<HashTable<K, V, S>> for TableCursor {
    type Removed = (K, V);

    fn remove_current(&mut self, table: &mut HashTable<K, V, S>) -> Result<(K, V)> {
        table.mods.verify(self.stamp)?;
        let (b, s) = self.last.take().ok_or(CollectionError::InvalidCursorState)?;
        let entry = table.remove_at(b, s);
        self.bucket = b;
        self.slot = s;
        self.stamp = table.stamp();
        Ok(entry)
    }
}

impl<K, V, S> HasLength for HashTable<K, V, S> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Associative for HashTable<K, V, S> {
    type Key = K;
    type Value = V;

    fn put(&mut self, key: K, value: V) -> Option<V> {
        HashTable::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashTable::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashTable::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashTable::remove(self, key)
    }
}
