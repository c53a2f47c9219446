use crate::config::{ConfigError, TableConfig};
use crate::cursor::{Cursor, RemoveCurrent};
use crate::hash_table::{self, HashTable, TableCursor};
use crate::stamp::Stamp;
use collection_traits::{Collection, HasLength, Result};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use utils::map::BuildHasher as DefaultHasher;

/// Hash set backed by a [`HashTable`] with unit values.
///
/// Binary operations iterate the smaller operand and probe the larger one.
pub struct Set<T, S = DefaultHasher> {
    table: HashTable<T, (), S>,
}

impl<T> Set<T, DefaultHasher> {
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            table: HashTable::with_config(config)?,
        })
    }
}

impl<T, S> Set<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::with_hasher(hasher),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        Ok(Self {
            table: HashTable::with_config_and_hasher(config, hasher)?,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stamp(&self) -> Stamp {
        self.table.stamp()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Keeps only the items matching the predicate. Returns the number
    /// removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        self.table.remove_where(|item, _| !keep(item))
    }

    pub fn cursor(&self) -> SetCursor {
        SetCursor(self.table.cursor())
    }
}

impl<T: Hash + Eq, S: BuildHasher> Set<T, S> {
    /// Returns `false` if the item was already present. The stored item is
    /// kept in that case.
    pub fn add(&mut self, item: T) -> bool {
        self.table.put_if_absent(item, ()).is_none()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(item)
    }

    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(item).is_some()
    }

    /// Removes and returns the stored item equal to `item`.
    pub fn take<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(item).map(|(item, ())| item)
    }

    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_key_value(item).map(|(item, _)| item)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (small, large) = smaller_first(self, other);
        small.iter().all(|item| !large.contains(item))
    }
}

impl<T: Hash + Eq + Clone, S: BuildHasher + Clone> Set<T, S> {
    /// Items in either set.
    pub fn union(&self, other: &Self) -> Self {
        let (small, large) = smaller_first(self, other);
        let mut out = large.clone();
        out.extend(small.iter().cloned());
        out
    }

    /// Items in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let (small, large) = smaller_first(self, other);
        let mut out = Set::with_hasher(self.table.hasher().clone());
        out.extend(small.iter().filter(|item| large.contains(*item)).cloned());
        out
    }

    /// Items in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        if other.len() < self.len() {
            let mut out = self.clone();
            for item in other {
                out.remove(item);
            }
            out
        } else {
            let mut out = Set::with_hasher(self.table.hasher().clone());
            out.extend(self.iter().filter(|item| !other.contains(*item)).cloned());
            out
        }
    }

    /// Items in exactly one of the sets.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = self.difference(other);
        out.extend(other.iter().filter(|item| !self.contains(*item)).cloned());
        out
    }
}

fn smaller_first<'a, T, S>(a: &'a Set<T, S>, b: &'a Set<T, S>) -> (&'a Set<T, S>, &'a Set<T, S>) {
    if a.len() <= b.len() {
        (a, b)
    } else {
        (b, a)
    }
}

impl<T, S: Default> Default for Set<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Clone, S: Clone> Clone for Set<T, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Set<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq for Set<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for Set<T, S> {}

impl<T: Hash + Eq, S: BuildHasher> Extend<T> for Set<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Hash + Eq, S: BuildHasher + Default> FromIterator<T> for Set<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|item| (item, ())).collect(),
        }
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for Set<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

pub struct Iter<'a, T> {
    inner: hash_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(item, _)| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a Set<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<T> {
    inner: hash_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(item, ())| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, S> IntoIterator for Set<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetCursor(TableCursor);

impl<'c, T: 'c, S: 'c> Cursor<'c, Set<T, S>> for SetCursor {
    type Item = &'c T;

    fn has_next(&self, set: &'c Set<T, S>) -> Result<bool> {
        self.0.has_next(&set.table)
    }

    fn next(&mut self, set: &'c Set<T, S>) -> Result<&'c T> {
        self.0.next(&set.table).map(|(item, _)| item)
    }
}

impl<T, S> RemoveCurrent<Set<T, S>> for SetCursor {
    type Removed = T;

    fn remove_current(&mut self, set: &mut Set<T, S>) -> Result<T> {
        self.0.remove_current(&mut set.table).map(|(item, ())| item)
    }
}

impl<T, S> HasLength for Set<T, S> {
    fn len(&self) -> usize {
        self.table.len()
    }

    fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<T: Hash + Eq, S: BuildHasher> Collection for Set<T, S> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        Set::contains(self, item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        Ok(Set::add(self, item))
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        Ok(Set::remove(self, item))
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        Ok(self.table.remove_where(|item, _| predicate(item)))
    }

    fn clear(&mut self) -> Result<()> {
        Set::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f)
    }
}
