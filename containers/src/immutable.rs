//! Read-only containers.
//!
//! They implement the same capability traits as their mutable
//! counterparts so they can be passed wherever a [`Collection`] or
//! [`Sequence`] is read. Every mutator fails with
//! [`CollectionError::UnsupportedOperation`], even when the call would not
//! change anything.

use crate::cursor::Cursor;
use crate::set::{self, Set, SetCursor};
use collection_traits::{Collection, CollectionError, HasLength, Result, Sequence};
use std::fmt;
use std::hash::Hash;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImmutableList<T> {
    items: Box<[T]>,
}

impl<T> ImmutableList<T> {
    pub fn empty() -> Self {
        Self {
            items: Box::new([]),
        }
    }

    pub fn single(item: T) -> Self {
        Self {
            items: Box::new([item]),
        }
    }

    pub fn of(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Snapshot of any readable collection, in its iteration order.
    pub fn copy_of<C>(source: &C) -> Self
    where
        C: Collection<Item = T>,
        T: Clone,
    {
        Self {
            items: source.to_vec().into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or_else(|| CollectionError::out_of_range(index, self.items.len()))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn cursor(&self) -> ImmutableCursor {
        ImmutableCursor { next: 0 }
    }
}

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<T> From<Vec<T>> for ImmutableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for ImmutableList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter()
    }
}

/// Cursor over an [`ImmutableList`]. The list can't change under it, so
/// it never goes stale.
#[derive(Debug, Clone)]
pub struct ImmutableCursor {
    next: usize,
}

impl<'c, T: 'c> Cursor<'c, ImmutableList<T>> for ImmutableCursor {
    type Item = &'c T;

    fn has_next(&self, list: &'c ImmutableList<T>) -> Result<bool> {
        Ok(self.next < list.len())
    }

    fn next(&mut self, list: &'c ImmutableList<T>) -> Result<&'c T> {
        let item = list
            .items
            .get(self.next)
            .ok_or(CollectionError::NoSuchElement)?;
        self.next += 1;
        Ok(item)
    }
}

impl<T> HasLength for ImmutableList<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq> Collection for ImmutableList<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    fn add(&mut self, _: T) -> Result<bool> {
        Err(CollectionError::unsupported("add"))
    }

    fn remove_item(&mut self, _: &T) -> Result<bool> {
        Err(CollectionError::unsupported("remove_item"))
    }

    fn remove_where(&mut self, _: impl FnMut(&T) -> bool) -> Result<usize> {
        Err(CollectionError::unsupported("remove_where"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::unsupported("clear"))
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.items.iter().for_each(f)
    }

    fn add_all(&mut self, _: impl IntoIterator<Item = T>) -> Result<bool> {
        Err(CollectionError::unsupported("add_all"))
    }

    fn remove_all(&mut self, _: &[T]) -> Result<bool> {
        Err(CollectionError::unsupported("remove_all"))
    }

    fn retain_all(&mut self, _: &[T]) -> Result<bool> {
        Err(CollectionError::unsupported("retain_all"))
    }
}

impl<T: PartialEq> Sequence for ImmutableList<T> {
    fn get(&self, index: usize) -> Result<&T> {
        ImmutableList::get(self, index)
    }

    fn set(&mut self, _: usize, _: T) -> Result<T> {
        Err(CollectionError::unsupported("set"))
    }

    fn insert_at(&mut self, _: usize, _: T) -> Result<()> {
        Err(CollectionError::unsupported("insert_at"))
    }

    fn remove_at(&mut self, _: usize) -> Result<T> {
        Err(CollectionError::unsupported("remove_at"))
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().rposition(|x| x == item)
    }
}

/// Read-only hash set. Duplicates passed to the constructors collapse into
/// one item.
#[derive(Clone, PartialEq, Eq)]
pub struct ImmutableSet<T: Hash + Eq> {
    set: Set<T>,
}

impl<T: Hash + Eq> ImmutableSet<T> {
    pub fn empty() -> Self {
        Self { set: Set::new() }
    }

    pub fn single(item: T) -> Self {
        Self::of([item])
    }

    pub fn of(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            set: items.into_iter().collect(),
        }
    }

    pub fn copy_of<C>(source: &C) -> Self
    where
        C: Collection<Item = T>,
        T: Clone,
    {
        Self::of(source.to_vec())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.set.contains(item)
    }

    pub fn iter(&self) -> set::Iter<'_, T> {
        self.set.iter()
    }

    pub fn cursor(&self) -> ImmutableSetCursor {
        ImmutableSetCursor(self.set.cursor())
    }
}

impl<T: Hash + Eq> Default for ImmutableSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Hash + Eq + fmt::Debug> fmt::Debug for ImmutableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.set, f)
    }
}

impl<T: Hash + Eq> FromIterator<T> for ImmutableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a ImmutableSet<T> {
    type Item = &'a T;
    type IntoIter = set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl<T: Hash + Eq> IntoIterator for ImmutableSet<T> {
    type Item = T;
    type IntoIter = set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

#[derive(Debug, Clone)]
pub struct ImmutableSetCursor(SetCursor);

impl<'c, T: Hash + Eq + 'c> Cursor<'c, ImmutableSet<T>> for ImmutableSetCursor {
    type Item = &'c T;

    fn has_next(&self, set: &'c ImmutableSet<T>) -> Result<bool> {
        self.0.has_next(&set.set)
    }

    fn next(&mut self, set: &'c ImmutableSet<T>) -> Result<&'c T> {
        self.0.next(&set.set)
    }
}

impl<T: Hash + Eq> HasLength for ImmutableSet<T> {
    fn len(&self) -> usize {
        self.set.len()
    }

    fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl<T: Hash + Eq> Collection for ImmutableSet<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        self.set.contains(item)
    }

    fn add(&mut self, _: T) -> Result<bool> {
        Err(CollectionError::unsupported("add"))
    }

    fn remove_item(&mut self, _: &T) -> Result<bool> {
        Err(CollectionError::unsupported("remove_item"))
    }

    fn remove_where(&mut self, _: impl FnMut(&T) -> bool) -> Result<usize> {
        Err(CollectionError::unsupported("remove_where"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::unsupported("clear"))
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.set.iter().for_each(f)
    }

    fn add_all(&mut self, _: impl IntoIterator<Item = T>) -> Result<bool> {
        Err(CollectionError::unsupported("add_all"))
    }

    fn remove_all(&mut self, _: &[T]) -> Result<bool> {
        Err(CollectionError::unsupported("remove_all"))
    }

    fn retain_all(&mut self, _: &[T]) -> Result<bool> {
        Err(CollectionError::unsupported("retain_all"))
    }
}
