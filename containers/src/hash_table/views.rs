//! Borrowed views over a [`HashTable`]. They don't copy anything, so every
//! read reflects the table as it is when the read happens.

use super::{HashTable, Iter};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

macro_rules! view_common {
    ($name:ident, $item:ty, |$entry:ident| $project:expr) => {
        impl<'a, K, V, S> $name<'a, K, V, S> {
            pub fn len(&self) -> usize {
                self.table.len()
            }

            pub fn is_empty(&self) -> bool {
                self.table.is_empty()
            }

            pub fn iter(&self) -> impl Iterator<Item = $item> + ExactSizeIterator + 'a {
                let iter: Iter<'a, K, V> = self.table.iter();
                iter.map(|$entry| $project)
            }
        }

        impl<'a, K, V, S> Clone for $name<'a, K, V, S> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<'a, K, V, S> Copy for $name<'a, K, V, S> {}
    };
}

pub struct Keys<'a, K, V, S> {
    pub(super) table: &'a HashTable<K, V, S>,
}

pub struct Values<'a, K, V, S> {
    pub(super) table: &'a HashTable<K, V, S>,
}

pub struct Entries<'a, K, V, S> {
    pub(super) table: &'a HashTable<K, V, S>,
}

view_common!(Keys, &'a K, |entry| entry.0);
view_common!(Values, &'a V, |entry| entry.1);
view_common!(Entries, (&'a K, &'a V), |entry| entry);

impl<K: Hash + Eq, V, S: BuildHasher> Keys<'_, K, V, S> {
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }
}

impl<K, V: PartialEq, S> Values<'_, K, V, S> {
    pub fn contains(&self, value: &V) -> bool {
        self.table.contains_value(value)
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> Entries<'_, K, V, S> {
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key) == Some(value)
    }
}

impl<K: fmt::Debug, V, S> fmt::Debug for Keys<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, V: fmt::Debug, S> fmt::Debug for Values<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Entries<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
