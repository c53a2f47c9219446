#![forbid(clippy::unconditional_recursion)]
//! Capability interfaces shared by the containers.
//!
//! Containers don't form a hierarchy. Each one implements the handful of
//! capabilities that make sense for it:
//!
//! ```text
//! HasLength
//!     ├── Collection        - add / remove / contains over items
//!     │     ├── Sequence    - positional access
//!     │     └── Queue       - head-of-line access, nullable and strict forms
//!     └── Associative       - key to value lookup
//! ```
//!
//! Mutators on [`Collection`] and [`Sequence`] are fallible because
//! immutable containers implement them too and reject every call with
//! [`CollectionError::UnsupportedOperation`].

pub mod error;
mod has_length;
pub mod vec;

pub use error::{CollectionError, Result};

pub trait HasLength {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

pub trait Collection: HasLength {
    type Item;

    fn contains(&self, item: &Self::Item) -> bool;

    /// Adds an item, returning whether the collection changed.
    ///
    /// Sets return `Ok(false)` for duplicates.
    fn add(&mut self, item: Self::Item) -> Result<bool>;

    /// Removes a single occurrence of `item`, returning whether it was found.
    fn remove_item(&mut self, item: &Self::Item) -> Result<bool>;

    /// Removes every item matching the predicate and returns how many were
    /// removed.
    fn remove_where(&mut self, predicate: impl FnMut(&Self::Item) -> bool) -> Result<usize>;

    fn clear(&mut self) -> Result<()>;

    /// Visits every item in the collection's iteration order.
    fn for_each_item(&self, f: impl FnMut(&Self::Item));

    fn add_all(&mut self, items: impl IntoIterator<Item = Self::Item>) -> Result<bool> {
        let mut changed = false;
        for item in items {
            changed |= self.add(item)?;
        }
        Ok(changed)
    }

    fn contains_all<'a>(&self, items: impl IntoIterator<Item = &'a Self::Item>) -> bool
    where
        Self::Item: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// Removes every item equal to one of `items`.
    fn remove_all(&mut self, items: &[Self::Item]) -> Result<bool>
    where
        Self::Item: PartialEq,
    {
        Ok(self.remove_where(|item| items.contains(item))? > 0)
    }

    /// Keeps only the items equal to one of `items`.
    fn retain_all(&mut self, items: &[Self::Item]) -> Result<bool>
    where
        Self::Item: PartialEq,
    {
        Ok(self.remove_where(|item| !items.contains(item))? > 0)
    }

    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_item(|item| out.push(item.clone()));
        out
    }
}

pub trait Sequence: Collection {
    fn get(&self, index: usize) -> Result<&Self::Item>;

    /// Replaces the item at `index`, returning the previous one.
    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item>;

    /// Inserts at `index`, shifting later items. `index == len` appends.
    fn insert_at(&mut self, index: usize, item: Self::Item) -> Result<()>;

    fn remove_at(&mut self, index: usize) -> Result<Self::Item>;

    fn index_of(&self, item: &Self::Item) -> Option<usize>;

    fn last_index_of(&self, item: &Self::Item) -> Option<usize>;
}

pub trait Associative: HasLength {
    type Key;
    type Value;

    /// Inserts or replaces, returning the previous value for the key.
    fn put(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn contains_key(&self, key: &Self::Key) -> bool;

    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;
}

/// Head-of-line access.
///
/// Every accessor comes in two forms: the nullable one (`poll`, `peek`)
/// returns `None` on an empty queue, the strict one (`remove_head`,
/// `element`) fails with [`CollectionError::EmptyContainer`]. The strict
/// form of `offer` is [`Collection::add`].
pub trait Queue: Collection {
    /// Enqueues an item. Unbounded queues always accept and return `true`.
    fn offer(&mut self, item: Self::Item) -> bool;

    fn poll(&mut self) -> Option<Self::Item>;

    fn peek(&self) -> Option<&Self::Item>;

    fn remove_head(&mut self) -> Result<Self::Item> {
        self.poll().ok_or(CollectionError::EmptyContainer)
    }

    fn element(&self) -> Result<&Self::Item> {
        self.peek().ok_or(CollectionError::EmptyContainer)
    }
}
