//! Growable contiguous sequence.

use crate::comparator::Comparator;
use crate::cursor::{Cursor, RemoveCurrent};
use crate::stamp::{ModCount, Stamp};
use collection_traits::{Collection, CollectionError, HasLength, Result, Sequence};
use std::fmt;
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut, Range};
use std::ptr;
use tracing::trace;

const MIN_NON_ZERO_CAP: usize = 4;

/// A growable array with explicit capacity.
///
/// Slots `[0, len)` of the buffer are initialized, the rest are not.
/// Appending to a full array doubles its capacity.
///
/// Structural changes (anything that changes the length) invalidate
/// outstanding [`ArrayCursor`]s. Overwriting in place (`set`, `swap`,
/// sorting) does not.
pub struct DynamicArray<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
    mods: ModCount,
}

fn alloc_buf<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
    std::iter::repeat_with(MaybeUninit::uninit)
        .take(capacity)
        .collect()
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty array able to hold `capacity` items without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: alloc_buf(capacity),
            len: 0,
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

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn stamp(&self) -> Stamp {
        self.mods.stamp()
    }

    pub fn as_slice(&self) -> &[T] {
        // Safety: slots [0, len) are initialized
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr().cast::<T>(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: slots [0, len) are initialized
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_mut_ptr().cast::<T>(), self.len) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Appends to the end. Amortized O(1).
    pub fn push(&mut self, item: T) {
        if self.len == self.capacity() {
            self.grow_to(self.len + 1);
        }
        self.buf[self.len].write(item);
        self.len += 1;
        self.mods.bump();
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.mods.bump();
        // Safety: the slot was initialized and is now outside the live range
        Some(unsafe { self.buf[self.len].assume_init_read() })
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| CollectionError::out_of_range(index, self.len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| CollectionError::out_of_range(index, len))
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Replaces the item at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(index)?, item))
    }

    /// Inserts at `index`, shifting everything after it one slot right.
    ///
    /// `index == len` appends.
    pub fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        if self.len == self.capacity() {
            self.grow_to(self.len + 1);
        }

        // Safety: capacity > len, so [index, len] fits; the copy may overlap
        unsafe {
            let base = self.buf.as_mut_ptr();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
        }
        self.buf[index].write(item);
        self.len += 1;
        self.mods.bump();
        Ok(())
    }

    /// Removes the item at `index`, shifting everything after it one slot
    /// left.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }

        // Safety: index < len; after the read the slot is closed over by the
        // copy so nothing is read twice
        let item = unsafe {
            let base = self.buf.as_mut_ptr();
            let item = (*base.add(index)).assume_init_read();
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            item
        };
        self.len -= 1;
        self.mods.bump();
        Ok(item)
    }

    /// Removes the item at `index` by moving the last item into its slot.
    /// O(1), but doesn't preserve order.
    pub fn swap_remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let last = self.len - 1;
        self.as_mut_slice().swap(index, last);
        self.pop().ok_or(CollectionError::EmptyContainer)
    }

    /// Inserts every item from `items` starting at `index`, keeping their
    /// order.
    pub fn insert_all_at(&mut self, index: usize, items: impl IntoIterator<Item = T>) -> Result<()> {
        if index > self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let before = self.len;
        self.extend(items);
        let added = self.len - before;
        self.as_mut_slice()[index..].rotate_right(added);
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.len;
        for idx in [a, b] {
            if idx >= len {
                return Err(CollectionError::out_of_range(idx, len));
            }
        }
        self.as_mut_slice().swap(a, b);
        Ok(())
    }

    /// Shortens the array to `len` items, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        self.len = len;
        self.mods.bump();
        // Safety: [len, len + tail) were initialized and are now outside the
        // live range
        unsafe {
            let tail_ptr = self.buf.as_mut_ptr().add(len).cast::<T>();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(tail_ptr, tail));
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Removes every item matching the predicate, keeping the relative order
    /// of the rest. Returns the number of removed items.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let slice = self.as_mut_slice();
        let mut kept = 0;
        for idx in 0..slice.len() {
            if !predicate(&slice[idx]) {
                slice.swap(kept, idx);
                kept += 1;
            }
        }
        let removed = self.len - kept;
        self.truncate(kept);
        removed
    }

    /// Replaces every item with the result of `f`.
    pub fn replace_all(&mut self, mut f: impl FnMut(&T) -> T) {
        for item in self.iter_mut() {
            *item = f(item);
        }
    }

    pub fn sort_by(&mut self, comparator: impl Comparator<T>) {
        self.as_mut_slice()
            .sort_by(|a, b| comparator.compare(a, b))
    }

    /// Read-only view of `range`. Fails if the range reaches past the end.
    pub fn sub_slice(&self, range: Range<usize>) -> Result<&[T]> {
        if range.end > self.len {
            return Err(CollectionError::out_of_range(range.end, self.len));
        }
        if range.start > range.end {
            return Err(CollectionError::out_of_range(range.start, range.end));
        }
        Ok(&self.as_slice()[range])
    }

    /// Splits the items into at most `parts` contiguous chunks of near-equal
    /// size, for handing out to independent workers.
    pub fn split(&self, parts: usize) -> impl Iterator<Item = &[T]> {
        let slice = self.as_slice();
        utils::iter_utils::split_ranges(slice.len(), parts).map(move |range| &slice[range])
    }

    /// Ensures room for `additional` more items without reallocating.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len.saturating_add(additional);
        if needed > self.capacity() {
            self.grow_to(needed);
        }
    }

    pub fn shrink_to_fit(&mut self) {
        if self.capacity() != self.len {
            self.reallocate(self.len);
        }
    }

    pub fn cursor(&self) -> ArrayCursor {
        ArrayCursor {
            next: 0,
            last: None,
            stamp: self.stamp(),
        }
    }

    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == item)
    }

    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|x| x == item)
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(item)
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort()
    }

    fn grow_to(&mut self, min_capacity: usize) {
        let doubled = self.capacity().saturating_mul(2).max(MIN_NON_ZERO_CAP);
        let capacity = doubled.max(min_capacity);
        trace!(
            from = self.capacity(),
            to = capacity,
            len = self.len,
            "growing dynamic array"
        );
        self.reallocate(capacity);
    }

    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut buf = alloc_buf(capacity);
        // Safety: both buffers hold at least len slots and don't overlap. The
        // old buffer is MaybeUninit so dropping it doesn't drop the moved items
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), buf.as_mut_ptr(), self.len);
        }
        self.buf = buf;
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // Safety: exactly the live items are dropped, once
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        out.extend(self.iter().cloned());
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

/// Panics when `index` is out of range, like slice indexing. Use
/// [`DynamicArray::get`] for the checked form.
impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let back = self.len;
        self.len = 0;
        IntoIter {
            buf: std::mem::take(&mut self.buf),
            front: 0,
            back,
        }
    }
}

/// Owning iterator over a [`DynamicArray`].
pub struct IntoIter<T> {
    buf: Box<[MaybeUninit<T>]>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // Safety: [front, back) are initialized and each is read once
        let item = unsafe { self.buf[self.front].assume_init_read() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // Safety: see `next`
        Some(unsafe { self.buf[self.back].assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for slot in &mut self.buf[self.front..self.back] {
            // Safety: slots between the cursors were never read out
            unsafe { slot.assume_init_drop() }
        }
    }
}

#[cfg(feature = "parallel")]
impl<T: Sync> DynamicArray<T> {
    /// Parallel iterator over the items. Results collected from it come back
    /// in no particular order unless the consumer sorts them.
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T> {
        use rayon::prelude::*;
        self.as_slice().par_iter()
    }
}

/// Fail-fast cursor over a [`DynamicArray`].
#[derive(Debug, Clone)]
pub struct ArrayCursor {
    next: usize,
    last: Option<usize>,
    stamp: Stamp,
}

impl<'c, T: 'c> Cursor<'c, DynamicArray<T>> for ArrayCursor {
    type Item = &'c T;

    fn has_next(&self, array: &'c DynamicArray<T>) -> Result<bool> {
        array.mods.verify(self.stamp)?;
        Ok(self.next < array.len)
    }

    fn next(&mut self, array: &'c DynamicArray<T>) -> Result<&'c T> {
        array.mods.verify(self.stamp)?;
        let item = array
            .as_slice()
            .get(self.next)
            .ok_or(CollectionError::NoSuchElement)?;
        self.last = Some(self.next);
        self.next += 1;
        Ok(item)
    }
}

impl<T> RemoveCurrent<DynamicArray<T>> for ArrayCursor {
    type Removed = T;

    fn remove_current(&mut self, array: &mut DynamicArray<T>) -> Result<T> {
        array.mods.verify(self.stamp)?;
        let last = self.last.take().ok_or(CollectionError::InvalidCursorState)?;
        let item = array.remove_at(last)?;
        self.next = last;
        self.stamp = array.stamp();
        Ok(item)
    }
}

impl<T> HasLength for DynamicArray<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: PartialEq> Collection for DynamicArray<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        DynamicArray::contains(self, item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match self.index_of(item) {
            Some(idx) => self.remove_at(idx).map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        Ok(self.remove_if(predicate))
    }

    fn clear(&mut self) -> Result<()> {
        DynamicArray::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f)
    }
}

impl<T: PartialEq> Sequence for DynamicArray<T> {
    fn get(&self, index: usize) -> Result<&T> {
        DynamicArray::get(self, index)
    }

    fn set(&mut self, index: usize, item: T) -> Result<T> {
        DynamicArray::set(self, index, item)
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        DynamicArray::insert_at(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        DynamicArray::remove_at(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        DynamicArray::index_of(self, item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        DynamicArray::last_index_of(self, item)
    }
}
