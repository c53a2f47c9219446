//! Ring-buffer double-ended queue.
//!
//! Capacity is always zero or a power of two, so logical to physical index
//! mapping is a mask. When the ring is full it is reallocated at twice the
//! size and the elements are laid out again from physical slot 0.

use crate::cursor::{Cursor, RemoveCurrent};
use crate::stamp::{ModCount, Stamp};
use collection_traits::{Collection, CollectionError, HasLength, Queue, Result};
use std::fmt;
use tracing::trace;

const MIN_NON_ZERO_CAP: usize = 4;

pub struct Deque<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    len: usize,
    mods: ModCount,
}

impl<T> Deque<T> {
    pub fn new() -> Self {
        Self {
            buf: Box::new([]),
            head: 0,
            len: 0,
            mods: ModCount::new(),
        }
    }

    /// Capacity is rounded up to the next power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut deque = Self::new();
        if capacity > 0 {
            deque.relinearize(capacity.max(MIN_NON_ZERO_CAP).next_power_of_two());
        }
        deque
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

    #[inline(always)]
    fn wrap_add(&self, idx: usize, add: usize) -> usize {
        (idx + add) & (self.buf.len() - 1)
    }

    #[inline(always)]
    fn wrap_sub(&self, idx: usize, sub: usize) -> usize {
        idx.wrapping_sub(sub) & (self.buf.len() - 1)
    }

    fn physical(&self, index: usize) -> usize {
        self.wrap_add(self.head, index)
    }

    fn grow_if_full(&mut self) {
        if self.len == self.buf.len() {
            let new_cap = (self.buf.len() * 2).max(MIN_NON_ZERO_CAP);
            self.relinearize(new_cap);
        }
    }

    /// Moves every element into a fresh buffer of `new_cap` slots, front
    /// element first.
    fn relinearize(&mut self, new_cap: usize) {
        trace!(
            old_capacity = self.buf.len(),
            new_capacity = new_cap,
            len = self.len,
            "growing deque"
        );
        let mut buf: Box<[Option<T>]> = std::iter::repeat_with(|| None).take(new_cap).collect();
        for (index, slot) in buf.iter_mut().take(self.len).enumerate() {
            let from = self.physical(index);
            *slot = self.buf[from].take();
        }
        self.buf = buf;
        self.head = 0;
    }

    pub fn push_back(&mut self, item: T) {
        self.grow_if_full();
        let tail = self.physical(self.len);
        self.buf[tail] = Some(item);
        self.len += 1;
        self.mods.bump();
    }

    pub fn push_front(&mut self, item: T) {
        self.grow_if_full();
        self.head = self.wrap_sub(self.head, 1);
        self.buf[self.head] = Some(item);
        self.len += 1;
        self.mods.bump();
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.buf[self.head].take();
        self.head = self.wrap_add(self.head, 1);
        self.len -= 1;
        self.mods.bump();
        item
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let tail = self.physical(self.len);
        self.mods.bump();
        self.buf[tail].take()
    }

    pub fn peek_front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn peek_back(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?).ok()
    }

    pub fn peek_front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0).ok()
    }

    pub fn peek_back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len.checked_sub(1)?).ok()
    }

    /// Front element, failing with `EmptyContainer` instead of returning
    /// `None`.
    pub fn first(&self) -> Result<&T> {
        self.peek_front().ok_or(CollectionError::EmptyContainer)
    }

    pub fn last(&self) -> Result<&T> {
        self.peek_back().ok_or(CollectionError::EmptyContainer)
    }

    pub fn remove_first(&mut self) -> Result<T> {
        self.pop_front().ok_or(CollectionError::EmptyContainer)
    }

    pub fn remove_last(&mut self) -> Result<T> {
        self.pop_back().ok_or(CollectionError::EmptyContainer)
    }

    /// Element at logical `index`, 0 being the front.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        self.buf[self.physical(index)]
            .as_ref()
            .ok_or_else(|| CollectionError::out_of_range(index, self.len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let len = self.len;
        let slot = self.physical(index);
        self.buf[slot]
            .as_mut()
            .ok_or_else(|| CollectionError::out_of_range(index, len))
    }

    /// Removes the element at logical `index`, closing the gap from the
    /// shorter side.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let at = self.physical(index);
        let item = self.buf[at].take();

        if index < self.len / 2 {
            for i in (0..index).rev() {
                let (from, to) = (self.physical(i), self.physical(i + 1));
                self.buf[to] = self.buf[from].take();
            }
            self.head = self.wrap_add(self.head, 1);
        } else {
            for i in index..self.len - 1 {
                let (from, to) = (self.physical(i + 1), self.physical(i));
                self.buf[to] = self.buf[from].take();
            }
        }

        self.len -= 1;
        self.mods.bump();
        item.ok_or_else(|| CollectionError::out_of_range(index, self.len + 1))
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == item)
    }

    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.buf.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
        self.mods.bump();
    }

    /// Keeps only the items matching the predicate, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.len;
        let mut kept = 0;
        for i in 0..self.len {
            let from = self.physical(i);
            let Some(item) = self.buf[from].take() else {
                continue;
            };
            if keep(&item) {
                let to = self.physical(kept);
                self.buf[to] = Some(item);
                kept += 1;
            }
        }
        self.len = kept;
        let removed = before - kept;
        if removed > 0 {
            self.mods.bump();
        }
        removed
    }

    /// Front to back. Reverse it for back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: 0,
            back: self.len,
        }
    }

    pub fn cursor(&self) -> DequeCursor {
        DequeCursor {
            next: 0,
            last: None,
            stamp: self.stamp(),
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item))
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.deque.get(self.front).ok();
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.deque.get(self.back).ok()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<T>(Deque<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// Front-to-back fail-fast cursor over a [`Deque`].
#[derive(Debug, Clone)]
pub struct DequeCursor {
    next: usize,
    last: Option<usize>,
    stamp: Stamp,
}

impl<'c, T: 'c> Cursor<'c, Deque<T>> for DequeCursor {
    type Item = &'c T;

    fn has_next(&self, deque: &'c Deque<T>) -> Result<bool> {
        deque.mods.verify(self.stamp)?;
        Ok(self.next < deque.len)
    }

    fn next(&mut self, deque: &'c Deque<T>) -> Result<&'c T> {
        deque.mods.verify(self.stamp)?;
        let item = deque
            .get(self.next)
            .map_err(|_| CollectionError::NoSuchElement)?;
        self.last = Some(self.next);
        self.next += 1;
        Ok(item)
    }
}

impl<T> RemoveCurrent<Deque<T>> for DequeCursor {
    type Removed = T;

    fn remove_current(&mut self, deque: &mut Deque<T>) -> Result<T> {
        deque.mods.verify(self.stamp)?;
        let index = self.last.take().ok_or(CollectionError::InvalidCursorState)?;
        let item = deque.remove_at(index)?;
        self.next = index;
        self.stamp = deque.stamp();
        Ok(item)
    }
}

impl<T> HasLength for Deque<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: PartialEq> Collection for Deque<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        Deque::contains(self, item)
    }

    /// Appends to the back.
    fn add(&mut self, item: T) -> Result<bool> {
        self.push_back(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match self.iter().position(|x| x == item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        Ok(self.retain(|item| !predicate(item)))
    }

    fn clear(&mut self) -> Result<()> {
        Deque::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f)
    }
}

/// FIFO facade: enqueue at the back, dequeue from the front.
impl<T: PartialEq> Queue for Deque<T> {
    fn offer(&mut self, item: T) -> bool {
        self.push_back(item);
        true
    }

    fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn peek(&self) -> Option<&T> {
        self.peek_front()
    }
}

#[cfg(test)]
mod tests {
    use super::Deque;
    use crate::cursor::{Cursor, RemoveCurrent};
    use collection_traits::{CollectionError, Queue};
    use itertools::Itertools;
    use rstest::rstest;

    #[test]
    fn queue_facade_is_fifo() {
        let mut queue = Deque::new();
        assert!(queue.offer("Apple"));
        assert!(queue.offer("Banana"));
        assert!(queue.offer("Cherry"));
        assert_eq!(queue.peek(), Some(&"Apple"));
        assert_eq!(queue.poll(), Some("Apple"));
        assert_eq!(queue.iter().copied().collect_vec(), vec!["Banana", "Cherry"]);
    }

    #[test]
    fn nullable_and_strict_forms_differ_on_empty() {
        let mut queue: Deque<u32> = Deque::new();
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.remove_head(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.element(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.first(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.last(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.remove_first(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.remove_last(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.peek_back(), None);
    }

    #[test]
    fn both_ends() {
        let mut deque = Deque::new();
        deque.push_back(2);
        deque.push_front(1);
        deque.push_back(3);
        deque.push_front(0);
        assert_eq!(deque.iter().copied().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(deque.iter().rev().copied().collect_vec(), vec![3, 2, 1, 0]);
        assert_eq!(deque.peek_back(), Some(&3));
        assert_eq!(deque.pop_back(), Some(3));
        assert_eq!(deque.pop_front(), Some(0));
        assert_eq!(deque.first(), Ok(&1));
        assert_eq!(deque.last(), Ok(&2));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn order_survives_growth_while_wrapped(#[case] shift: usize) {
        let mut deque = Deque::with_capacity(4);
        for i in 0..4 {
            deque.push_back(i);
        }
        for _ in 0..shift {
            let front = deque.pop_front().unwrap();
            deque.push_back(front);
        }
        assert_eq!(deque.capacity(), 4);

        deque.push_back(100);
        deque.push_front(-1);
        assert_eq!(deque.capacity(), 8);

        let mut expected = (0..4).cycle().skip(shift).take(4).collect_vec();
        expected.insert(0, -1);
        expected.push(100);
        assert_eq!(deque.into_iter().collect_vec(), expected);
    }

    #[test]
    fn get_is_bounds_checked() {
        let deque = Deque::from([10, 20, 30]);
        assert_eq!(deque.get(2), Ok(&30));
        assert_eq!(
            deque.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[rstest]
    #[case(0, &[2, 3, 4, 5, 6])]
    #[case(2, &[1, 2, 4, 5, 6])]
    #[case(4, &[1, 2, 3, 4, 6])]
    #[case(5, &[1, 2, 3, 4, 5])]
    fn remove_at_closes_the_gap(#[case] index: usize, #[case] expected: &[i32]) {
        let mut deque = Deque::with_capacity(8);
        deque.extend([4, 5, 6]);
        deque.push_front(3);
        deque.push_front(2);
        deque.push_front(1);
        let removed = deque.remove_at(index).unwrap();
        assert_eq!(removed, index as i32 + 1);
        assert_eq!(deque.iter().copied().collect_vec(), expected);
    }

    #[test]
    fn retain_is_idempotent() {
        let mut deque: Deque<u32> = (0..20).collect();
        assert_eq!(deque.retain(|x| x % 3 != 0), 7);
        let once = deque.clone();
        assert_eq!(deque.retain(|x| x % 3 != 0), 0);
        assert_eq!(deque, once);
    }

    #[test]
    fn cursor_removes_in_place() {
        let mut deque: Deque<char> = "ABCDE".chars().collect();
        let mut cursor = deque.cursor();
        while cursor.has_next(&deque).unwrap() {
            let item = *cursor.next(&deque).unwrap();
            if item == 'B' || item == 'D' {
                cursor.remove_current(&mut deque).unwrap();
            }
        }
        assert_eq!(deque.iter().collect::<String>(), "ACE");
        assert_eq!(cursor.next(&deque), Err(CollectionError::NoSuchElement));
    }

    #[test]
    fn cursor_removes_across_the_wrap() {
        let mut deque: Deque<u32> = Deque::with_capacity(8);
        deque.extend(1..=8);
        for _ in 0..6 {
            deque.pop_front();
        }
        deque.extend(9..=12);
        assert_eq!(deque.capacity(), 8);
        assert_eq!(deque.head, 6);

        let mut cursor = deque.cursor();
        while cursor.has_next(&deque).unwrap() {
            let item = *cursor.next(&deque).unwrap();
            if item == 8 || item == 9 {
                cursor.remove_current(&mut deque).unwrap();
            }
        }
        assert_eq!(deque.head, 0);
        assert_eq!(deque.capacity(), 8);
        assert_eq!(deque.iter().copied().collect_vec(), vec![7, 10, 11, 12]);
        assert_eq!(deque.iter().rev().copied().collect_vec(), vec![12, 11, 10, 7]);
    }

    #[test]
    fn cursor_fails_fast() {
        let mut deque = Deque::from([1, 2, 3]);
        let mut cursor = deque.cursor();
        cursor.next(&deque).unwrap();
        deque.push_back(4);
        assert!(matches!(
            cursor.next(&deque),
            Err(CollectionError::ConcurrentStructuralChange { .. })
        ));
    }
}
