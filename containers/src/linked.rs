//! Doubly linked sequence with a bidirectional, editing cursor.
//!
//! Nodes live in an arena and link to each other by slot index. The arena
//! owns every node; `next` and `prev` are plain indices used only for
//! traversal, so there are no ownership cycles to untangle.

use crate::cursor::{Cursor, RemoveCurrent};
use crate::stamp::{ModCount, Stamp};
use collection_traits::{Collection, CollectionError, HasLength, Queue, Result, Sequence};
use std::fmt;

const NONE: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: usize },
}

pub struct LinkedSequence<T> {
    slots: Vec<Slot<T>>,
    free: usize,
    head: usize,
    tail: usize,
    len: usize,
    mods: ModCount,
}

impl<T> LinkedSequence<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: NONE,
            head: NONE,
            tail: NONE,
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

    pub fn stamp(&self) -> Stamp {
        self.mods.stamp()
    }

    pub fn push_front(&mut self, value: T) {
        self.link_before(self.head, value);
    }

    pub fn push_back(&mut self, value: T) {
        self.link_before(NONE, value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        (self.head != NONE).then(|| self.unlink(self.head))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        (self.tail != NONE).then(|| self.unlink(self.tail))
    }

    pub fn front(&self) -> Option<&T> {
        if self.head == NONE {
            return None;
        }
        Some(&self.node(self.head).value)
    }

    pub fn back(&self) -> Option<&T> {
        if self.tail == NONE {
            return None;
        }
        Some(&self.node(self.tail).value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head == NONE {
            return None;
        }
        let head = self.head;
        Some(&mut self.node_mut(head).value)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail == NONE {
            return None;
        }
        let tail = self.tail;
        Some(&mut self.node_mut(tail).value)
    }

    /// O(n) positional access, walking from whichever end is closer.
    pub fn get(&self, index: usize) -> Result<&T> {
        let idx = self.slot_at(index)?;
        Ok(&self.node(idx).value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let idx = self.slot_at(index)?;
        Ok(&mut self.node_mut(idx).value)
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// Inserts so the new item ends up at `index`. `index == len` appends.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let before = if index == self.len {
            NONE
        } else {
            self.slot_at(index)?
        };
        self.link_before(before, value);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let idx = self.slot_at(index)?;
        Ok(self.unlink(idx))
    }

    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.slots.clear();
        self.free = NONE;
        self.head = NONE;
        self.tail = NONE;
        self.len = 0;
        self.mods.bump();
    }

    /// Removes every item matching the predicate. Returns the number removed.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let mut idx = self.head;
        while idx != NONE {
            let node = self.node(idx);
            let next = node.next;
            if predicate(&node.value) {
                self.unlink(idx);
                removed += 1;
            }
            idx = next;
        }
        removed
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Cursor positioned before the first item.
    pub fn cursor(&self) -> ListCursor {
        ListCursor {
            next: self.head,
            next_index: 0,
            last: NONE,
            stamp: self.stamp(),
        }
    }

    /// Cursor positioned before the item at `index`. `index == len` gives a
    /// cursor past the last item, ready for backward traversal.
    pub fn cursor_at(&self, index: usize) -> Result<ListCursor> {
        if index > self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let next = if index == self.len {
            NONE
        } else {
            self.slot_at(index)?
        };
        Ok(ListCursor {
            next,
            next_index: index,
            last: NONE,
            stamp: self.stamp(),
        })
    }

    pub fn cursor_at_end(&self) -> ListCursor {
        ListCursor {
            next: NONE,
            next_index: self.len,
            last: NONE,
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
        self.iter().any(|x| x == item)
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link {idx} points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link {idx} points at a vacant slot"),
        }
    }

    /// Slot index of the item at logical position `index`.
    fn slot_at(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(CollectionError::out_of_range(index, self.len));
        }
        let idx = if index <= self.len / 2 {
            (0..index).fold(self.head, |idx, _| self.node(idx).next)
        } else {
            (index + 1..self.len).fold(self.tail, |idx, _| self.node(idx).prev)
        };
        Ok(idx)
    }

    /// Links a new node in front of `next`, or at the back when `next` is
    /// `NONE`. Returns the new node's slot.
    fn link_before(&mut self, next: usize, value: T) -> usize {
        let prev = if next == NONE {
            self.tail
        } else {
            self.node(next).prev
        };
        let node = Node { value, prev, next };

        let idx = if self.free == NONE {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        } else {
            let idx = self.free;
            let Slot::Vacant { next_free } = self.slots[idx] else {
                unreachable!("free list points at an occupied slot");
            };
            self.free = next_free;
            self.slots[idx] = Slot::Occupied(node);
            idx
        };

        if prev == NONE {
            self.head = idx;
        } else {
            self.node_mut(prev).next = idx;
        }
        if next == NONE {
            self.tail = idx;
        } else {
            self.node_mut(next).prev = idx;
        }

        self.len += 1;
        self.mods.bump();
        idx
    }

    fn unlink(&mut self, idx: usize) -> T {
        let slot = std::mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        let Slot::Occupied(Node { value, prev, next }) = slot else {
            unreachable!("unlinking a vacant slot");
        };
        self.free = idx;

        if prev == NONE {
            self.head = next;
        } else {
            self.node_mut(prev).next = next;
        }
        if next == NONE {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }

        self.len -= 1;
        self.mods.bump();
        value
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        out.extend(iter);
        out
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSequence<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedSequence<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<T>(LinkedSequence<T>);

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

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// Bidirectional cursor over a [`LinkedSequence`].
///
/// The cursor sits *between* items. A fresh cursor sits before the first
/// one. `move_next` steps over the following item and makes it current,
/// `move_previous` steps back over the preceding one and makes that
/// current. Edits act on the current item:
///
/// ```text
/// [A, B, C]      cursor():            | A B C     previous_index None, next_index 0
///                move_next() -> A     A | B C     previous_index 0,    next_index 1
///                insert_before_current(X)
///                                     A | X B C   next move_next() returns X
/// ```
#[derive(Debug, Clone)]
pub struct ListCursor {
    /// Slot `move_next` will step over, `NONE` at the end.
    next: usize,
    next_index: usize,
    /// Slot last stepped over in either direction, `NONE` if there is none
    /// or it was removed.
    last: usize,
    stamp: Stamp,
}

impl ListCursor {
    pub fn move_next<T>(&mut self, list: &LinkedSequence<T>) -> Result<bool> {
        list.mods.verify(self.stamp)?;
        if self.next == NONE {
            return Ok(false);
        }
        self.last = self.next;
        self.next = list.node(self.next).next;
        self.next_index += 1;
        Ok(true)
    }

    pub fn move_previous<T>(&mut self, list: &LinkedSequence<T>) -> Result<bool> {
        list.mods.verify(self.stamp)?;
        let prev = if self.next == NONE {
            list.tail
        } else {
            list.node(self.next).prev
        };
        if prev == NONE {
            return Ok(false);
        }
        self.next = prev;
        self.last = prev;
        self.next_index -= 1;
        Ok(true)
    }

    pub fn has_previous<T>(&self, list: &LinkedSequence<T>) -> Result<bool> {
        list.mods.verify(self.stamp)?;
        Ok(self.next_index > 0)
    }

    /// Steps back and returns the item stepped over.
    pub fn previous<'c, T>(&mut self, list: &'c LinkedSequence<T>) -> Result<&'c T> {
        if !self.move_previous(list)? {
            return Err(CollectionError::NoSuchElement);
        }
        Ok(&list.node(self.last).value)
    }

    /// The item last stepped over.
    pub fn current<'c, T>(&self, list: &'c LinkedSequence<T>) -> Result<&'c T> {
        list.mods.verify(self.stamp)?;
        if self.last == NONE {
            return Err(CollectionError::InvalidCursorState);
        }
        Ok(&list.node(self.last).value)
    }

    /// Index of the item before the cursor, counted from the start. `None`
    /// when the cursor sits before the first item.
    pub fn previous_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Index of the item after the cursor. Equals the length when the
    /// cursor sits past the last item.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Inserts at the cursor position. The cursor ends up in front of the
    /// new item, so the following `move_next` returns it.
    ///
    /// Clears the current item: `replace_current` and `remove_current` need
    /// another move first.
    pub fn insert_before_current<T>(&mut self, list: &mut LinkedSequence<T>, value: T) -> Result<()> {
        list.mods.verify(self.stamp)?;
        self.next = list.link_before(self.next, value);
        self.last = NONE;
        self.stamp = list.stamp();
        Ok(())
    }

    /// Overwrites the current item, returning the old value. Not a
    /// structural change.
    pub fn replace_current<T>(&mut self, list: &mut LinkedSequence<T>, value: T) -> Result<T> {
        list.mods.verify(self.stamp)?;
        if self.last == NONE {
            return Err(CollectionError::InvalidCursorState);
        }
        Ok(std::mem::replace(&mut list.node_mut(self.last).value, value))
    }
}

impl<'c, T: 'c> Cursor<'c, LinkedSequence<T>> for ListCursor {
    type Item = &'c T;

    fn has_next(&self, list: &'c LinkedSequence<T>) -> Result<bool> {
        list.mods.verify(self.stamp)?;
        Ok(self.next != NONE)
    }

    fn next(&mut self, list: &'c LinkedSequence<T>) -> Result<&'c T> {
        if !self.move_next(list)? {
            return Err(CollectionError::NoSuchElement);
        }
        Ok(&list.node(self.last).value)
    }
}

impl<T> RemoveCurrent<LinkedSequence<T>> for ListCursor {
    type Removed = T;

    fn remove_current(&mut self, list: &mut LinkedSequence<T>) -> Result<T> {
        list.mods.verify(self.stamp)?;
        if self.last == NONE {
            return Err(CollectionError::InvalidCursorState);
        }

        if self.last == self.next {
            // moved backward: the removed item was in front of the cursor
            self.next = list.node(self.last).next;
        } else {
            self.next_index -= 1;
        }

        let value = list.unlink(self.last);
        self.last = NONE;
        self.stamp = list.stamp();
        Ok(value)
    }
}

impl<T> HasLength for LinkedSequence<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: PartialEq> Collection for LinkedSequence<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        LinkedSequence::contains(self, item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push_back(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        Ok(self.remove_if(predicate))
    }

    fn clear(&mut self) -> Result<()> {
        LinkedSequence::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f)
    }
}

impl<T: PartialEq> Sequence for LinkedSequence<T> {
    fn get(&self, index: usize) -> Result<&T> {
        LinkedSequence::get(self, index)
    }

    fn set(&mut self, index: usize, item: T) -> Result<T> {
        LinkedSequence::set(self, index, item)
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        LinkedSequence::insert_at(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        LinkedSequence::remove_at(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        LinkedSequence::index_of(self, item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        LinkedSequence::last_index_of(self, item)
    }
}

impl<T: PartialEq> Queue for LinkedSequence<T> {
    fn offer(&mut self, item: T) -> bool {
        self.push_back(item);
        true
    }

    fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn peek(&self) -> Option<&T> {
        self.front()
    }
}

#[cfg(test)]
mod tests {
    use super::LinkedSequence;
    use crate::cursor::{Cursor, RemoveCurrent};
    use collection_traits::{CollectionError, Queue};
    use itertools::Itertools;
    use rstest::rstest;

    fn fruits() -> LinkedSequence<&'static str> {
        LinkedSequence::from(["Apple", "Banana", "Cherry", "Date"])
    }

    #[test]
    fn ends() {
        let mut list = LinkedSequence::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(list.iter().copied().collect_vec(), vec![1, 2, 3]);
        assert_eq!(list.iter().rev().copied().collect_vec(), vec![3, 2, 1]);

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn slots_are_reused() {
        let mut list = LinkedSequence::new();
        for i in 0..4 {
            list.push_back(i);
        }
        list.remove_at(1).unwrap();
        list.remove_at(1).unwrap();
        list.push_front(10);
        list.push_back(11);
        assert_eq!(list.slots.len(), 4);
        assert_eq!(list.iter().copied().collect_vec(), vec![10, 0, 3, 11]);
    }

    #[rstest]
    #[case(0, "X Apple Banana Cherry Date")]
    #[case(2, "Apple Banana X Cherry Date")]
    #[case(4, "Apple Banana Cherry Date X")]
    fn positional_insert(#[case] index: usize, #[case] expected: &str) {
        let mut list = fruits();
        list.insert_at(index, "X").unwrap();
        assert_eq!(list.iter().join(" "), expected);
    }

    #[test]
    fn positional_errors() {
        let mut list = fruits();
        assert_eq!(list.get(4), Err(CollectionError::out_of_range(4, 4)));
        assert_eq!(list.insert_at(5, "X"), Err(CollectionError::out_of_range(5, 4)));
        assert_eq!(list.get(3), Ok(&"Date"));
    }

    #[test]
    fn forward_and_backward_traversal() {
        let list = fruits();

        let mut cursor = list.cursor();
        let mut forward = vec![];
        cursor
            .for_each_remaining(&list, |item| forward.push(*item))
            .unwrap();
        assert_eq!(forward, vec!["Apple", "Banana", "Cherry", "Date"]);

        let mut cursor = list.cursor_at(2).unwrap();
        assert_eq!(cursor.next(&list), Ok(&"Cherry"));

        let mut cursor = list.cursor_at_end();
        let mut backward = vec![];
        while cursor.has_previous(&list).unwrap() {
            backward.push(*cursor.previous(&list).unwrap());
        }
        assert_eq!(backward, vec!["Date", "Cherry", "Banana", "Apple"]);
        assert_eq!(cursor.previous(&list), Err(CollectionError::NoSuchElement));
    }

    #[test]
    fn index_tracking() {
        let list = fruits();
        let mut cursor = list.cursor();
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.previous_index(), None);

        cursor.next(&list).unwrap();
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.previous_index(), Some(0));

        cursor.previous(&list).unwrap();
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.previous_index(), None);

        let end = list.cursor_at_end();
        assert_eq!(end.next_index(), list.len());
    }

    #[test]
    fn insert_replace_remove() {
        let mut list = fruits();
        let mut cursor = list.cursor();

        assert_eq!(cursor.next(&list), Ok(&"Apple"));
        cursor.insert_before_current(&mut list, "Orange").unwrap();
        assert_eq!(list.iter().join(" "), "Apple Orange Banana Cherry Date");
        assert_eq!(
            cursor.remove_current(&mut list),
            Err(CollectionError::InvalidCursorState)
        );

        assert_eq!(cursor.next(&list), Ok(&"Orange"));
        assert_eq!(cursor.replace_current(&mut list, "Mango"), Ok("Orange"));
        assert_eq!(list.iter().join(" "), "Apple Mango Banana Cherry Date");

        assert_eq!(cursor.next(&list), Ok(&"Banana"));
        assert_eq!(cursor.remove_current(&mut list), Ok("Banana"));
        assert_eq!(list.iter().join(" "), "Apple Mango Cherry Date");
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(&list), Ok(&"Cherry"));
    }

    #[test]
    fn remove_after_moving_backward() {
        let mut list = fruits();
        let mut cursor = list.cursor_at_end();
        assert_eq!(cursor.previous(&list), Ok(&"Date"));
        assert_eq!(cursor.previous(&list), Ok(&"Cherry"));
        assert_eq!(cursor.remove_current(&mut list), Ok("Cherry"));
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(&list), Ok(&"Date"));
        assert_eq!(cursor.previous(&list), Ok(&"Date"));
        assert_eq!(cursor.previous(&list), Ok(&"Banana"));
    }

    #[test]
    fn replace_while_iterating() {
        let mut words = LinkedSequence::from(["cat", "dog", "cat", "bird"]);
        let mut cursor = words.cursor();
        while cursor.move_next(&words).unwrap() {
            if *cursor.current(&words).unwrap() == "cat" {
                cursor.replace_current(&mut words, "tiger").unwrap();
            }
        }
        assert_eq!(words.iter().join(" "), "tiger dog tiger bird");
    }

    #[test]
    fn removal_twice_without_move_fails() {
        let mut list = fruits();
        let mut cursor = list.cursor();
        assert_eq!(
            cursor.remove_current(&mut list),
            Err(CollectionError::InvalidCursorState)
        );
        cursor.next(&list).unwrap();
        cursor.remove_current(&mut list).unwrap();
        assert_eq!(
            cursor.remove_current(&mut list),
            Err(CollectionError::InvalidCursorState)
        );
    }

    #[test]
    fn other_cursors_go_stale() {
        let mut list = fruits();
        let mut editor = list.cursor();
        let mut reader = list.cursor();
        reader.next(&list).unwrap();

        editor.next(&list).unwrap();
        editor.remove_current(&mut list).unwrap();

        assert!(editor.has_next(&list).unwrap());
        assert!(matches!(
            reader.next(&list),
            Err(CollectionError::ConcurrentStructuralChange { .. })
        ));

        list.push_back("Elderberry");
        assert!(editor.move_next(&list).is_err());
    }

    #[test]
    fn queue_facade() {
        let mut queue = LinkedSequence::new();
        queue.offer("Apple");
        queue.offer("Banana");
        assert_eq!(queue.peek(), Some(&"Apple"));
        assert_eq!(queue.poll(), Some("Apple"));
        assert_eq!(queue.remove_head(), Ok("Banana"));
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.element(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn remove_if_keeps_links_consistent() {
        let mut list: LinkedSequence<u32> = (0..10).collect();
        assert_eq!(list.remove_if(|x| x % 2 == 0), 5);
        assert_eq!(list.iter().copied().collect_vec(), vec![1, 3, 5, 7, 9]);
        assert_eq!(list.iter().rev().copied().collect_vec(), vec![9, 7, 5, 3, 1]);
        assert_eq!(list.remove_if(|x| x % 2 == 0), 0);
    }
}
