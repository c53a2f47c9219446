//! Array-backed priority queue.
//!
//! The head is whichever element the comparator puts first: the smallest
//! under [`NaturalOrder`], the largest under [`ReverseOrder`](crate::ReverseOrder).
//! Insertion order plays no part in extraction order, and elements the
//! comparator considers equal come out in any order. This is not a FIFO.

use crate::comparator::{Comparator, NaturalOrder};
use crate::cursor::Cursor;
use crate::dynamic_array::{self, ArrayCursor, DynamicArray};
use collection_traits::{Collection, HasLength, Queue, Result};
use std::fmt;
use tracing::debug;

pub struct BinaryHeap<T, C = NaturalOrder> {
    data: DynamicArray<T>,
    comparator: C,
}

impl<T: Ord> BinaryHeap<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> BinaryHeap<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            data: DynamicArray::with_capacity(capacity),
            comparator,
        }
    }

    /// Builds a heap from arbitrary items in O(n).
    pub fn from_vec_with_comparator(items: Vec<T>, comparator: C) -> Self {
        let mut heap = Self {
            data: DynamicArray::from(items),
            comparator,
        };
        heap.heapify();
        heap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// O(log n).
    pub fn offer(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes the head. O(log n).
    pub fn poll(&mut self) -> Option<T> {
        let last = self.data.len().checked_sub(1)?;
        self.data.as_mut_slice().swap(0, last);
        let head = self.data.pop();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        head
    }

    /// Removes one element equal to `item`, wherever it sits in the heap.
    pub fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.data.index_of(item) else {
            return false;
        };
        if self.data.swap_remove(index).is_err() {
            return false;
        }
        if index < self.data.len() {
            self.sift_down(index);
            self.sift_up(index);
        }
        true
    }

    /// Keeps only the items matching the predicate, then rebuilds the heap.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let removed = self.data.remove_if(|item| !keep(item));
        if removed > 0 {
            self.heapify();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.data.clear()
    }

    /// Items in storage order, which is not priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Storage-order cursor. Heaps don't support removal through a cursor.
    pub fn cursor(&self) -> HeapCursor {
        HeapCursor(self.data.cursor())
    }

    /// Removes items in priority order as the iterator is consumed.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its items in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_sorted().collect()
    }

    /// Consumes the heap, returning its items in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_iter().collect()
    }

    fn heapify(&mut self) {
        let len = self.data.len();
        debug!(len, "heapifying");
        for index in (0..len / 2).rev() {
            self.sift_down(index);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        let slice = self.data.as_mut_slice();
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.comparator.precedes(&slice[pos], &slice[parent]) {
                break;
            }
            slice.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let slice = self.data.as_mut_slice();
        let len = slice.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.comparator.precedes(&slice[right], &slice[left]) {
                right
            } else {
                left
            };
            if !self.comparator.precedes(&slice[child], &slice[pos]) {
                break;
            }
            slice.swap(pos, child);
            pos = child;
        }
    }
}

pub struct DrainSorted<'a, T, C: Comparator<T>> {
    heap: &'a mut BinaryHeap<T, C>,
}

impl<T, C: Comparator<T>> Iterator for DrainSorted<'_, T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.poll()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for DrainSorted<'_, T, C> {}

impl<T, C: Comparator<T> + Default> Default for BinaryHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for BinaryHeap<T, C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

/// Same items with the same multiplicity, whatever their storage order.
impl<T: PartialEq, C> PartialEq for BinaryHeap<T, C> {
    fn eq(&self, other: &Self) -> bool {
        let count = |items: &DynamicArray<T>, item: &T| items.iter().filter(|x| *x == item).count();
        self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .all(|item| count(&self.data, item) == count(&other.data, item))
    }
}

impl<T, C: Comparator<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (additional, _) = iter.size_hint();
        if additional > self.len() {
            self.data.extend(iter);
            self.heapify();
        } else {
            iter.for_each(|item| self.offer(item));
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for BinaryHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self {
            data: iter.into_iter().collect(),
            comparator: C::default(),
        };
        heap.heapify();
        heap
    }
}

impl<T: Ord> From<Vec<T>> for BinaryHeap<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec_with_comparator(items, NaturalOrder)
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BinaryHeap<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Storage order. Use [`BinaryHeap::into_sorted_vec`] for priority order.
impl<T, C> IntoIterator for BinaryHeap<T, C> {
    type Item = T;
    type IntoIter = dynamic_array::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Storage-order fail-fast cursor over a [`BinaryHeap`].
#[derive(Debug, Clone)]
pub struct HeapCursor(ArrayCursor);

impl<'c, T: 'c, C: 'c> Cursor<'c, BinaryHeap<T, C>> for HeapCursor {
    type Item = &'c T;

    fn has_next(&self, heap: &'c BinaryHeap<T, C>) -> Result<bool> {
        self.0.has_next(&heap.data)
    }

    fn next(&mut self, heap: &'c BinaryHeap<T, C>) -> Result<&'c T> {
        self.0.next(&heap.data)
    }
}

impl<T, C> HasLength for BinaryHeap<T, C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: PartialEq, C: Comparator<T>> Collection for BinaryHeap<T, C> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.offer(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        Ok(BinaryHeap::remove_item(self, item))
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        Ok(self.retain(|item| !predicate(item)))
    }

    fn clear(&mut self) -> Result<()> {
        BinaryHeap::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.data.iter().for_each(f)
    }
}

impl<T: PartialEq, C: Comparator<T>> Queue for BinaryHeap<T, C> {
    fn offer(&mut self, item: T) -> bool {
        BinaryHeap::offer(self, item);
        true
    }

    fn poll(&mut self) -> Option<T> {
        BinaryHeap::poll(self)
    }

    fn peek(&self) -> Option<&T> {
        BinaryHeap::peek(self)
    }
}

#[cfg(test)]
mod tests {
    use super::BinaryHeap;
    use crate::comparator::ReverseOrder;
    use crate::cursor::Cursor;
    use collection_traits::{CollectionError, Queue};
    use itertools::Itertools;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn is_heap<T, C: super::Comparator<T>>(heap: &BinaryHeap<T, C>) -> bool {
        let items = heap.data.as_slice();
        (1..items.len()).all(|i| !heap.comparator.precedes(&items[i], &items[(i - 1) / 2]))
    }

    #[test]
    fn polls_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.offer(50);
        heap.offer(20);
        heap.offer(40);
        assert_eq!(heap.peek(), Some(&20));
        assert_eq!(heap.poll(), Some(20));
        assert_eq!(heap.iter().copied().sorted().collect_vec(), vec![40, 50]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![1])]
    #[case(vec![5, 1, 4, 1, 3], vec![1, 1, 3, 4, 5])]
    #[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0], (0..10).collect())]
    fn heapify_then_drain(#[case] items: Vec<i32>, #[case] expected: Vec<i32>) {
        let heap = BinaryHeap::from(items);
        assert!(is_heap(&heap));
        assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn custom_comparators() {
        let mut max = BinaryHeap::with_comparator(ReverseOrder);
        max.extend([3, 9, 1, 7]);
        assert_eq!(max.poll(), Some(9));

        let mut by_len = BinaryHeap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        by_len.extend(["banana", "fig", "apple"]);
        assert_eq!(by_len.drain_sorted().collect_vec(), vec!["fig", "apple", "banana"]);
        assert!(by_len.is_empty());
    }

    #[test]
    fn strict_accessors_on_empty() {
        let mut heap: BinaryHeap<u32> = BinaryHeap::new();
        assert_eq!(Queue::poll(&mut heap), None);
        assert_eq!(heap.remove_head(), Err(CollectionError::EmptyContainer));
        assert_eq!(heap.element(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn remove_arbitrary_item() {
        let mut heap: BinaryHeap<u32> = (0..20).rev().collect();
        assert!(heap.remove_item(&7));
        assert!(!heap.remove_item(&7));
        assert!(heap.remove_item(&0));
        assert!(is_heap(&heap));
        assert_eq!(heap.len(), 18);
        assert_eq!(
            heap.into_sorted_vec(),
            (1..20).filter(|x| *x != 7).collect_vec()
        );
    }

    #[test]
    fn retain_keeps_heap_order() {
        let mut heap: BinaryHeap<u32> = (0..30).collect();
        assert_eq!(heap.retain(|x| x % 4 != 0), 8);
        assert!(is_heap(&heap));
        assert_eq!(heap.peek(), Some(&1));
    }

    #[test]
    fn random_offers_and_polls_come_out_sorted() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut heap = BinaryHeap::new();
        let mut mirror = vec![];

        for _ in 0..2000 {
            if rng.gen_bool(0.6) || mirror.is_empty() {
                let value: u16 = rng.gen_range(0..500);
                heap.offer(value);
                mirror.push(value);
            } else {
                mirror.sort_unstable();
                assert_eq!(heap.poll(), Some(mirror.remove(0)));
            }
            assert!(is_heap(&heap));
        }

        mirror.sort_unstable();
        let drained = heap.drain_sorted().collect_vec();
        assert!(drained.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(drained, mirror);
    }

    #[test]
    fn equality_ignores_storage_order() {
        let a: BinaryHeap<u32> = BinaryHeap::from(vec![3, 1, 2, 2]);
        let mut b = BinaryHeap::new();
        for x in [2, 2, 1, 3] {
            b.offer(x);
        }
        assert_eq!(a, b);
        b.poll();
        assert_ne!(a, b);
    }

    #[test]
    fn cursor_sees_every_item() {
        let mut heap = BinaryHeap::from([4, 2, 8]);
        let mut cursor = heap.cursor();
        let mut seen = vec![];
        cursor.for_each_remaining(&heap, |x| seen.push(*x)).unwrap();
        assert_eq!(seen.into_iter().sorted().collect_vec(), vec![2, 4, 8]);

        let stale = heap.cursor();
        heap.offer(1);
        assert!(matches!(
            stale.has_next(&heap),
            Err(CollectionError::ConcurrentStructuralChange { .. })
        ));
    }
}
