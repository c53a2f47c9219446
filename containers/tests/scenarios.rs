use containers::prelude::*;
use containers::{
    BinaryHeap, CollectionError, Deque, DynamicArray, HashTable, ImmutableList, ImmutableSet,
    LinkedSequence, ReverseOrder, Set,
};
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn queue_polls_in_offer_order() {
    init_tracing();
    let mut queue = Deque::new();
    queue.offer("Apple");
    queue.offer("Banana");
    queue.offer("Cherry");

    assert_eq!(queue.poll(), Some("Apple"));
    assert_eq!(queue.iter().copied().collect_vec(), vec!["Banana", "Cherry"]);
}

#[test]
fn priority_queue_polls_smallest() {
    init_tracing();
    let mut heap = BinaryHeap::new();
    for x in [50, 20, 40] {
        heap.offer(x);
    }

    assert_eq!(heap.poll(), Some(20));
    assert_eq!(heap.iter().copied().sorted().collect_vec(), vec![40, 50]);
}

#[test]
fn put_returns_replaced_value() {
    init_tracing();
    let mut prices = HashTable::new();
    assert_eq!(prices.put("Apple", 10), None);
    assert_eq!(prices.put("Apple", 25), Some(10));
    assert_eq!(prices.get("Apple"), Some(&25));
}

#[test]
fn cursor_removal_while_iterating() {
    init_tracing();
    let mut letters = DynamicArray::from(["A", "B", "C", "D", "E"]);
    let mut cursor = letters.cursor();
    while cursor.has_next(&letters).unwrap() {
        let letter = *cursor.next(&letters).unwrap();
        if letter == "B" || letter == "D" {
            cursor.remove_current(&mut letters).unwrap();
        }
    }
    assert_eq!(letters.as_slice(), &["A", "C", "E"]);

    let mut letters = LinkedSequence::from(["A", "B", "C", "D", "E"]);
    let mut cursor = letters.cursor();
    while cursor.has_next(&letters).unwrap() {
        let letter = *cursor.next(&letters).unwrap();
        if letter == "B" || letter == "D" {
            cursor.remove_current(&mut letters).unwrap();
        }
    }
    assert_eq!(letters.iter().join(""), "ACE");
}

#[test]
fn immutable_containers_reject_mutation() {
    let mut list = ImmutableList::single("Apple");
    assert!(matches!(
        list.add("Banana"),
        Err(CollectionError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        list.set(0, "Banana"),
        Err(CollectionError::UnsupportedOperation { .. })
    ));

    let mut set = ImmutableSet::single("Apple");
    assert!(matches!(
        set.remove_item(&"Apple"),
        Err(CollectionError::UnsupportedOperation { .. })
    ));
    assert_eq!(set.len(), 1);
}

#[test]
fn outside_mutation_invalidates_cursors() {
    init_tracing();
    let mut array: DynamicArray<u32> = (0..5).collect();
    let mut cursor = array.cursor();
    cursor.next(&array).unwrap();
    array.push(5);
    assert!(matches!(
        cursor.next(&array),
        Err(CollectionError::ConcurrentStructuralChange { .. })
    ));

    let mut deque: Deque<u32> = (0..5).collect();
    let cursor = deque.cursor();
    deque.pop_front();
    assert!(cursor.has_next(&deque).is_err());

    let mut table: HashTable<u32, u32> = (0..5).map(|i| (i, i)).collect();
    let cursor = table.cursor();
    table.remove(&3);
    assert!(cursor.has_next(&table).is_err());
}

#[test]
fn cursors_belong_to_one_container() {
    let a: DynamicArray<u32> = (0..3).collect();
    let b = a.clone();
    let mut cursor = a.cursor();
    assert!(matches!(
        cursor.next(&b),
        Err(CollectionError::ConcurrentStructuralChange { .. })
    ));
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(9)]
fn set_then_get(#[case] index: usize) {
    let mut array: DynamicArray<u32> = (0..10).collect();
    let mut list: LinkedSequence<u32> = (0..10).collect();

    array.set(index, 100).unwrap();
    list.set(index, 100).unwrap();

    assert_eq!(array.get(index), Ok(&100));
    assert_eq!(list.get(index), Ok(&100));
    assert_eq!(array.len(), 10);
    assert_eq!(list.len(), 10);
}

#[test]
fn round_trips_through_vec() {
    let array = DynamicArray::from([3, 1, 2, 3]);
    assert_eq!(DynamicArray::from(array.to_vec()), array);

    let list = LinkedSequence::from([3, 1, 2, 3]);
    assert_eq!(list.to_vec().into_iter().collect::<LinkedSequence<_>>(), list);

    let deque = Deque::from([3, 1, 2, 3]);
    assert_eq!(deque.to_vec().into_iter().collect::<Deque<_>>(), deque);

    let set = Set::from([3, 1, 2]);
    assert_eq!(set.to_vec().into_iter().collect::<Set<_>>(), set);

    let heap = BinaryHeap::from([5, 1, 4, 1, 3]);
    assert_eq!(BinaryHeap::from(heap.to_vec()), heap);

    let list = ImmutableList::of([3, 1, 2, 3]);
    assert_eq!(ImmutableList::from(list.to_vec()), list);

    let table = HashTable::from([("a", 1), ("b", 2)]);
    let entries = table.iter().map(|(k, v)| (*k, *v)).collect_vec();
    assert_eq!(entries.into_iter().collect::<HashTable<_, _>>(), table);
}

#[test]
fn predicate_removal_is_idempotent() {
    let even = |x: &u32| x % 2 == 0;

    let mut array: DynamicArray<u32> = (0..20).collect();
    array.remove_where(even).unwrap();
    let once = array.clone();
    array.remove_where(even).unwrap();
    assert_eq!(array, once);

    let mut list: LinkedSequence<u32> = (0..20).collect();
    list.remove_where(even).unwrap();
    let once = list.clone();
    list.remove_where(even).unwrap();
    assert_eq!(list, once);

    let mut set: Set<u32> = (0..20).collect();
    set.remove_where(even).unwrap();
    let once = set.clone();
    set.remove_where(even).unwrap();
    assert_eq!(set, once);
}

#[test]
fn removed_keys_are_gone() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut table = HashTable::new();
    let keys = (0..300).map(|_| rng.gen_range(0..1000u32)).collect_vec();

    for &key in &keys {
        table.put(key, key * 2);
    }
    for &key in keys.iter().step_by(2) {
        table.remove(&key);
        assert!(!table.contains_key(&key));
        assert_eq!(table.get(&key), None);
    }
}

#[test]
fn heap_drains_in_comparator_order() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut min = BinaryHeap::new();
    let mut max = BinaryHeap::with_comparator(ReverseOrder);

    for _ in 0..500 {
        let x = rng.gen_range(-1000..1000i32);
        min.offer(x);
        max.offer(x);
        if rng.gen_bool(0.25) {
            min.poll();
            max.poll();
        }
    }

    let ascending = min.into_sorted_vec();
    let descending = max.into_sorted_vec();
    assert!(ascending.windows(2).all(|w| w[0] <= w[1]));
    assert!(descending.windows(2).all(|w| w[0] >= w[1]));
}

#[rstest]
#[case(&["a", "b", "c"])]
#[case(&["x"])]
#[case(&[])]
fn fifo_through_every_queue(#[case] items: &'static [&'static str]) {
    fn drain<Q: Queue<Item = &'static str>>(mut queue: Q, items: &[&'static str]) -> Vec<&'static str> {
        for &item in items {
            queue.offer(item);
        }
        std::iter::from_fn(|| queue.poll()).collect()
    }

    assert_eq!(drain(Deque::new(), items), items);
    assert_eq!(drain(LinkedSequence::new(), items), items);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_traversal_covers_everything() {
    use rayon::prelude::*;

    let array: DynamicArray<u64> = (1..=10_000).collect();
    assert_eq!(array.par_iter().sum::<u64>(), 50_005_000);

    let chunks = array.split(7).map(|chunk| chunk.iter().sum::<u64>()).collect_vec();
    assert_eq!(chunks.len(), 7);
    assert_eq!(chunks.iter().sum::<u64>(), 50_005_000);
}
