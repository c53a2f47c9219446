//! Generic containers with fail-fast cursors.
//!
//! | Container          | Backing store              | Capabilities                    |
//! |--------------------|----------------------------|---------------------------------|
//! | [`DynamicArray`]   | contiguous buffer          | `Collection`, `Sequence`        |
//! | [`LinkedSequence`] | index-linked node arena    | `Collection`, `Sequence`, `Queue` |
//! | [`HashTable`]      | chained buckets            | `Associative`                   |
//! | [`Set`]            | `HashTable<T, ()>`         | `Collection`                    |
//! | [`Deque`]          | ring buffer                | `Collection`, `Queue`           |
//! | [`BinaryHeap`]     | `DynamicArray`             | `Collection`, `Queue`           |
//! | [`ImmutableList`], [`ImmutableSet`] | boxed slice, `Set` | read-only `Collection`  |
//!
//! None of the containers synchronize internally. See [`cursor`] for the
//! iteration protocol.

pub mod comparator;
pub mod config;
pub mod cursor;
pub mod deque;
pub mod dynamic_array;
pub mod hash_table;
pub mod heap;
pub mod immutable;
pub mod linked;
pub mod set;
mod stamp;

pub use collection_traits::{
    Associative, Collection, CollectionError, HasLength, Queue, Result, Sequence,
};
pub use comparator::{Comparator, NaturalOrder, ReverseOrder};
pub use config::{ConfigError, TableConfig};
pub use cursor::{Cursor, RemoveCurrent};
pub use deque::{Deque, DequeCursor};
pub use dynamic_array::{ArrayCursor, DynamicArray};
pub use hash_table::{HashTable, TableCursor};
pub use heap::{BinaryHeap, HeapCursor};
pub use immutable::{ImmutableCursor, ImmutableList, ImmutableSet, ImmutableSetCursor};
pub use linked::{LinkedSequence, ListCursor};
pub use set::{Set, SetCursor};
pub use stamp::Stamp;

pub mod prelude {
    pub use crate::cursor::{Cursor, RemoveCurrent};
    pub use collection_traits::{Associative, Collection, HasLength, Queue, Sequence};
}
