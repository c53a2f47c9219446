//! Fail-fast traversal handles.
//!
//! A cursor doesn't borrow the container that issued it. It holds a
//! position and a [`Stamp`](crate::Stamp), and every operation takes the
//! container as an argument. That lets the container be mutated while a
//! cursor exists; the cursor notices on its next use and fails with
//! [`CollectionError::ConcurrentStructuralChange`](collection_traits::CollectionError)
//! instead of reading a position that no longer means anything.
//!
//! Mutating through the cursor itself ([`RemoveCurrent::remove_current`])
//! keeps that cursor valid and invalidates every other one.
//!
//! For plain borrowing iteration use each container's `iter()`, which the
//! borrow checker already protects.

use collection_traits::Result;

pub trait Cursor<'c, C: ?Sized + 'c> {
    type Item;

    fn has_next(&self, container: &'c C) -> Result<bool>;

    /// Advances and returns the next item.
    ///
    /// Fails with `NoSuchElement` once the cursor is exhausted.
    fn next(&mut self, container: &'c C) -> Result<Self::Item>;

    fn for_each_remaining(
        &mut self,
        container: &'c C,
        mut f: impl FnMut(Self::Item),
    ) -> Result<()> {
        while self.has_next(container)? {
            f(self.next(container)?);
        }
        Ok(())
    }
}

pub trait RemoveCurrent<C: ?Sized> {
    type Removed;

    /// Removes the item last returned by the cursor.
    ///
    /// Fails with `InvalidCursorState` when nothing was returned since the
    /// cursor was created or since the last removal.
    fn remove_current(&mut self, container: &mut C) -> Result<Self::Removed>;
}
