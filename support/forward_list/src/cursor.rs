//! Positions in a [`ForwardList`].
//!
//! A cursor points at one of three kinds of position: the before-begin
//! sentinel, an element, or past-the-end. [`Cursor`] gives read-only access
//! and can be freely copied. [`CursorMut`] holds the list exclusively and can
//! insert or erase the element following its position.
//!
//! Cursors compare equal when they point at the same node, regardless of
//! their flavor or the values stored.
use std::fmt;

use crate::{
    alloc::{or_abort, AllocError},
    list::{ForwardList, Position},
};

/// A read-only cursor over a `ForwardList`.
///
/// Copying a cursor yields another cursor at the same node.
pub struct Cursor<'a, T: 'a> {
    list: &'a ForwardList<T>,
    pos: Position<T>,
}

/// A cursor over a `ForwardList` with editing operations.
///
/// The operations that modify the list return a new cursor which reborrows
/// this one. The original cursor stays where it was and becomes usable again
/// once the returned cursor is dropped.
pub struct CursorMut<'a, T: 'a> {
    list: &'a mut ForwardList<T>,
    pos: Position<T>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a ForwardList<T>, pos: Position<T>) -> Self {
        Self { list, pos }
    }

    /// Get the element at the cursor. Returns `None` at the before-begin and
    /// past-the-end positions.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        unsafe { self.pos.element() }
    }

    /// Get the element following the cursor.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a T> {
        unsafe { self.list.next_position(self.pos).element() }
    }

    /// Move the cursor to the next position. Does nothing at past-the-end.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.list.next_position(self.pos);
    }

    /// Returns `true` if the cursor is at the before-begin position.
    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.pos.is_before_begin()
    }

    /// Returns `true` if the cursor is at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    fn addr(&self) -> *const () {
        self.list.position_addr(self.pos)
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut ForwardList<T>, pos: Position<T>) -> Self {
        Self { list, pos }
    }

    /// Get a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.pos)
    }

    /// Get the element at the cursor. Returns `None` at the before-begin and
    /// past-the-end positions.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        unsafe { self.pos.element() }
    }

    /// Get the element at the cursor mutably.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        unsafe { self.pos.element_mut() }
    }

    /// Convert the cursor into a mutable reference to its element.
    #[inline]
    pub fn into_mut(self) -> Option<&'a mut T> {
        unsafe { self.pos.element_mut() }
    }

    /// Get the element following the cursor mutably.
    #[inline]
    pub fn peek_next_mut(&mut self) -> Option<&mut T> {
        unsafe { self.list.next_position(self.pos).element_mut() }
    }

    /// Move the cursor to the next position. Does nothing at past-the-end.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.list.next_position(self.pos);
    }

    /// Returns `true` if the cursor is at the before-begin position.
    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.pos.is_before_begin()
    }

    /// Returns `true` if the cursor is at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Inserts `value` after the cursor and returns a cursor at the new
    /// element.
    ///
    /// This operation should compute in O(1) time.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the past-the-end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut list = ForwardList::from([1, 2, 3]);
    /// let mut cursor = list.begin_mut();
    /// assert_eq!(cursor.insert_after(9).get(), Some(&9));
    /// assert_eq!(list, ForwardList::from([1, 9, 2, 3]));
    /// ```
    pub fn insert_after(&mut self, value: T) -> CursorMut<'_, T> {
        or_abort(self.try_insert_after(value))
    }

    /// Inserts `value` after the cursor, reporting allocation failure.
    ///
    /// The list is left unchanged on failure.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the past-the-end position.
    pub fn try_insert_after(&mut self, value: T) -> Result<CursorMut<'_, T>, AllocError> {
        assert!(
            !self.pos.is_end(),
            "insert_after at the past-the-end position"
        );
        let pos = unsafe { self.list.try_insert_after_position(self.pos, value)? };
        Ok(CursorMut::new(&mut *self.list, pos))
    }

    /// Removes the element following the cursor and returns a cursor at the
    /// element that now follows it (possibly past-the-end).
    ///
    /// On an empty list this does nothing and returns a past-the-end cursor.
    ///
    /// This operation should compute in O(1) time.
    ///
    /// # Panics
    ///
    /// Panics if the list is not empty and no element follows the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut list = ForwardList::from([1, 2, 3]);
    /// let mut cursor = list.begin_mut();
    /// assert_eq!(cursor.erase_after().get(), Some(&3));
    /// assert_eq!(list, ForwardList::from([1, 3]));
    /// ```
    pub fn erase_after(&mut self) -> CursorMut<'_, T> {
        if self.list.is_empty() {
            return CursorMut::new(&mut *self.list, Position::End);
        }
        if self.remove_after().is_none() {
            panic!("erase_after with no element after the cursor");
        }
        let next = self.list.next_position(self.pos);
        CursorMut::new(&mut *self.list, next)
    }

    /// Removes the element following the cursor and returns it, or `None` if
    /// there is no such element.
    pub fn remove_after(&mut self) -> Option<T> {
        unsafe { self.list.unlink_after(self.pos) }.map(|node| node.into_element())
    }

    fn addr(&self) -> *const () {
        self.list.position_addr(self.pos)
    }
}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.addr() == other.addr()
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.addr() == other.addr()
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.addr() == other.addr()
    }
}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.addr() == other.addr()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
