//! A singly-linked list with owned nodes and a before-begin sentinel.
//!
//! **Parts of this module are based on [`linked_list.rs`] from the Rust
//! standard library**: owned nodes behind `NonNull` links, the
//! `PhantomData<Box<Node<T>>>` marker, iterative teardown, the iterators, and
//! the `Send`/`Sync` impls. Nodes are reduced to a single forward link.
//!
//! [`linked_list.rs`]: https://github.com/rust-lang/rust/blob/5a1d028d4c8fc15473dc10473c38df162daa7b41/src/liballoc/collections/linked_list.rs
use log::trace;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::{
    alloc::{or_abort, try_box, AllocError},
    cursor::{Cursor, CursorMut},
};


/// A singly-linked list with owned nodes.
///
/// `ForwardList` supports pushing and popping at the front in constant time,
/// and inserting or erasing after any position through a [`CursorMut`].
///
/// The list owns a sentinel header that precedes the first element. A cursor
/// at the sentinel ([`before_begin`]) is the anchor for inserting and erasing
/// at the front of the list.
///
/// The list has no internal synchronization. Concurrent access is governed
/// by the usual `&`/`&mut` rules only.
///
/// [`before_begin`]: ForwardList::before_begin
pub struct ForwardList<T> {
    head: Link<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

/// The link part of a node. The sentinel is a bare `Link`.
pub(crate) struct Link<T> {
    /// Owns the next node.
    next: Option<NonNull<Node<T>>>,
}

// `link` must stay the first field so that a node pointer is also a link
// pointer.
#[repr(C)]
pub(crate) struct Node<T> {
    link: Link<T>,
    element: T,
}

/// A position in the chain of a particular list.
///
/// A `Position` carries no lifetime. Cursors pair it with a borrow of the
/// list it was obtained from, which keeps the referenced node alive.
pub(crate) enum Position<T> {
    BeforeBegin,
    Node(NonNull<Node<T>>),
    End,
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> Position<T> {
    fn from_link(next: Option<NonNull<Node<T>>>) -> Self {
        match next {
            Some(node) => Position::Node(node),
            None => Position::End,
        }
    }

    pub(crate) fn is_before_begin(self) -> bool {
        match self {
            Position::BeforeBegin => true,
            _ => false,
        }
    }

    pub(crate) fn is_end(self) -> bool {
        match self {
            Position::End => true,
            _ => false,
        }
    }

    /// Get the element at this position.
    ///
    /// # Safety
    ///
    /// The node must be alive for `'a` and not mutably aliased.
    pub(crate) unsafe fn element<'a>(self) -> Option<&'a T> {
        match self {
            Position::Node(node) => Some(&(*node.as_ptr()).element),
            _ => None,
        }
    }

    /// Get the element at this position mutably.
    ///
    /// # Safety
    ///
    /// The node must be alive for `'a` and not aliased.
    pub(crate) unsafe fn element_mut<'a>(self) -> Option<&'a mut T> {
        match self {
            Position::Node(node) => Some(&mut (*node.as_ptr()).element),
            _ => None,
        }
    }
}

/// An iterator over the elements of a `ForwardList`.
///
/// This `struct` is created by [`ForwardList::iter`].
pub struct Iter<'a, T: 'a> {
    head: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// A mutable iterator over the elements of a `ForwardList`.
///
/// This `struct` is created by [`ForwardList::iter_mut`].
pub struct IterMut<'a, T: 'a> {
    head: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

/// An owning iterator over the elements of a `ForwardList`.
///
/// This `struct` is created by the [`into_iter`] method on [`ForwardList`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: IntoIterator::into_iter
#[derive(Clone)]
pub struct IntoIter<T> {
    list: ForwardList<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Node<T> {
    fn try_new(element: T) -> Result<NonNull<Self>, AllocError> {
        try_box(Node {
            link: Link { next: None },
            element,
        })
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

// private methods
impl<T> ForwardList<T> {
    /// Removes and returns the node at the front of the list.
    #[inline]
    fn pop_front_node(&mut self) -> Option<Box<Node<T>>> {
        unsafe { self.unlink_after(Position::BeforeBegin) }
    }

    /// Get the link stored at `pos`. Returns `None` for the past-the-end
    /// position.
    ///
    /// # Safety
    ///
    /// `pos` must be the before-begin position or a node of this list.
    unsafe fn link_mut(&mut self, pos: Position<T>) -> Option<&mut Link<T>> {
        match pos {
            Position::BeforeBegin => Some(&mut self.head),
            Position::Node(node) => Some(&mut (*node.as_ptr()).link),
            Position::End => None,
        }
    }

    /// Links `node` immediately after `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be the before-begin position or a node of this list.
    /// `node` must be a detached node obtained from `Node::try_new`.
    pub(crate) unsafe fn splice_after(&mut self, pos: Position<T>, node: NonNull<Node<T>>) {
        let link = match self.link_mut(pos) {
            Some(link) => link,
            None => unreachable!("splice after the past-the-end position"),
        };
        (*node.as_ptr()).link.next = link.next.replace(node);
        self.len += 1;
    }

    /// Unlinks and returns the node immediately after `pos`, if any.
    ///
    /// # Safety
    ///
    /// `pos` must be the before-begin position, a node of this list, or the
    /// past-the-end position.
    pub(crate) unsafe fn unlink_after(&mut self, pos: Position<T>) -> Option<Box<Node<T>>> {
        let link = self.link_mut(pos)?;
        let node = Box::from_raw(link.next?.as_ptr());
        link.next = node.link.next;
        self.len -= 1;
        Some(node)
    }

    /// Allocates a node for `element` and links it after `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be the before-begin position or a node of this list.
    pub(crate) unsafe fn try_insert_after_position(
        &mut self,
        pos: Position<T>,
        element: T,
    ) -> Result<Position<T>, AllocError> {
        let node = Node::try_new(element)?;
        self.splice_after(pos, node);
        Ok(Position::Node(node))
    }

    pub(crate) fn first_position(&self) -> Position<T> {
        Position::from_link(self.head.next)
    }

    /// Get the position following `pos`. The past-the-end position is its
    /// own successor.
    pub(crate) fn next_position(&self, pos: Position<T>) -> Position<T> {
        match pos {
            Position::BeforeBegin => self.first_position(),
            // A `Position::Node` only exists while a cursor borrows the list
            // owning the node.
            Position::Node(node) => Position::from_link(unsafe { (*node.as_ptr()).link.next }),
            Position::End => Position::End,
        }
    }

    /// Get the address identifying `pos`. The past-the-end position of every
    /// list maps to null.
    pub(crate) fn position_addr(&self, pos: Position<T>) -> *const () {
        match pos {
            Position::BeforeBegin => &self.head as *const Link<T> as *const (),
            Position::Node(node) => node.as_ptr() as *const (),
            Position::End => ptr::null(),
        }
    }
}

impl<T> Default for ForwardList<T> {
    /// Creates an empty `ForwardList<T>`.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ForwardList<T> {
    /// Creates an empty `ForwardList`.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let list: ForwardList<u32> = ForwardList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        ForwardList {
            head: Link { next: None },
            len: 0,
            marker: PhantomData,
        }
    }

    /// Builds a list holding the elements of `iter` in order, reporting
    /// allocation failure.
    ///
    /// On failure, the nodes built so far are released.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let list = ForwardList::try_from_iter(1..=3).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, AllocError> {
        let mut list = Self::new();
        let mut tail = Position::BeforeBegin;
        for element in iter {
            tail = unsafe { list.try_insert_after_position(tail, element)? };
        }
        Ok(list)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let list = ForwardList::from([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head.next,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut list = ForwardList::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(list, ForwardList::from([10, 11, 12]));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head.next,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Get a cursor at the before-begin position.
    ///
    /// The cursor is only meaningful as an anchor; it has no element.
    #[inline]
    pub fn before_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::BeforeBegin)
    }

    /// Get a cursor at the first element, or past-the-end if the list is
    /// empty.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.first_position())
    }

    /// Get a cursor at the past-the-end position.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::End)
    }

    /// Get a mutable cursor at the before-begin position.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut list = ForwardList::from([2, 3]);
    /// list.before_begin_mut().insert_after(1);
    /// assert_eq!(list, ForwardList::from([1, 2, 3]));
    ///
    /// list.before_begin_mut().erase_after();
    /// assert_eq!(list, ForwardList::from([2, 3]));
    /// ```
    #[inline]
    pub fn before_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Position::BeforeBegin)
    }

    /// Get a mutable cursor at the first element, or past-the-end if the
    /// list is empty.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let pos = self.first_position();
        CursorMut::new(self, pos)
    }

    /// Get a mutable cursor at the past-the-end position.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Position::End)
    }

    /// Returns `true` if the `ForwardList` is empty.
    ///
    /// This operation should compute in O(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `ForwardList`.
    ///
    /// This operation should compute in O(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut dl = ForwardList::new();
    ///
    /// dl.push_front(2);
    /// assert_eq!(dl.len(), 1);
    ///
    /// dl.push_front(1);
    /// assert_eq!(dl.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `ForwardList`.
    ///
    /// The nodes are released one by one from the front, so this doesn't
    /// recurse however long the list is.
    ///
    /// This operation should compute in O(n) time.
    pub fn clear(&mut self) {
        let released = self.len;
        while let Some(_) = self.pop_front_node() {}
        if released > 0 {
            trace!("clear: released {} nodes", released);
        }
    }

    /// Exchanges the contents of `self` and `other` without touching any
    /// node.
    ///
    /// This operation should compute in O(1) time.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.head.next, &mut other.head.next);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns `true` if the `ForwardList` contains an element equal to the
    /// given value.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        unsafe { self.first_position().element() }
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        unsafe { self.first_position().element_mut() }
    }

    /// Adds an element first in the list.
    ///
    /// This operation should compute in O(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut dl = ForwardList::new();
    ///
    /// dl.push_front(2);
    /// assert_eq!(dl.front().unwrap(), &2);
    ///
    /// dl.push_front(1);
    /// assert_eq!(dl.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        or_abort(self.try_push_front(elt))
    }

    /// Adds an element first in the list, reporting allocation failure.
    ///
    /// The list is left unchanged on failure.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), AllocError> {
        unsafe { self.try_insert_after_position(Position::BeforeBegin, elt) }?;
        Ok(())
    }

    /// Removes the first element and returns it.
    ///
    /// This operation should compute in O(1) time.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::ForwardList;
    ///
    /// let mut d = ForwardList::from([3, 1]);
    /// assert_eq!(d.pop_front(), 3);
    /// assert_eq!(d.pop_front(), 1);
    /// assert!(d.is_empty());
    /// ```
    pub fn pop_front(&mut self) -> T {
        match self.pop_front_node() {
            Some(node) => node.into_element(),
            None => panic!("pop_front on an empty list"),
        }
    }

    /// Clones the list, reporting allocation failure.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_iter(self.iter().cloned())
    }

    /// Replaces the contents of `self` with a copy of `source`, reporting
    /// allocation failure.
    ///
    /// The copy is completed before `self` is touched, so `self` keeps its
    /// original contents if this fails (or if `T::clone` panics).
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

/// Exchanges the contents of two lists. See [`ForwardList::swap`].
#[inline]
pub fn swap<T>(lhs: &mut ForwardList<T>, rhs: &mut ForwardList<T>) {
    lhs.swap(rhs);
}

impl<T> Drop for ForwardList<T> {
    fn drop(&mut self) {
        while let Some(_) = self.pop_front_node() {}
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            None
        } else {
            self.head.map(|node| unsafe {
                // Need an unbound lifetime to get 'a
                let node = &*node.as_ptr();
                self.len -= 1;
                self.head = node.link.next;
                &node.element
            })
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            None
        } else {
            self.head.map(|node| unsafe {
                // Need an unbound lifetime to get 'a
                let node = &mut *node.as_ptr();
                self.len -= 1;
                self.head = node.link.next;
                &mut node.element
            })
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front_node().map(Node::into_element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        or_abort(Self::try_from_iter(iter))
    }
}

impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    fn from(array: [T; N]) -> Self {
        IntoIterator::into_iter(array).collect()
    }
}

impl<T> From<Vec<T>> for ForwardList<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for ForwardList<T> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<T> IntoIterator for ForwardList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the list into an iterator yielding elements by value.
    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }

    fn ne(&self, other: &Self) -> bool {
        self.len() != other.len() || self.iter().ne(other)
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

/// Shorter lists order first. Lists of the same length are compared
/// lexicographically.
impl<T: PartialOrd> PartialOrd for ForwardList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => self.iter().partial_cmp(other),
            ord => Some(ord),
        }
    }
}

impl<T: Ord> Ord for ForwardList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.iter().cmp(other))
    }
}

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Builds the copy before swapping it in, so `self` is left intact if
    /// `T::clone` panics.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: Hash> Hash for ForwardList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

// Ensure that `ForwardList` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: ForwardList<&'static str>) -> ForwardList<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

unsafe impl<T: Send> Send for ForwardList<T> {}

unsafe impl<T: Sync> Sync for ForwardList<T> {}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
