//! Provides a singly-linked list with a before-begin sentinel.
//!
//! Elements are inserted and erased *after* a position, which is expressed
//! with cursors. The before-begin cursor makes the front of the list just
//! another "after" position:
//!
//! ```
//! use forward_list::ForwardList;
//!
//! let mut list = ForwardList::from([1, 2, 3]);
//! list.push_front(0);
//! list.before_begin_mut().erase_after();
//! list.begin_mut().insert_after(9);
//! assert_eq!(list.pop_front(), 1);
//! assert_eq!(list, ForwardList::from([9, 2, 3]));
//! ```
mod alloc;
pub mod cursor;
pub mod list;

pub use crate::{
    alloc::AllocError,
    cursor::{Cursor, CursorMut},
    list::{swap, ForwardList, IntoIter, Iter, IterMut},
};
