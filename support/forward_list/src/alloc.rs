//! Node allocation that reports failure instead of aborting.
use quick_error::quick_error;
use std::{alloc::Layout, ptr::NonNull};

quick_error! {
    /// The global allocator could not provide memory for a new node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum AllocError {
        /// An allocation request for the given layout returned null.
        OutOfMemory(layout: Layout) {
            display("memory allocation of {} bytes failed", layout.size())
        }
    }
}

impl AllocError {
    /// Get the layout of the allocation request that failed.
    pub fn layout(&self) -> Layout {
        match *self {
            AllocError::OutOfMemory(layout) => layout,
        }
    }
}

/// Move `value` into a block obtained from the global allocator.
///
/// The returned pointer can be released by `Box::from_raw`. On failure,
/// `value` is dropped.
///
/// `T` must not be zero-sized. List nodes always contain a link pointer.
pub(crate) fn try_box<T>(value: T) -> Result<NonNull<T>, AllocError> {
    let layout = Layout::new::<T>();
    debug_assert_ne!(layout.size(), 0);

    match NonNull::new(unsafe { std::alloc::alloc(layout) } as *mut T) {
        Some(ptr) => {
            unsafe { ptr.as_ptr().write(value) };
            Ok(ptr)
        }
        None => {
            log::debug!("failed to allocate a node ({:?})", layout);
            Err(AllocError::OutOfMemory(layout))
        }
    }
}

/// Unwrap the result of a fallible allocation, diverting to
/// `handle_alloc_error` like std collections do.
#[inline]
pub(crate) fn or_abort<T>(result: Result<T, AllocError>) -> T {
    match result {
        Ok(x) => x,
        Err(e) => std::alloc::handle_alloc_error(e.layout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_roundtrip() {
        let ptr = try_box(String::from("node")).unwrap();
        let value = unsafe { *Box::from_raw(ptr.as_ptr()) };
        assert_eq!(value, "node");
    }

    #[test]
    fn node_of_unit() {
        // The element is zero-sized, but the node is not
        let ptr = try_box((std::ptr::null::<u8>(), ())).unwrap();
        let (link, ()) = unsafe { *Box::from_raw(ptr.as_ptr()) };
        assert!(link.is_null());
    }

    #[test]
    fn error_display() {
        let e = AllocError::OutOfMemory(Layout::new::<[u64; 4]>());
        assert_eq!(e.to_string(), "memory allocation of 32 bytes failed");
        assert_eq!(e.layout().size(), 32);
    }
}
