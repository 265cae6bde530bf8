//! Exercises the allocation-failure paths with a global allocator that can be
//! told to fail after a given number of allocations on the current thread.
use forward_list::{AllocError, ForwardList};
use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    ptr,
};

struct FailingAlloc;

thread_local! {
    /// The number of allocations that may still succeed. `None` means
    /// unlimited.
    static BUDGET: Cell<Option<usize>> = Cell::new(None);

    /// The number of live `Tracked` values.
    static LIVE: Cell<isize> = Cell::new(0);
}

fn should_fail() -> bool {
    BUDGET
        .try_with(|budget| match budget.get() {
            Some(0) => true,
            Some(n) => {
                budget.set(Some(n - 1));
                false
            }
            None => false,
        })
        .unwrap_or(false)
}

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if should_fail() {
            ptr::null_mut()
        } else {
            System.alloc(layout)
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: FailingAlloc = FailingAlloc;

/// Run `f` allowing only `n` allocations on this thread.
fn with_budget<R>(n: usize, f: impl FnOnce() -> R) -> R {
    BUDGET.with(|b| b.set(Some(n)));
    let result = f();
    BUDGET.with(|b| b.set(None));
    result
}

#[derive(Debug, PartialEq)]
struct Tracked(u32);

impl Tracked {
    fn new(x: u32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Tracked(x)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

fn live() -> isize {
    LIVE.with(|live| live.get())
}

fn to_vec<T: Clone>(list: &ForwardList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn push_front_failure_leaves_list_intact() {
    let mut list = ForwardList::from([1, 2, 3]);

    let result = with_budget(0, || list.try_push_front(0));
    match result {
        Err(AllocError::OutOfMemory(layout)) => assert!(layout.size() > 0),
        Ok(()) => panic!("allocation unexpectedly succeeded"),
    }
    assert_eq!(list.len(), 3);
    assert_eq!(to_vec(&list), [1, 2, 3]);

    with_budget(1, || list.try_push_front(0)).unwrap();
    assert_eq!(to_vec(&list), [0, 1, 2, 3]);
}

#[test]
fn insert_after_failure_leaves_list_intact() {
    let mut list = ForwardList::from([1, 2, 3]);

    let result = with_budget(0, || list.begin_mut().try_insert_after(9).map(|_| ()));
    assert!(result.is_err());
    assert_eq!(list.len(), 3);
    assert_eq!(to_vec(&list), [1, 2, 3]);

    let result = with_budget(0, || list.before_begin_mut().try_insert_after(9).map(|_| ()));
    assert!(result.is_err());
    assert_eq!(to_vec(&list), [1, 2, 3]);
}

#[test]
fn from_iter_failure_releases_partial_chain() {
    assert_eq!(live(), 0);

    let result = with_budget(3, || ForwardList::try_from_iter((0..10).map(Tracked::new)));
    assert!(result.is_err());
    assert_eq!(live(), 0);

    let list = with_budget(10, || ForwardList::try_from_iter((0..10).map(Tracked::new)))
        .unwrap();
    assert_eq!(live(), 10);
    assert_eq!(list.len(), 10);
    drop(list);
    assert_eq!(live(), 0);
}

#[test]
fn clone_failure_leaves_source_intact() {
    let source = ForwardList::from([1, 2, 3, 4, 5]);

    let result = with_budget(2, || source.try_clone());
    assert!(result.is_err());
    assert_eq!(to_vec(&source), [1, 2, 3, 4, 5]);

    let copy = with_budget(5, || source.try_clone()).unwrap();
    assert_eq!(copy, source);
}

#[test]
fn clone_from_failure_leaves_target_intact() {
    let source = ForwardList::from([1, 2, 3]);
    let mut target = ForwardList::from([9, 9]);

    let result = with_budget(1, || target.try_clone_from(&source));
    assert!(result.is_err());
    assert_eq!(target.len(), 2);
    assert_eq!(to_vec(&target), [9, 9]);

    with_budget(3, || target.try_clone_from(&source)).unwrap();
    assert_eq!(target, source);
}

#[test]
fn error_reports_layout() {
    let mut list = ForwardList::<u64>::new();
    let err = with_budget(0, || list.try_push_front(1)).unwrap_err();
    assert!(err.layout().size() >= std::mem::size_of::<u64>());
    assert!(err.to_string().starts_with("memory allocation of "));
    assert!(list.is_empty());
}
