//! Storage for the available set.
//!
//! The pool needs insert and extract-any, nothing more: no ordering, no
//! lookup. Both backends guarantee that a popped item is handed to exactly
//! one caller.

use crossbeam_queue::SegQueue;
use parking_lot::Mutex;

/// Concurrent unordered multiset of available items
pub trait AvailableSet<T>: Send + Sync {
    /// Insert an item
    fn push(&self, item: T);

    /// Atomically remove any item
    fn pop(&self) -> Option<T>;

    /// Number of items currently held
    ///
    /// Only a snapshot under concurrent use.
    fn len(&self) -> usize;

    /// True when no item is held
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// LockFreeSet
// ---------------------------------------------------------------------------

/// Lock-free available set backed by a segmented queue
pub struct LockFreeSet<T> {
    queue: SegQueue<T>,
}

impl<T> Default for LockFreeSet<T> {
    fn default() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }
}

impl<T> std::fmt::Debug for LockFreeSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockFreeSet")
            .field("len", &self.queue.len())
            .finish()
    }
}

impl<T: Send> AvailableSet<T> for LockFreeSet<T> {
    fn push(&self, item: T) {
        self.queue.push(item);
    }

    fn pop(&self) -> Option<T> {
        self.queue.pop()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LockedSet
// ---------------------------------------------------------------------------

/// Mutex-guarded available set; the lock is held for a single push or pop
pub struct LockedSet<T> {
    items: Mutex<Vec<T>>,
}

impl<T> LockedSet<T> {
    /// Create with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
        }
    }
}

impl<T> Default for LockedSet<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> std::fmt::Debug for LockedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedSet")
            .field("len", &self.items.lock().len())
            .finish()
    }
}

impl<T: Send> AvailableSet<T> for LockedSet<T> {
    fn push(&self, item: T) {
        self.items.lock().push(item);
    }

    fn pop(&self) -> Option<T> {
        self.items.lock().pop()
    }

    fn len(&self) -> usize {
        self.items.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn exercise<S: AvailableSet<u32> + Default>() {
        let set = S::default();
        assert!(set.is_empty());

        set.push(1);
        set.push(2);
        assert_eq!(set.len(), 2);

        let mut popped = vec![set.pop().unwrap(), set.pop().unwrap()];
        popped.sort_unstable();
        assert_eq!(popped, vec![1, 2]);
        assert!(set.pop().is_none());
        assert!(set.is_empty());
    }

    fn no_item_popped_twice<S: AvailableSet<u32> + Default + 'static>() {
        let set = Arc::new(S::default());
        for i in 0..4_000 {
            set.push(i);
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(item) = set.pop() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        let mut all = HashSet::new();
        for h in handles {
            for item in h.join().unwrap() {
                assert!(all.insert(item), "item {item} popped twice");
            }
        }
        assert_eq!(all.len(), 4_000);
    }

    #[test]
    fn test_lock_free_set() {
        exercise::<LockFreeSet<u32>>();
    }

    #[test]
    fn test_locked_set() {
        exercise::<LockedSet<u32>>();
    }

    #[test]
    fn test_lock_free_set_concurrent_pop() {
        no_item_popped_twice::<LockFreeSet<u32>>();
    }

    #[test]
    fn test_locked_set_concurrent_pop() {
        no_item_popped_twice::<LockedSet<u32>>();
    }

    #[test]
    fn test_locked_set_with_capacity() {
        let set = LockedSet::<String>::with_capacity(8);
        assert!(set.is_empty());
        set.push("a".to_string());
        assert_eq!(set.len(), 1);
    }
}
