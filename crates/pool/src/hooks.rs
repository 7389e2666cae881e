//! Lifecycle hooks invoked by the pool.
//!
//! Hooks are opaque to the pool: it never inspects what they do, only calls
//! them at fixed points. A panicking hook is not caught; the panic reaches
//! the caller of the operation that triggered it and any partially completed
//! growth or drain is left as is.

use std::sync::Arc;

// ---------------------------------------------------------------------------
// PoolHooks trait
// ---------------------------------------------------------------------------

/// Pool lifecycle callbacks
///
/// Every method has a no-op default, so implementors override only what they
/// need.
pub trait PoolHooks<T>: Send + Sync {
    /// Called on an item as it leaves the available set
    fn on_take(&self, _item: &mut T) {}

    /// Called on an item before it re-enters the available set
    fn on_return(&self, _item: &mut T) {}

    /// Called once for every item drained at teardown
    fn deallocate(&self, item: T) {
        drop(item);
    }
}

/// Default no-op hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHooks;

impl<T> PoolHooks<T> for NoOpHooks {}

// ---------------------------------------------------------------------------
// FnHooks
// ---------------------------------------------------------------------------

type ItemFn<T> = Arc<dyn Fn(&mut T) + Send + Sync>;
type DeallocateFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Hook set assembled from optional closures.
///
/// Missing closures behave like [`NoOpHooks`].
pub struct FnHooks<T> {
    on_take: Option<ItemFn<T>>,
    on_return: Option<ItemFn<T>>,
    deallocate: Option<DeallocateFn<T>>,
}

impl<T> Default for FnHooks<T> {
    fn default() -> Self {
        Self {
            on_take: None,
            on_return: None,
            deallocate: None,
        }
    }
}

impl<T> Clone for FnHooks<T> {
    fn clone(&self) -> Self {
        Self {
            on_take: self.on_take.clone(),
            on_return: self.on_return.clone(),
            deallocate: self.deallocate.clone(),
        }
    }
}

impl<T> std::fmt::Debug for FnHooks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHooks")
            .field("on_take", &self.on_take.is_some())
            .field("on_return", &self.on_return.is_some())
            .field("deallocate", &self.deallocate.is_some())
            .finish()
    }
}

impl<T> FnHooks<T> {
    /// Empty hook set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the take hook
    #[must_use = "builder methods must be chained or built"]
    pub fn with_on_take<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_take = Some(Arc::new(f));
        self
    }

    /// Set the return hook
    #[must_use = "builder methods must be chained or built"]
    pub fn with_on_return<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_return = Some(Arc::new(f));
        self
    }

    /// Set the deallocate hook
    #[must_use = "builder methods must be chained or built"]
    pub fn with_deallocate<F>(mut self, f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.deallocate = Some(Arc::new(f));
        self
    }

    /// True when no closure is set
    pub fn is_empty(&self) -> bool {
        self.on_take.is_none() && self.on_return.is_none() && self.deallocate.is_none()
    }
}

impl<T> PoolHooks<T> for FnHooks<T> {
    fn on_take(&self, item: &mut T) {
        if let Some(f) = &self.on_take {
            f(item);
        }
    }

    fn on_return(&self, item: &mut T) {
        if let Some(f) = &self.on_return {
            f(item);
        }
    }

    fn deallocate(&self, item: T) {
        match &self.deallocate {
            Some(f) => f(item),
            None => drop(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_noop_hooks_leave_item_untouched() {
        let hooks = NoOpHooks;
        let mut item = 7u32;
        PoolHooks::on_take(&hooks, &mut item);
        PoolHooks::on_return(&hooks, &mut item);
        assert_eq!(item, 7);
        PoolHooks::deallocate(&hooks, item);
    }

    #[test]
    fn test_fn_hooks_dispatch() {
        let deallocated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&deallocated);

        let hooks = FnHooks::<u32>::new()
            .with_on_take(|v: &mut u32| *v += 1)
            .with_on_return(|v: &mut u32| *v *= 10)
            .with_deallocate(move |v: u32| {
                counter.fetch_add(v as usize, Ordering::SeqCst);
            });
        assert!(!hooks.is_empty());

        let mut item = 1u32;
        hooks.on_take(&mut item);
        assert_eq!(item, 2);
        hooks.on_return(&mut item);
        assert_eq!(item, 20);
        hooks.deallocate(item);
        assert_eq!(deallocated.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_empty_fn_hooks() {
        let hooks = FnHooks::<String>::new();
        assert!(hooks.is_empty());

        let mut s = String::from("keep");
        hooks.on_take(&mut s);
        hooks.on_return(&mut s);
        assert_eq!(s, "keep");
    }
}
