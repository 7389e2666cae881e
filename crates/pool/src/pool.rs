//! Block-growing object pool
//!
//! # Growth
//!
//! The pool never waits for a return. Taking from an empty pool allocates a
//! whole block and retries; if concurrent takers drain that block first, it
//! allocates another. Each round adds at least one item, so the loop ends as
//! soon as this caller wins a pop.
//!
//! # Teardown
//!
//! [`Pool::dispose`] (or dropping the pool) drains the available set through
//! the deallocate hook. Checked-out items are not touched; if they come back
//! later they go straight to the deallocate hook. A return that was already
//! past the disposed check when `dispose` ran can still land in the set;
//! dropping the pool sweeps such items through the deallocate hook too.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};
use crate::guard::Pooled;
use crate::hooks::{FnHooks, NoOpHooks, PoolHooks};
use crate::stats::PoolStats;
use crate::store::{AvailableSet, LockFreeSet};

type Allocator<T> = Arc<dyn Fn() -> T + Send + Sync>;

fn default_allocator<T: Default + 'static>() -> Allocator<T> {
    Arc::new(T::default)
}

/// Thread-safe pool of reusable items
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use nebula_pool::Pool;
///
/// let pool = Arc::new(Pool::with_allocator(8, 0, || Vec::<u8>::with_capacity(1024)));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let pool = Arc::clone(&pool);
///         thread::spawn(move || {
///             let mut buffer = pool.take();
///             buffer.extend_from_slice(b"Hello");
///             buffer.clear();
///             pool.return_item(buffer);
///         })
///     })
///     .collect();
///
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert!(pool.available() >= 4);
/// ```
pub struct Pool<T: Send + 'static, S: AvailableSet<T> = LockFreeSet<T>> {
    available: S,
    block_size: usize,
    allocator: Allocator<T>,
    hooks: Box<dyn PoolHooks<T>>,
    stats: PoolStats,
    disposed: AtomicBool,
}

impl<T: Send + Default + 'static> Pool<T> {
    /// Create pool using `T::default` for new items
    pub fn new(block_size: usize, initial_size: usize) -> Self {
        Self::from_parts(
            PoolConfig::new(block_size, initial_size),
            default_allocator(),
            Box::new(NoOpHooks),
            LockFreeSet::default(),
        )
    }
}

impl<T: Send + 'static> Pool<T> {
    /// Create pool with an allocate hook
    pub fn with_allocator<F>(block_size: usize, initial_size: usize, allocate: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_config(PoolConfig::new(block_size, initial_size), allocate)
    }

    /// Create pool from a configuration and an allocate hook
    pub fn from_config<F>(config: PoolConfig, allocate: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_parts(
            config,
            Arc::new(allocate),
            Box::new(NoOpHooks),
            LockFreeSet::default(),
        )
    }

    /// Start building a pool with hooks or a different store
    pub fn builder() -> PoolBuilder<T> {
        PoolBuilder::new()
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> Pool<T, S> {
    fn from_parts(
        config: PoolConfig,
        allocator: Allocator<T>,
        hooks: Box<dyn PoolHooks<T>>,
        available: S,
    ) -> Self {
        let pool = Self {
            available,
            block_size: config.block_size(),
            allocator,
            hooks,
            stats: PoolStats::default(),
            disposed: AtomicBool::new(false),
        };

        tracing::debug!(
            item = core::any::type_name::<T>(),
            block_size = pool.block_size,
            initial_size = config.initial_size,
            "Creating pool"
        );
        pool.allocate(config.initial_size);
        pool
    }

    /// Append `count` new items to the available set
    ///
    /// Ignored once the pool has been disposed.
    pub fn allocate(&self, count: usize) {
        if self.is_disposed() {
            tracing::warn!(count, "Ignoring allocate on a disposed pool");
            return;
        }
        if count == 0 {
            return;
        }

        for _ in 0..count {
            self.available.push((self.allocator)());
            self.stats.record_allocation(1);
        }

        tracing::debug!(
            count,
            available = self.available.len(),
            "Allocated pool items"
        );
    }

    /// Take an item, growing by one block whenever the pool is empty
    ///
    /// Never blocks and never fails. On a disposed pool the item is created
    /// directly by the allocate hook.
    pub fn take(&self) -> T {
        let mut item = loop {
            if let Some(item) = self.available.pop() {
                break item;
            }
            if self.is_disposed() {
                self.stats.record_allocation(1);
                break (self.allocator)();
            }

            self.stats.record_growth();
            tracing::debug!(block_size = self.block_size, "Pool empty, growing");
            self.allocate(self.block_size);
        };

        self.hooks.on_take(&mut item);
        self.stats.record_take();
        tracing::trace!(available = self.available.len(), "Took pool item");
        item
    }

    /// Take an item only if one is available, without growing
    pub fn try_take(&self) -> Option<T> {
        let mut item = self.available.pop()?;
        self.hooks.on_take(&mut item);
        self.stats.record_take();
        Some(item)
    }

    /// Take an item wrapped in a guard that gives it back on drop
    pub fn get(&self) -> PoolResult<Pooled<'_, T, S>> {
        if self.is_disposed() {
            return Err(PoolError::disposed());
        }
        Ok(Pooled::new(self.take(), self))
    }

    /// Give an item back
    ///
    /// `None` is a no-op: no hook runs and nothing is added. After
    /// [`dispose`](Self::dispose) the item is finalized by the deallocate
    /// hook instead of being stored.
    pub fn return_item(&self, item: impl Into<Option<T>>) {
        let Some(mut item) = item.into() else {
            return;
        };
        self.stats.record_return();

        if self.is_disposed() {
            tracing::debug!("Item returned to a disposed pool, deallocating");
            self.finalize(item);
            return;
        }

        self.hooks.on_return(&mut item);
        self.available.push(item);
        tracing::trace!(available = self.available.len(), "Returned pool item");
    }

    /// Drain the available set through the deallocate hook
    ///
    /// Only the first call drains; later calls do nothing.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let drained = self.drain();
        tracing::debug!(drained, "Pool disposed");
    }

    fn drain(&self) -> usize {
        let mut drained = 0usize;
        while let Some(item) = self.available.pop() {
            self.finalize(item);
            drained += 1;
        }
        drained
    }

    fn finalize(&self, item: T) {
        self.hooks.deallocate(item);
        self.stats.record_deallocation();
    }

    /// Number of items currently available
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Items allocated per growth event
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// True once [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> Drop for Pool<T, S> {
    fn drop(&mut self) {
        self.dispose();

        // Returns and allocations racing the first dispose may have pushed
        // after its drain; nothing can race us here.
        let late = self.drain();
        if late > 0 {
            tracing::debug!(late, "Finalized items added during dispose");
        }
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> std::fmt::Debug for Pool<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("available", &self.available.len())
            .field("block_size", &self.block_size)
            .field("disposed", &self.is_disposed())
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// PoolBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Pool`] with optional hooks and a choice of store
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use nebula_pool::{LockedSet, Pool};
///
/// let finalized = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&finalized);
///
/// let pool = Pool::builder()
///     .block_size(4)
///     .initial_size(2)
///     .allocate(String::new)
///     .on_return(|s: &mut String| s.clear())
///     .deallocate(move |_s: String| {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .with_store(LockedSet::default())
///     .try_build()
///     .unwrap();
///
/// let mut s = pool.take();
/// s.push_str("scratch");
/// pool.return_item(s);
/// assert_eq!(pool.available(), 2);
///
/// drop(pool);
/// assert_eq!(finalized.load(Ordering::SeqCst), 2);
/// ```
pub struct PoolBuilder<T, S = LockFreeSet<T>> {
    config: PoolConfig,
    allocator: Option<Allocator<T>>,
    fn_hooks: FnHooks<T>,
    hooks: Option<Box<dyn PoolHooks<T>>>,
    store: S,
}

impl<T: Send + 'static> PoolBuilder<T> {
    /// Builder with default configuration and the lock-free store
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            allocator: None,
            fn_hooks: FnHooks::new(),
            hooks: None,
            store: LockFreeSet::default(),
        }
    }
}

impl<T: Send + 'static> Default for PoolBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static, S> PoolBuilder<T, S> {
    /// Replace the whole configuration
    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Items allocated per growth event (zero becomes one)
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config = self.config.with_block_size(block_size);
        self
    }

    /// Items created while building
    pub fn initial_size(mut self, initial_size: usize) -> Self {
        self.config = self.config.with_initial_size(initial_size);
        self
    }

    /// Hook producing new items
    pub fn allocate<F>(mut self, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.allocator = Some(Arc::new(f));
        self
    }

    /// Hook finalizing items at teardown
    pub fn deallocate<F>(mut self, f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.fn_hooks = self.fn_hooks.with_deallocate(f);
        self
    }

    /// Hook run on every taken item
    pub fn on_take<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.fn_hooks = self.fn_hooks.with_on_take(f);
        self
    }

    /// Hook run on every returned item
    pub fn on_return<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.fn_hooks = self.fn_hooks.with_on_return(f);
        self
    }

    /// Use a [`PoolHooks`] implementation
    ///
    /// Takes precedence over closures set with `deallocate`, `on_take` and
    /// `on_return`.
    pub fn hooks<H: PoolHooks<T> + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    /// Use a different available-set implementation
    pub fn with_store<S2: AvailableSet<T>>(self, store: S2) -> PoolBuilder<T, S2> {
        PoolBuilder {
            config: self.config,
            allocator: self.allocator,
            fn_hooks: self.fn_hooks,
            hooks: self.hooks,
            store,
        }
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> PoolBuilder<T, S> {
    /// Build, failing if no allocate hook was given
    pub fn try_build(mut self) -> PoolResult<Pool<T, S>> {
        match self.allocator.take() {
            Some(allocator) => Ok(self.finish(allocator)),
            None => Err(PoolError::missing_allocator::<T>()),
        }
    }

    fn finish(self, allocator: Allocator<T>) -> Pool<T, S> {
        let hooks: Box<dyn PoolHooks<T>> = match self.hooks {
            Some(hooks) => {
                if !self.fn_hooks.is_empty() {
                    tracing::warn!("Custom pool hooks override closure hooks");
                }
                hooks
            },
            None => Box::new(self.fn_hooks),
        };
        Pool::from_parts(self.config, allocator, hooks, self.store)
    }
}

impl<T: Send + Default + 'static, S: AvailableSet<T>> PoolBuilder<T, S> {
    /// Build, falling back to `T::default` when no allocate hook was given
    pub fn build(mut self) -> Pool<T, S> {
        let allocator = self.allocator.take().unwrap_or_else(default_allocator);
        self.finish(allocator)
    }
}
