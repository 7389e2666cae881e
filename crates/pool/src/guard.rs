//! RAII wrapper for checked-out items

use core::ops::{Deref, DerefMut};

use crate::pool::Pool;
use crate::store::{AvailableSet, LockFreeSet};

/// Item taken from a [`Pool`] that is given back when dropped
///
/// # Example
/// ```
/// use nebula_pool::Pool;
///
/// let pool = Pool::<String>::new(2, 0);
/// {
///     let mut s = pool.get().unwrap();
///     s.push_str("temporary");
/// }
/// assert_eq!(pool.available(), 2);
/// ```
pub struct Pooled<'a, T: Send + 'static, S: AvailableSet<T> = LockFreeSet<T>> {
    // Some until drop or detach
    item: Option<T>,
    pool: &'a Pool<T, S>,
}

impl<'a, T: Send + 'static, S: AvailableSet<T>> Pooled<'a, T, S> {
    pub(crate) fn new(item: T, pool: &'a Pool<T, S>) -> Self {
        Self {
            item: Some(item),
            pool,
        }
    }

    /// Keep the item; it will not be given back to the pool
    pub fn detach(mut self) -> T {
        self.item
            .take()
            .expect("pooled item is present until drop or detach")
    }

    /// Pool this item came from
    pub fn pool(&self) -> &'a Pool<T, S> {
        self.pool
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> Deref for Pooled<'_, T, S> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.item
            .as_ref()
            .expect("pooled item is present until drop or detach")
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> DerefMut for Pooled<'_, T, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.item
            .as_mut()
            .expect("pooled item is present until drop or detach")
    }
}

impl<T: Send + 'static, S: AvailableSet<T>> Drop for Pooled<'_, T, S> {
    fn drop(&mut self) {
        self.pool.return_item(self.item.take());
    }
}

impl<T, S> std::fmt::Debug for Pooled<'_, T, S>
where
    T: Send + std::fmt::Debug + 'static,
    S: AvailableSet<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pooled").field("item", &self.item).finish()
    }
}
