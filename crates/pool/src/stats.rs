//! Statistics tracking for object pools

use core::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters for pool operations
///
/// Counters only ever increase. Under concurrent use a [`snapshot`] is not a
/// single consistent cut, each field is read independently.
///
/// [`snapshot`]: PoolStats::snapshot
#[derive(Debug, Default)]
pub struct PoolStats {
    pub(crate) allocated: AtomicU64,
    pub(crate) taken: AtomicU64,
    pub(crate) returned: AtomicU64,
    pub(crate) deallocated: AtomicU64,
    pub(crate) growths: AtomicU64,
}

impl PoolStats {
    /// Record `count` newly created items
    pub(crate) fn record_allocation(&self, count: usize) {
        self.allocated.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record an item leaving the available set
    pub(crate) fn record_take(&self) {
        self.taken.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an item given back by a caller, whether stored or finalized
    pub(crate) fn record_return(&self) {
        self.returned.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an item handed to the deallocate hook
    pub(crate) fn record_deallocation(&self) {
        self.deallocated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a growth event triggered by an empty take
    pub(crate) fn record_growth(&self) {
        self.growths.fetch_add(1, Ordering::Relaxed);
    }

    /// Items created over the pool's lifetime
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Successful takes
    pub fn taken(&self) -> u64 {
        self.taken.load(Ordering::Relaxed)
    }

    /// Items given back (absent returns are not counted)
    pub fn returned(&self) -> u64 {
        self.returned.load(Ordering::Relaxed)
    }

    /// Items passed to the deallocate hook
    pub fn deallocated(&self) -> u64 {
        self.deallocated.load(Ordering::Relaxed)
    }

    /// Growth events caused by taking from an empty pool
    pub fn growths(&self) -> u64 {
        self.growths.load(Ordering::Relaxed)
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            allocated: self.allocated(),
            taken: self.taken(),
            returned: self.returned(),
            deallocated: self.deallocated(),
            growths: self.growths(),
        }
    }
}

/// Point-in-time copy of [`PoolStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Items created
    pub allocated: u64,
    /// Successful takes
    pub taken: u64,
    /// Items given back
    pub returned: u64,
    /// Items finalized
    pub deallocated: u64,
    /// Growth events
    pub growths: u64,
}

impl StatsSnapshot {
    /// Items taken and not given back
    ///
    /// Detached guards and items dropped by their holder stay counted here.
    pub fn outstanding(&self) -> u64 {
        self.taken.saturating_sub(self.returned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = PoolStats::default();
        stats.record_allocation(4);
        stats.record_growth();
        stats.record_take();
        stats.record_take();
        stats.record_return();
        stats.record_deallocation();

        let snap = stats.snapshot();
        assert_eq!(snap.allocated, 4);
        assert_eq!(snap.growths, 1);
        assert_eq!(snap.taken, 2);
        assert_eq!(snap.returned, 1);
        assert_eq!(snap.deallocated, 1);
        assert_eq!(snap.outstanding(), 1);
    }

    #[test]
    fn test_outstanding_never_underflows() {
        let snap = StatsSnapshot {
            returned: 3,
            ..Default::default()
        };
        assert_eq!(snap.outstanding(), 0);
    }
}
