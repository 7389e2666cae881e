//! Pool configuration

use core::num::NonZeroUsize;

/// Block size used by [`PoolConfig::default`].
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Growth and pre-population settings for a [`Pool`](crate::Pool).
///
/// A block size of zero is never an error: it is corrected to one, so every
/// growth event adds at least one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    block_size: NonZeroUsize,
    /// Items created synchronously when the pool is built
    pub initial_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE, 0)
    }
}

impl PoolConfig {
    /// Create a configuration, coercing a zero block size to one
    pub fn new(block_size: usize, initial_size: usize) -> Self {
        Self {
            block_size: coerce_block_size(block_size),
            initial_size,
        }
    }

    /// Number of items allocated per growth event
    pub fn block_size(&self) -> usize {
        self.block_size.get()
    }

    /// Set block size (zero becomes one)
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = coerce_block_size(block_size);
        self
    }

    /// Set initial population
    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }
}

fn coerce_block_size(block_size: usize) -> NonZeroUsize {
    NonZeroUsize::new(block_size).unwrap_or(NonZeroUsize::MIN)
}
