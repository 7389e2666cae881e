//! # nebula-pool
//!
//! Thread-safe object pool for the Nebula ecosystem.
//!
//! A [`Pool`] keeps an unordered set of ready-made items. Taking from an
//! empty pool never waits: the pool allocates a whole block of new items and
//! retries. Items are finalized only when the pool itself is torn down.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_pool::prelude::*;
//!
//! // Grow four buffers at a time, start with none
//! let pool = Pool::<Vec<u8>>::builder()
//!     .block_size(4)
//!     .on_return(|buf: &mut Vec<u8>| buf.clear())
//!     .build();
//!
//! let mut buf = pool.take();
//! buf.extend_from_slice(b"payload");
//! pool.return_item(buf);
//! assert_eq!(pool.available(), 4);
//!
//! // Or let a guard give it back
//! {
//!     let mut buf = pool.get()?;
//!     buf.push(1);
//! }
//! assert_eq!(pool.available(), 4);
//! # Ok::<(), nebula_pool::PoolError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`store`]: the available set, lock-free ([`LockFreeSet`]) or
//!   mutex-guarded ([`LockedSet`])
//! - [`hooks`]: take/return/deallocate callbacks
//! - [`stats`]: lock-free operation counters
//! - Structured logging through `tracing`; no subscriber is installed here

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod guard;
pub mod hooks;
pub mod pool;
pub mod stats;
pub mod store;

pub use crate::config::PoolConfig;
pub use crate::error::{PoolError, PoolResult};
pub use crate::guard::Pooled;
pub use crate::hooks::{FnHooks, NoOpHooks, PoolHooks};
pub use crate::pool::{Pool, PoolBuilder};
pub use crate::stats::{PoolStats, StatsSnapshot};
pub use crate::store::{AvailableSet, LockFreeSet, LockedSet};

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::config::PoolConfig;
    pub use crate::error::{PoolError, PoolResult};
    pub use crate::guard::Pooled;
    pub use crate::hooks::PoolHooks;
    pub use crate::pool::{Pool, PoolBuilder};
    pub use crate::store::{AvailableSet, LockFreeSet, LockedSet};
}
