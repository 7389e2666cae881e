//! Error types for nebula-pool
//!
//! The core pool operations never fail: a degenerate block size is corrected,
//! an empty pool grows. Errors only surface from the fallible construction
//! path and from the RAII checkout on a disposed pool.

use thiserror::Error;

// ============================================================================
// Main Error Types
// ============================================================================

/// Pool errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("No allocate hook given for pool of `{type_name}` and no default constructor in use")]
    MissingAllocator { type_name: &'static str },

    #[error("Pool has been disposed")]
    Disposed,
}

impl PoolError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAllocator { .. } => "POOL:CONFIG:ALLOCATOR",
            Self::Disposed => "POOL:STATE:DISPOSED",
        }
    }

    /// Create missing allocator error for the pooled type `T`
    pub fn missing_allocator<T>() -> Self {
        Self::MissingAllocator {
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Create disposed error
    pub fn disposed() -> Self {
        tracing::warn!("Checkout attempted on a disposed pool");
        Self::Disposed
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for pool operations
pub type PoolResult<T> = core::result::Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_allocator_names_type() {
        let error = PoolError::missing_allocator::<Vec<u8>>();
        assert!(error.to_string().contains("Vec<u8>"));
        assert_eq!(error.code(), "POOL:CONFIG:ALLOCATOR");
    }

    #[test]
    fn test_disposed_code() {
        let error = PoolError::disposed();
        assert_eq!(error, PoolError::Disposed);
        assert_eq!(error.code(), "POOL:STATE:DISPOSED");
        assert!(!error.to_string().is_empty());
    }
}
