//! Fail-soft repositories over the local store.
//!
//! Every storage error stops here: it is logged and turned into a neutral
//! value (empty list, `false`, zero, `None`) so callers always get something
//! usable back.

pub mod cart;
pub mod customers;
pub mod orders;

pub use cart::CartRepository;
pub use customers::CustomerRepository;
pub use orders::OrderHistoryRepository;

use storefront_store::StoreError;

/// Unwrap `result`, logging and substituting `fallback` on error.
pub(crate) fn or_log<T>(result: Result<T, StoreError>, op: &'static str, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(op, error = %e, "local store operation failed");
            fallback
        }
    }
}
