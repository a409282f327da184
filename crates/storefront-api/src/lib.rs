//! HTTP client for the remote catalog and order API.
//!
//! [`RemoteClient`] offers fallible `try_*` calls returning [`ApiError`], and
//! implements [`StorefrontApi`], the fail-soft surface the rest of the client
//! uses: every failure is logged and comes back as `None` or an empty list.

pub mod client;
pub mod error;
pub mod service;

pub use client::RemoteClient;
pub use error::ApiError;
pub use service::StorefrontApi;
