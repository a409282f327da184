//! # storefront-store
//!
//! Local-first storage for the storefront client, backed by SQLite.
//!
//! Three tables live here: the shopping cart, the single "last customer"
//! record used for auto-fill, and the history of orders placed from this
//! device. The crate exposes a [`Database`] handle that serialises access to
//! one `rusqlite::Connection` and provides typed, fallible CRUD helpers for
//! each table. Callers that want fail-soft behaviour wrap these helpers.

pub mod cart;
pub mod customers;
pub mod database;
pub mod migrations;
pub mod models;
pub mod orders;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
