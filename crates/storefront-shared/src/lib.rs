//! Types shared between the storefront crates: the remote API's wire
//! format, a handful of constants, and the catalog search helper.

pub mod catalog;
pub mod constants;
pub mod types;

pub use catalog::filter_products;
pub use types::*;
