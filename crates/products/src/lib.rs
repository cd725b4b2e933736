//! Products domain module (catalog reference data).
//!
//! Products are immutable once built; the pricer reads them, nothing in this
//! workspace mutates them.

pub mod product;

pub use product::Product;
pub use tally_core::ProductId;
