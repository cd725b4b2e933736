//! Parties domain module (customers).
//!
//! A customer carries the optional percentage discount the pricer applies to
//! every order placed under its identifier.

pub mod customer;

pub use customer::Customer;
pub use tally_core::CustomerId;
