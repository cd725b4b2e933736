//! `tally-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the ledger and the
//! pricer: errors, identifiers, the entity trait and the record store
//! abstraction (plus in-memory implementations of it).

pub mod entity;
pub mod error;
pub mod id;
pub mod store;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountNumber, CustomerId, OrderId, ProductId};
pub use store::{InMemoryJournal, InMemoryStore, Journal, Store};
