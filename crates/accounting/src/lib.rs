//! Accounting module (account ledger).
//!
//! Validates and applies deposits/withdrawals against a store of accounts and
//! records every applied transaction in an append-only journal. Storage is
//! injected through the `tally_core::store` traits.

pub mod account;
pub mod ledger;
pub mod transaction;

pub use account::Account;
pub use ledger::Ledger;
pub use tally_core::AccountNumber;
pub use transaction::{Transaction, TransactionError, TransactionKind};
