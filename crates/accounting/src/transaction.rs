use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tally_core::{AccountNumber, DomainError};

/// Transaction kind. Parsed from the exact upper-case names only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(TransactionKind::Deposit),
            "WITHDRAWAL" => Ok(TransactionKind::Withdrawal),
            other => Err(TransactionError::UnknownKind(other.to_string())),
        }
    }
}

/// Journal entry for one applied deposit or withdrawal (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub account_number: AccountNumber,
    /// Always positive; the direction is carried by `kind`.
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub recorded_at: DateTime<Utc>,
}

/// Why a transaction was rejected. Nothing is mutated on any of these paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("account {0} not found")]
    AccountNotFound(AccountNumber),

    #[error("amount is required")]
    MissingAmount,

    #[error("amount must be positive (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("unknown transaction kind {0:?}")]
    UnknownKind(String),

    #[error("insufficient funds (balance: {balance}, requested: {requested})")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("balance overflow (balance: {balance}, amount: {amount})")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

impl From<TransactionError> for DomainError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::AccountNotFound(number) => {
                DomainError::not_found(format!("account {number}"))
            }
            TransactionError::InsufficientFunds { .. } | TransactionError::BalanceOverflow { .. } => {
                DomainError::invariant(err.to_string())
            }
            TransactionError::MissingAmount
            | TransactionError::NonPositiveAmount(_)
            | TransactionError::UnknownKind(_) => DomainError::validation(err.to_string()),
        }
    }
}
