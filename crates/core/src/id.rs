//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers arrive from the routing layer as plain strings ("12345", "P1"),
//! so they are string newtypes rather than UUIDs. `FromStr` rejects blank
//! input; `new` trusts the caller.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Account number (not guaranteed unique, see `Ledger::create_account`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

/// Identifier of an order (assigned after the order is built).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: must not be blank", $name)));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_string_newtype!(AccountNumber, "AccountNumber");
impl_string_newtype!(ProductId, "ProductId");
impl_string_newtype!(CustomerId, "CustomerId");
impl_string_newtype!(OrderId, "OrderId");

impl OrderId {
    /// Mint a fresh order identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifier_is_rejected() {
        let err = "  ".parse::<AccountNumber>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) if msg.contains("AccountNumber") => {}
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn parsed_identifier_keeps_original_text() {
        let id: ProductId = "P1".parse().unwrap();
        assert_eq!(id.as_str(), "P1");
        assert_eq!(id.to_string(), "P1");
    }

    #[test]
    fn identifiers_serialize_transparently() {
        let json = serde_json::to_string(&CustomerId::new("C1")).unwrap();
        assert_eq!(json, "\"C1\"");
    }

    #[test]
    fn generated_order_ids_are_distinct() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }
}
