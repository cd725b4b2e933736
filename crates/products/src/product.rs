use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult, Entity, ProductId};

/// Catalog product: identifier, display name, unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Unit price as an exact decimal amount (e.g. `100.00`).
    price: Decimal,
}

impl Product {
    /// Build a product. The unit price must not be negative.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price must not be negative"));
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
