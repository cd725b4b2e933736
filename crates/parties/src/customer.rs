use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{CustomerId, DomainError, DomainResult, Entity};

const MAX_DISCOUNT_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Customer: identifier, name, optional discount percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    /// Percentage in [0, 100]. `None` means no discount.
    discount: Option<Decimal>,
}

impl Customer {
    /// Build a customer, validating the discount range.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        discount: Option<Decimal>,
    ) -> DomainResult<Self> {
        if let Some(pct) = discount {
            if pct < Decimal::ZERO || pct > MAX_DISCOUNT_PERCENT {
                return Err(DomainError::validation(format!(
                    "discount must be between 0 and 100 percent (got {pct})"
                )));
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            discount,
        })
    }

    pub fn id_typed(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    /// Discount that actually changes a price: present and strictly positive.
    pub fn effective_discount(&self) -> Option<Decimal> {
        self.discount.filter(|pct| *pct > Decimal::ZERO)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
