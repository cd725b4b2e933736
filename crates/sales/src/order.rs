use serde::{Deserialize, Serialize};

use tally_core::{CustomerId, OrderId, ProductId};

/// Order line: product reference and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Customer order. The id is assigned after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: Option<OrderId>,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(customer_id: impl Into<CustomerId>, items: Vec<OrderItem>) -> Self {
        Self {
            id: None,
            customer_id: customer_id.into(),
            items,
        }
    }

    pub fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }

    pub fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_has_no_id_until_assigned() {
        let mut order = Order::new("C1", vec![OrderItem::new("P1", 2)]);
        assert!(order.id().is_none());

        order.assign_id(OrderId::new("O-1"));
        assert_eq!(order.id().map(|id| id.as_str()), Some("O-1"));
    }

    #[test]
    fn items_keep_their_order() {
        let order = Order::new(
            "C1",
            vec![OrderItem::new("P2", 1), OrderItem::new("P1", 3)],
        );
        let ids: Vec<_> = order.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P2", "P1"]);
        assert_eq!(order.customer_id().as_str(), "C1");
    }
}
