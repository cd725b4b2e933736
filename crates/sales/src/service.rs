use rust_decimal::Decimal;

use tally_core::{CustomerId, DomainError, DomainResult, InMemoryStore, OrderId, Store};
use tally_parties::Customer;
use tally_products::Product;

use crate::order::{Order, OrderItem};
use crate::pricing::{self, LineTotal};

/// Order creation and pricing over injected product/customer stores.
///
/// Totals are computed from whatever the stores hold at call time.
#[derive(Debug)]
pub struct OrderService<P = InMemoryStore<Product>, C = InMemoryStore<Customer>> {
    products: P,
    customers: C,
}

impl OrderService {
    /// Service over in-memory stores seeded with the given reference data.
    pub fn in_memory(
        products: impl IntoIterator<Item = Product>,
        customers: impl IntoIterator<Item = Customer>,
    ) -> Self {
        Self::new(products.into_iter().collect(), customers.into_iter().collect())
    }
}

impl<P, C> OrderService<P, C>
where
    P: Store<Product>,
    C: Store<Customer>,
{
    pub fn new(products: P, customers: C) -> Self {
        Self {
            products,
            customers,
        }
    }

    pub fn products(&self) -> &P {
        &self.products
    }

    pub fn customers(&self) -> &C {
        &self.customers
    }

    /// Build an order and assign it a fresh id.
    ///
    /// Every quantity must be positive. Customer and product references are
    /// not checked here; pricing treats missing ones as zero.
    pub fn create_order(
        &self,
        customer_id: impl Into<CustomerId>,
        items: Vec<OrderItem>,
    ) -> DomainResult<Order> {
        if let Some(item) = items.iter().find(|i| i.quantity == 0) {
            return Err(DomainError::validation(format!(
                "quantity must be positive (product {})",
                item.product_id
            )));
        }

        let mut order = Order::new(customer_id, items);
        let id = OrderId::generate();
        tracing::info!(order = %id, customer = %order.customer_id(), lines = order.items().len(), "order created");
        order.assign_id(id);

        Ok(order)
    }

    /// Total price of `order` against the current store contents.
    pub fn calculate_total_price(&self, order: &Order) -> Decimal {
        let customer = self.customers.find(order.customer_id());
        pricing::price_with(order, customer, |id| self.products.find(id))
    }

    /// Like [`OrderService::calculate_total_price`], but an arithmetic
    /// overflow is an `InvariantViolation` instead of a zero total.
    pub fn try_calculate_total_price(&self, order: &Order) -> DomainResult<Decimal> {
        let customer = self.customers.find(order.customer_id());
        pricing::try_price_with(order, customer, |id| self.products.find(id))
    }

    /// Pre-discount breakdown of `order` against the current catalog.
    pub fn line_totals(&self, order: &Order) -> Vec<LineTotal> {
        pricing::lines_with(order, |id| self.products.find(id))
    }
}
