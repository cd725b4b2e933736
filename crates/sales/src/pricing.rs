//! Order pricing.
//!
//! Missing references degrade to zero instead of failing: an unknown customer
//! prices the whole order at 0, an unknown product contributes nothing.
//!
//! Arithmetic is checked. The `try_` functions report an overflow as
//! [`DomainError::InvariantViolation`]; the plain ones log it and price the
//! order (or the offending line) at zero.

use std::borrow::Borrow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult, ProductId};
use tally_parties::Customer;
use tally_products::Product;

use crate::order::{Order, OrderItem};

/// Pre-discount breakdown of one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotal {
    pub product_id: ProductId,
    pub quantity: u32,
    /// `None` when the product is not in the catalog.
    pub unit_price: Option<Decimal>,
    pub line_total: Decimal,
}

/// Total price of `order` against the given catalog and customer list.
///
/// Lookups resolve to the first entry with a matching id. Never fails: an
/// amount that does not fit in a `Decimal` is logged and priced at zero. Use
/// [`try_calculate_total_price`] to see the overflow.
pub fn calculate_total_price(order: &Order, products: &[Product], customers: &[Customer]) -> Decimal {
    let customer = customers
        .iter()
        .find(|c| c.id_typed() == order.customer_id());

    price_with(order, customer, |id| products.iter().find(|p| p.id_typed() == id))
}

/// Like [`calculate_total_price`], but an arithmetic overflow is an
/// `InvariantViolation` instead of a zero total.
pub fn try_calculate_total_price(
    order: &Order,
    products: &[Product],
    customers: &[Customer],
) -> DomainResult<Decimal> {
    let customer = customers
        .iter()
        .find(|c| c.id_typed() == order.customer_id());

    try_price_with(order, customer, |id| products.iter().find(|p| p.id_typed() == id))
}

/// Per-line breakdown of `order` before any discount.
///
/// A line whose total overflows reports `line_total: 0`.
pub fn line_totals(order: &Order, products: &[Product]) -> Vec<LineTotal> {
    lines_with(order, |id| products.iter().find(|p| p.id_typed() == id))
}

pub(crate) fn price_with<C, P>(
    order: &Order,
    customer: Option<C>,
    find_product: impl FnMut(&ProductId) -> Option<P>,
) -> Decimal
where
    C: Borrow<Customer>,
    P: Borrow<Product>,
{
    try_price_with(order, customer, find_product).unwrap_or_else(|err| {
        tracing::warn!(customer = %order.customer_id(), %err, "order total not representable, priced at zero");
        Decimal::ZERO
    })
}

pub(crate) fn try_price_with<C, P>(
    order: &Order,
    customer: Option<C>,
    find_product: impl FnMut(&ProductId) -> Option<P>,
) -> DomainResult<Decimal>
where
    C: Borrow<Customer>,
    P: Borrow<Product>,
{
    let Some(customer) = customer else {
        tracing::debug!(customer = %order.customer_id(), "customer not found, order priced at zero");
        return Ok(Decimal::ZERO);
    };
    let customer: &Customer = customer.borrow();

    let subtotal = try_lines_with(order, find_product)?
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total))
        .ok_or_else(|| {
            DomainError::invariant(format!("order subtotal overflow (customer {})", customer.id_typed()))
        })?;

    let total = match customer.effective_discount() {
        Some(pct) => pct
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|fraction| Decimal::ONE.checked_sub(fraction))
            .and_then(|factor| subtotal.checked_mul(factor))
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "discounted total overflow (subtotal {subtotal}, discount {pct})"
                ))
            })?,
        None => subtotal,
    };

    tracing::debug!(
        customer = %customer.id_typed(),
        %subtotal,
        %total,
        "order priced"
    );

    Ok(total)
}

pub(crate) fn lines_with<P>(
    order: &Order,
    mut find_product: impl FnMut(&ProductId) -> Option<P>,
) -> Vec<LineTotal>
where
    P: Borrow<Product>,
{
    order
        .items()
        .iter()
        .map(|item| {
            let unit_price = unit_price_of(item, &mut find_product);
            let line_total = line_total(item, unit_price).unwrap_or_else(|err| {
                tracing::warn!(product = %item.product_id, %err, "line total not representable, reported as zero");
                Decimal::ZERO
            });
            LineTotal {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                unit_price,
                line_total,
            }
        })
        .collect()
}

pub(crate) fn try_lines_with<P>(
    order: &Order,
    mut find_product: impl FnMut(&ProductId) -> Option<P>,
) -> DomainResult<Vec<LineTotal>>
where
    P: Borrow<Product>,
{
    order
        .items()
        .iter()
        .map(|item| {
            let unit_price = unit_price_of(item, &mut find_product);
            Ok(LineTotal {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                unit_price,
                line_total: line_total(item, unit_price)?,
            })
        })
        .collect()
}

fn unit_price_of<P>(item: &OrderItem, find_product: &mut impl FnMut(&ProductId) -> Option<P>) -> Option<Decimal>
where
    P: Borrow<Product>,
{
    let unit_price = find_product(&item.product_id).map(|p| {
        let product: &Product = p.borrow();
        product.price()
    });
    if unit_price.is_none() {
        tracing::debug!(product = %item.product_id, "product not found, line skipped");
    }
    unit_price
}

fn line_total(item: &OrderItem, unit_price: Option<Decimal>) -> DomainResult<Decimal> {
    let Some(price) = unit_price else {
        return Ok(Decimal::ZERO);
    };

    price.checked_mul(Decimal::from(item.quantity)).ok_or_else(|| {
        DomainError::invariant(format!(
            "line total overflow (product {}, unit price {price}, quantity {})",
            item.product_id, item.quantity
        ))
    })
}
