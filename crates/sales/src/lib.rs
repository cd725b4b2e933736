//! Sales orders and order pricing.
//!
//! An order stores only references (customer id, product ids, quantities).
//! Its total is derived on demand from the current catalog and customer data,
//! so it follows any price change made after the order was placed.

pub mod order;
pub mod pricing;
pub mod service;

pub use order::{Order, OrderItem};
pub use pricing::{LineTotal, calculate_total_price, line_totals, try_calculate_total_price};
pub use service::OrderService;
pub use tally_core::OrderId;
