//! Order book error types

use crate::orders::{OrderError, OrderId, Price, Quantity};
use std::fmt;

/// Errors that can occur within the order book.
///
/// Only caller errors surface here: malformed preconditions and the
/// order-level bugs wrapped from [`OrderError`]. Benign no-ops (unknown id,
/// duplicate id) and admission rejections return empty trades instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Error from an operation on an individual order.
    Order(OrderError),

    /// An order was submitted with zero quantity.
    InvalidQuantity {
        /// Offending order id.
        order_id: OrderId,
        /// Submitted quantity.
        quantity: Quantity,
    },

    /// A priced order carried the market sentinel price, or a market order
    /// carried a real price.
    InvalidPrice {
        /// Offending order id.
        order_id: OrderId,
        /// Submitted price.
        price: Price,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::Order(err) => write!(f, "Order error: {}", err),
            OrderBookError::InvalidQuantity { order_id, quantity } => {
                write!(f, "Invalid quantity {} for order {}", quantity, order_id)
            }
            OrderBookError::InvalidPrice { order_id, price } => {
                write!(f, "Invalid price {} for order {}", price, order_id)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

impl From<OrderError> for OrderBookError {
    fn from(err: OrderError) -> Self {
        OrderBookError::Order(err)
    }
}
