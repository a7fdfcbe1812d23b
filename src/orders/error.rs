//! Errors raised by the domain types themselves.

use super::{OrderId, Quantity};
use std::fmt;

/// Errors from operations on individual orders.
///
/// `Overfill` and `PriceAdjustment` indicate engine bugs when they surface
/// from inside the matching loop; the parse variants come from the script
/// token forms of `Side` and `OrderType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A fill was requested for more than the order's remaining quantity.
    Overfill {
        /// Order that was asked to fill.
        order_id: OrderId,
        /// Quantity requested.
        quantity: Quantity,
        /// Quantity actually remaining.
        remaining: Quantity,
    },

    /// A non-market order was asked to convert itself to GoodTillCancel.
    PriceAdjustment(OrderId),

    /// Unrecognised side token.
    UnknownSide(String),

    /// Unrecognised order type token.
    UnknownOrderType(String),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::Overfill {
                order_id,
                quantity,
                remaining,
            } => {
                write!(
                    f,
                    "Order ({}) cannot be filled with quantity ({}) greater than remaining quantity ({})",
                    order_id, quantity, remaining
                )
            }
            OrderError::PriceAdjustment(order_id) => {
                write!(
                    f,
                    "Order ({}) cannot have its price adjusted, only market orders can",
                    order_id
                )
            }
            OrderError::UnknownSide(token) => write!(f, "Unknown side: {}", token),
            OrderError::UnknownOrderType(token) => write!(f, "Unknown order type: {}", token),
        }
    }
}

impl std::error::Error for OrderError {}
