//! Orders and order modification requests.

use super::error::OrderError;
use super::{OrderId, OrderType, Price, Quantity, Side, INVALID_PRICE};

/// A single limit or market order.
///
/// Tracks identity, side, price and the quantity lifecycle from
/// `initial_quantity` down to `remaining_quantity` as fills are applied.
/// The engine owns every live order exclusively; callers only ever see
/// copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    /// Limit price, or [`INVALID_PRICE`] while the order is still a market
    /// order awaiting conversion.
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Creates a priced order.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Creates a market order. Its price is the [`INVALID_PRICE`] sentinel
    /// until the engine converts it against the opposite book.
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, INVALID_PRICE, quantity)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity executed so far.
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// True once the order has no remaining quantity.
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Applies a partial or full execution.
    ///
    /// Filling past the remaining quantity is an engine bug and surfaces as
    /// [`OrderError::Overfill`].
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderError> {
        if quantity > self.remaining_quantity {
            return Err(OrderError::Overfill {
                order_id: self.id,
                quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }

    /// Rewrites a market order in place as GoodTillCancel at `price`.
    ///
    /// Only market orders may be converted; anything else is a caller error.
    pub(crate) fn to_good_till_cancel(&mut self, price: Price) -> Result<(), OrderError> {
        if self.order_type != OrderType::Market {
            return Err(OrderError::PriceAdjustment(self.id));
        }
        self.price = price;
        self.order_type = OrderType::GoodTillCancel;
        Ok(())
    }
}

/// A request to replace an existing order's side, price and quantity.
///
/// The engine treats a modify as cancel-then-add under one lock acquisition,
/// re-using the same id and preserving the resting order's original type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderModify {
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Builds the replacement order, adopting this request's parameters and
    /// the given (original) order type.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(
            order_type,
            self.order_id,
            self.side,
            self.price,
            self.quantity,
        )
    }
}
