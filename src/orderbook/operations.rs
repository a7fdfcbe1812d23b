//! Order admission: validation, market conversion and the immediate-order
//! gates, ending in placement and the matching loop.

use super::book::BookState;
use super::error::OrderBookError;
use crate::orders::{Order, OrderType, Side, Trades, INVALID_PRICE};
use tracing::{trace, warn};

impl BookState {
    /// Admits an order and returns the trades it produced.
    pub(super) fn add(&mut self, mut order: Order) -> Result<Trades, OrderBookError> {
        if order.initial_quantity() == 0 {
            return Err(OrderBookError::InvalidQuantity {
                order_id: order.id(),
                quantity: 0,
            });
        }

        // The sentinel price and the Market type travel together.
        let priced = order.price() != INVALID_PRICE;
        if priced == (order.order_type() == OrderType::Market) {
            return Err(OrderBookError::InvalidPrice {
                order_id: order.id(),
                price: order.price(),
            });
        }

        if self.orders.contains_key(&order.id()) {
            warn!(
                "Order book {}: order {} already exists, skipping add",
                self.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        // A market order becomes a GTC priced at the *worst* opposite level,
        // so the matching loop can sweep the entire opposite book and the
        // order can never rest while still executable.
        if order.order_type() == OrderType::Market {
            let worst_opposite = match order.side() {
                Side::Buy => self.asks.last_key_value().map(|(price, _)| *price),
                Side::Sell => self.bids.first_key_value().map(|(price, _)| *price),
            };
            match worst_opposite {
                Some(price) => order.to_good_till_cancel(price)?,
                None => {
                    trace!(
                        "Order book {}: dropping market order {}, empty opposite side",
                        self.symbol,
                        order.id()
                    );
                    return Ok(Trades::new());
                }
            }
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            trace!(
                "Order book {}: fill-and-kill order {} cannot cross, rejected",
                self.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        if order.order_type() == OrderType::FillOrKill
            && !self.can_fully_fill(order.side(), order.price(), order.initial_quantity())
        {
            trace!(
                "Order book {}: fill-or-kill order {} cannot be fully filled, rejected",
                self.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        self.place(order);
        self.match_orders()
    }
}
