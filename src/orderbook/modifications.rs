//! Cancel and modify flows, including the batch entry point shared with the
//! good-for-day pruner.

use super::book::BookState;
use super::error::OrderBookError;
use crate::orders::{OrderId, OrderModify, Trades, INVALID_PRICE};
use tracing::{trace, warn};

impl BookState {
    /// Cancels an order by id. Unknown ids are a benign no-op.
    pub(super) fn cancel(&mut self, order_id: OrderId) {
        let Some(&key) = self.orders.get(&order_id) else {
            trace!(
                "Order book {}: cancel of unknown order {}, ignoring",
                self.symbol,
                order_id
            );
            return;
        };

        if let Some(order) = self.detach(key) {
            self.on_order_cancelled(&order);
            trace!(
                "Order book {}: cancelled {} order {} at {}",
                self.symbol,
                order.side(),
                order_id,
                order.price()
            );
        }
    }

    /// Cancels every id in the batch. Runs with the engine lock already
    /// held, so the pruner and the public batch cancel share one
    /// acquisition instead of re-locking per order.
    pub(super) fn cancel_many(&mut self, order_ids: &[OrderId]) {
        for &order_id in order_ids {
            self.cancel(order_id);
        }
    }

    /// Replaces an order: cancel, then re-add with the same id, the resting
    /// order's original type, and the request's side/price/quantity. The
    /// replacement joins the back of its queue, losing time priority.
    pub(super) fn modify(&mut self, modify: OrderModify) -> Result<Trades, OrderBookError> {
        let Some(&key) = self.orders.get(&modify.order_id()) else {
            warn!(
                "Order book {}: modify of unknown order {}, ignoring",
                self.symbol,
                modify.order_id()
            );
            return Ok(Trades::new());
        };

        // Reject malformed parameters before touching the book, so a bad
        // modify cannot end up as a bare cancel.
        if modify.quantity() == 0 {
            return Err(OrderBookError::InvalidQuantity {
                order_id: modify.order_id(),
                quantity: 0,
            });
        }
        if modify.price() == INVALID_PRICE {
            return Err(OrderBookError::InvalidPrice {
                order_id: modify.order_id(),
                price: modify.price(),
            });
        }

        let Some(order_type) = self.arena.get(key).map(|order| order.order_type()) else {
            return Ok(Trades::new());
        };

        trace!(
            "Order book {}: modifying order {} to {} {} @ {}",
            self.symbol,
            modify.order_id(),
            modify.side(),
            modify.quantity(),
            modify.price()
        );
        self.cancel(modify.order_id());
        self.add(modify.to_order(order_type))
    }
}
