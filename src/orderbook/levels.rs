//! Aggregated per-price level data.
//!
//! The engine keeps a side-agnostic `(count, quantity)` aggregate for every
//! price with resting orders. The fill-or-kill admission check and depth
//! queries read these aggregates instead of walking queues, so both run in
//! amortised O(levels).

use super::book::BookState;
use crate::orders::{Order, Price, Quantity};
use tracing::trace;

/// Aggregate for one price: number of resting orders and their summed
/// remaining quantity, across whichever side currently holds the price.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct LevelData {
    pub quantity: Quantity,
    pub count: u32,
}

/// How an order-lifecycle event affects its level aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LevelDataAction {
    /// A new order rests at the price.
    Add,
    /// An order leaves the price: cancel, or the final chunk of a full fill.
    Remove,
    /// A partial fill shrinks the level without removing an order.
    Match,
}

impl BookState {
    /// The single mutation point for the `data` index. Entries are erased
    /// the moment their count reaches zero.
    pub(super) fn update_level_data(
        &mut self,
        price: Price,
        quantity: Quantity,
        action: LevelDataAction,
    ) {
        let data = self.data.entry(price).or_default();

        match action {
            LevelDataAction::Add => {
                data.count += 1;
                data.quantity += quantity;
            }
            LevelDataAction::Remove => {
                data.count -= 1;
                data.quantity -= quantity;
            }
            LevelDataAction::Match => {
                data.quantity -= quantity;
            }
        }

        if data.count == 0 {
            self.data.remove(&price);
        }
    }

    /// Hook for a newly placed order. Orders are placed before matching, so
    /// the initial quantity is also the remaining quantity here.
    pub(super) fn on_order_added(&mut self, order: &Order) {
        self.update_level_data(order.price(), order.initial_quantity(), LevelDataAction::Add);
    }

    /// Hook for a cancelled order; uses the quantity remaining at removal.
    pub(super) fn on_order_cancelled(&mut self, order: &Order) {
        self.update_level_data(
            order.price(),
            order.remaining_quantity(),
            LevelDataAction::Remove,
        );
    }

    /// Hook for an execution. A full fill removes the order from its level,
    /// so the final executed chunk doubles as the remaining-at-removal.
    pub(super) fn on_order_matched(
        &mut self,
        price: Price,
        executed: Quantity,
        fully_filled: bool,
    ) {
        trace!(
            "Order book {}: matched {} at {} (fully filled: {})",
            self.symbol,
            executed,
            price,
            fully_filled
        );
        let action = if fully_filled {
            LevelDataAction::Remove
        } else {
            LevelDataAction::Match
        };
        self.update_level_data(price, executed, action);
    }
}
