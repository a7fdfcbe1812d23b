//! Contains the core matching logic for the order book.

use super::book::BookState;
use super::error::OrderBookError;
use crate::orders::{OrderType, Price, Quantity, Side, Trade, TradeInfo, Trades};
use tracing::trace;

impl BookState {
    /// Returns `true` if an order on `side` at `price` for `quantity` could
    /// be executed completely against the current book.
    ///
    /// Walks the aggregated level data in arbitrary order, skipping levels
    /// on the wrong side of the best opposite price (which excludes every
    /// same-side level) and levels past the order's own limit, and
    /// accumulates the reachable quantity until it covers the request.
    pub(super) fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }

        // can_match guarantees the opposite side is non-empty.
        let threshold = match side {
            Side::Buy => self.best_ask(),
            Side::Sell => self.best_bid(),
        };
        let Some(threshold) = threshold else {
            return false;
        };

        let mut outstanding = quantity;
        for (&level_price, level_data) in &self.data {
            let unreachable = match side {
                Side::Buy => level_price < threshold || level_price > price,
                Side::Sell => level_price > threshold || level_price < price,
            };
            if unreachable {
                continue;
            }

            if outstanding <= level_data.quantity {
                return true;
            }
            outstanding -= level_data.quantity;
        }
        false
    }

    /// Drains the crossed region of the book.
    ///
    /// While the best bid reaches the best ask, the heads of the two best
    /// levels execute `min` of their remaining quantities; each fill emits a
    /// trade carrying both resting prices. Fully filled heads are popped as
    /// they complete. Once the book no longer crosses, a fill-and-kill left
    /// at the top of either side is cancelled rather than allowed to rest.
    pub(super) fn match_orders(&mut self) -> Result<Trades, OrderBookError> {
        let mut trades = Trades::new();

        loop {
            let Some(bid_price) = self.best_bid() else {
                break;
            };
            let Some(ask_price) = self.best_ask() else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            let (Some(bid_key), Some(ask_key)) = (
                self.best_level_head(Side::Buy),
                self.best_level_head(Side::Sell),
            ) else {
                break;
            };

            let (bid_id, bid_remaining) = {
                let Some(bid) = self.arena.get(bid_key) else {
                    break;
                };
                (bid.id(), bid.remaining_quantity())
            };
            let (ask_id, ask_remaining) = {
                let Some(ask) = self.arena.get(ask_key) else {
                    break;
                };
                (ask.id(), ask.remaining_quantity())
            };

            let executed = bid_remaining.min(ask_remaining);

            let Some(bid) = self.arena.get_mut(bid_key) else {
                break;
            };
            bid.fill(executed)?;
            let bid_filled = bid.is_filled();

            let Some(ask) = self.arena.get_mut(ask_key) else {
                break;
            };
            ask.fill(executed)?;
            let ask_filled = ask.is_filled();

            trace!(
                "Order book {}: matched bid {} and ask {} for {}",
                self.symbol,
                bid_id,
                ask_id,
                executed
            );

            // Each side trades at its own resting price; a crossed book can
            // record two different prices for one execution.
            trades.push(Trade::new(
                TradeInfo {
                    order_id: bid_id,
                    price: bid_price,
                    quantity: executed,
                },
                TradeInfo {
                    order_id: ask_id,
                    price: ask_price,
                    quantity: executed,
                },
            ));

            self.on_order_matched(bid_price, executed, bid_filled);
            self.on_order_matched(ask_price, executed, ask_filled);

            if bid_filled {
                self.detach(bid_key);
            }
            if ask_filled {
                self.detach(ask_key);
            }
        }

        self.cancel_fill_and_kill_tail(Side::Buy);
        self.cancel_fill_and_kill_tail(Side::Sell);

        Ok(trades)
    }

    /// A fill-and-kill that crossed but stopped matching must not rest: if
    /// one is left at the head of the best level on `side`, cancel it. A
    /// fill-and-kill that never crossed was already rejected at admission.
    fn cancel_fill_and_kill_tail(&mut self, side: Side) {
        let Some(head) = self.best_level_head(side) else {
            return;
        };
        let Some(order) = self.arena.get(head) else {
            return;
        };
        if order.order_type() == OrderType::FillAndKill {
            let id = order.id();
            trace!(
                "Order book {}: cancelling partially filled fill-and-kill order {}",
                self.symbol,
                id
            );
            self.cancel(id);
        }
    }
}
