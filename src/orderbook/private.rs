//! Internal book-store plumbing shared by the public operations.

use super::arena::OrderKey;
use super::book::BookState;
use crate::orders::{Order, OrderType, Price, Side};
use tracing::trace;

impl BookState {
    /// Returns `true` if an order on `side` at `price` crosses the book,
    /// i.e. is marketable against the best opposite price.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().is_some_and(|ask| price >= ask),
            Side::Sell => self.best_bid().is_some_and(|bid| price <= bid),
        }
    }

    /// Appends `order` at the tail of its price level, creating the level
    /// if needed, records the id index entry and updates the aggregates.
    pub(super) fn place(&mut self, order: Order) {
        let id = order.id();
        let side = order.side();
        let price = order.price();

        self.on_order_added(&order);
        let key = self.arena.insert(order);
        let level = match side {
            Side::Buy => self.bids.entry(price).or_default(),
            Side::Sell => self.asks.entry(price).or_default(),
        };
        level.push_back(&mut self.arena, key);
        self.orders.insert(id, key);

        trace!(
            "Order book {}: placed {} order {} at {}",
            self.symbol,
            side,
            id,
            price
        );
    }

    /// Detaches an order from its queue, the id index and the arena, erasing
    /// the price level if it empties. Returns the removed order.
    ///
    /// Level-data upkeep stays with the caller: cancels account for the
    /// remaining quantity, the matching loop for the executed chunk.
    pub(super) fn detach(&mut self, key: OrderKey) -> Option<Order> {
        let (id, side, price) = {
            let order = self.arena.get(key)?;
            (order.id(), order.side(), order.price())
        };

        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = levels.get_mut(&price) {
            level.unlink(&mut self.arena, key);
            if level.is_empty() {
                levels.remove(&price);
            }
        }

        self.orders.remove(&id);
        self.arena.remove(key)
    }

    /// Handle of the order at the front of the best level on `side`.
    pub(super) fn best_level_head(&self, side: Side) -> Option<OrderKey> {
        let level = match side {
            Side::Buy => self.bids.last_key_value().map(|(_, level)| level)?,
            Side::Sell => self.asks.first_key_value().map(|(_, level)| level)?,
        };
        level.head()
    }

    /// Walks the whole structure and panics on any violated invariant.
    /// Intended for tests and debugging sweeps, not for the hot path.
    pub(super) fn check_invariants(&self) {
        let mut queued = 0usize;

        for (side, levels) in [(Side::Buy, &self.bids), (Side::Sell, &self.asks)] {
            for (&price, level) in levels {
                let mut count = 0u32;
                let mut quantity = 0;
                for order in level.iter(&self.arena) {
                    assert_eq!(order.side(), side, "order queued on the wrong side");
                    assert_eq!(order.price(), price, "order queued at the wrong price");
                    assert_ne!(
                        order.order_type(),
                        OrderType::Market,
                        "market order resting on the book"
                    );
                    assert!(
                        self.orders.contains_key(&order.id()),
                        "queued order {} missing from the id index",
                        order.id()
                    );
                    count += 1;
                    quantity += order.remaining_quantity();
                }
                assert!(count > 0, "empty price level at {}", price);
                let data = self
                    .data
                    .get(&price)
                    .unwrap_or_else(|| panic!("no level data for price {}", price));
                assert_eq!(data.count, count, "level count mismatch at {}", price);
                assert_eq!(data.quantity, quantity, "level quantity mismatch at {}", price);
                queued += count as usize;
            }
        }

        assert_eq!(queued, self.orders.len(), "id index size mismatch");
        assert_eq!(queued, self.arena.len(), "arena size mismatch");
        assert_eq!(
            self.data.len(),
            self.bids.len() + self.asks.len(),
            "level data tracks a price with no resting orders"
        );

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "book left crossed: bid {} >= ask {}", bid, ask);
        }
    }
}

impl super::book::OrderBook {
    /// Asserts every structural invariant of the book. Panics on violation.
    pub fn assert_invariants(&self) {
        self.state().check_invariants();
    }
}
