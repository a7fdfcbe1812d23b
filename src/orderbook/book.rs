//! Core order book: public shell, shared engine state, and the mutable
//! book structure guarded by the engine mutex.

use super::arena::{LevelQueue, OrderArena, OrderKey};
use super::error::OrderBookError;
use super::levels::LevelData;
use super::pruner;
use super::snapshot::OrderBookSnapshot;
use crate::orders::{Order, OrderId, OrderIds, OrderModify, OrderType, Price, Quantity, Side, Trades};
use crate::utils::{Clock, SystemClock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tracing::trace;

/// A price-time priority matching engine for a single instrument.
///
/// All mutable state lives behind one mutex; every public operation takes it
/// for its whole duration, so concurrent commands linearise in lock order.
/// Construction spawns the good-for-day pruning worker, and dropping the
/// book signals it to exit and joins it.
///
/// Returned trades, snapshots and order copies are owned by the caller and
/// hold no reference into engine state.
pub struct OrderBook {
    shared: Arc<EngineShared>,
    pruner: Option<JoinHandle<()>>,
}

/// State shared between the public shell and the pruning worker.
pub(super) struct EngineShared {
    /// The engine mutex. Guards every field of [`BookState`].
    pub(super) state: Mutex<BookState>,
    /// Wakes the pruner out of its timed wait during teardown.
    pub(super) shutdown_cv: Condvar,
    /// Teardown flag; written with release, read with acquire, and only
    /// toggled while the engine mutex is held so no wakeup is lost.
    pub(super) shutdown: AtomicBool,
    /// Wall-clock source for the daily pruning deadline.
    pub(super) clock: Box<dyn Clock>,
}

/// The book proper: both sides, the id index, the level aggregates and the
/// order arena. Only ever touched through the engine mutex.
pub(super) struct BookState {
    /// Instrument label used in logs and snapshots.
    pub(super) symbol: String,
    /// Bid levels; best bid is the highest key.
    pub(super) bids: BTreeMap<Price, LevelQueue>,
    /// Ask levels; best ask is the lowest key.
    pub(super) asks: BTreeMap<Price, LevelQueue>,
    /// Live order index: id to arena handle, for O(1) cancel.
    pub(super) orders: HashMap<OrderId, OrderKey>,
    /// Aggregated `(count, quantity)` per price, both sides together.
    pub(super) data: HashMap<Price, LevelData>,
    /// Storage for every live order.
    pub(super) arena: OrderArena,
}

impl BookState {
    fn new(symbol: String) -> Self {
        Self {
            symbol,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            orders: HashMap::new(),
            data: HashMap::new(),
            arena: OrderArena::default(),
        }
    }

    /// Number of live orders.
    pub(super) fn len(&self) -> usize {
        self.orders.len()
    }

    /// Best (highest) bid price, if any.
    pub(super) fn best_bid(&self) -> Option<Price> {
        self.bids.last_key_value().map(|(price, _)| *price)
    }

    /// Best (lowest) ask price, if any.
    pub(super) fn best_ask(&self) -> Option<Price> {
        self.asks.first_key_value().map(|(price, _)| *price)
    }
}

impl OrderBook {
    /// Creates an order book for `symbol` using the system wall clock.
    pub fn new(symbol: &str) -> Self {
        Self::with_clock(symbol, SystemClock)
    }

    /// Creates an order book with a caller-supplied clock. The clock drives
    /// the good-for-day pruning deadline only; matching itself is untimed.
    pub fn with_clock<C: Clock + 'static>(symbol: &str, clock: C) -> Self {
        let shared = Arc::new(EngineShared {
            state: Mutex::new(BookState::new(symbol.to_string())),
            shutdown_cv: Condvar::new(),
            shutdown: AtomicBool::new(false),
            clock: Box::new(clock),
        });

        let worker = Arc::clone(&shared);
        let pruner = std::thread::Builder::new()
            .name("gfd-pruner".to_string())
            .spawn(move || pruner::run(&worker))
            .expect("failed to spawn the good-for-day pruner");

        trace!("Order book {}: created", symbol);
        Self {
            shared,
            pruner: Some(pruner),
        }
    }

    pub(super) fn state(&self) -> MutexGuard<'_, BookState> {
        self.shared.state.lock().expect("order book mutex poisoned")
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> String {
        self.state().symbol.clone()
    }

    /// Submits an order and returns the trades it produced.
    ///
    /// Precondition violations (zero quantity, mismatched sentinel price)
    /// return an error; duplicate ids and admission rejections (a
    /// fill-and-kill that cannot cross, a fill-or-kill that cannot complete,
    /// a market order against an empty opposite side) return empty trades.
    pub fn add_order(&self, order: Order) -> Result<Trades, OrderBookError> {
        self.state().add(order)
    }

    /// Convenience wrapper building the order from its parts.
    pub fn add_limit_order(
        &self,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        order_type: OrderType,
    ) -> Result<Trades, OrderBookError> {
        self.add_order(Order::new(order_type, id, side, price, quantity))
    }

    /// Submits a market order; it is converted to GoodTillCancel at the
    /// worst opposite price before matching, so it sweeps every crossable
    /// level and never rests executable.
    pub fn submit_market_order(
        &self,
        id: OrderId,
        side: Side,
        quantity: Quantity,
    ) -> Result<Trades, OrderBookError> {
        self.add_order(Order::market(id, side, quantity))
    }

    /// Cancels an order by id. Unknown ids are a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        self.state().cancel(order_id);
    }

    /// Cancels a batch of orders under a single lock acquisition.
    pub fn cancel_orders(&self, order_ids: &OrderIds) {
        self.state().cancel_many(order_ids);
    }

    /// Replaces an order's side, price and quantity, keeping its id and its
    /// original type. Price-time priority is lost. Unknown ids return empty
    /// trades with no state change.
    pub fn modify_order(&self, modify: OrderModify) -> Result<Trades, OrderBookError> {
        self.state().modify(modify)
    }

    /// Number of live orders in the book.
    pub fn len(&self) -> usize {
        self.state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.state().best_bid()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.state().best_ask()
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Price> {
        let state = self.state();
        match (state.best_bid(), state.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Returns a copy of a live order, or `None` if the id is unknown.
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let state = self.state();
        let key = *state.orders.get(&order_id)?;
        state.arena.get(key).cloned()
    }

    /// Number of resting orders on the bid and ask side respectively.
    pub fn side_order_counts(&self) -> (usize, usize) {
        let state = self.state();
        let mut bids = 0;
        let mut asks = 0;
        for key in state.orders.values() {
            if let Some(order) = state.arena.get(*key) {
                match order.side() {
                    Side::Buy => bids += 1,
                    Side::Sell => asks += 1,
                }
            }
        }
        (bids, asks)
    }

    /// Builds a depth snapshot: bids descending by price, asks ascending,
    /// each level's quantity summed from its queue. `depth == 0` includes
    /// every level. The snapshot is a deep copy, safe to keep past the lock.
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        self.state().snapshot(depth)
    }
}

impl Drop for OrderBook {
    /// Signals the pruner to exit and reaps it. The flag is flipped while
    /// the engine mutex is held, so the worker cannot re-enter its timed
    /// wait after missing the notification.
    fn drop(&mut self) {
        {
            let _guard = self.state();
            self.shared.shutdown.store(true, Ordering::Release);
        }
        self.shared.shutdown_cv.notify_all();
        if let Some(handle) = self.pruner.take() {
            let _ = handle.join();
        }
    }
}
