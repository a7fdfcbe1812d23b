//! # Price-Time Priority Matching Engine
//!
//! A limit order book matching engine for a single instrument, written in Rust. The engine accepts a stream of order commands (add, modify, cancel), maintains the resting book on both sides, and returns the trades produced by every command.
//!
//! ## Key Features
//!
//! - **Strict Price-Time Priority**: Orders match best price first, and within a price level in arrival order. No pro-rata allocation, no price improvement.
//!
//! - **Multiple Order Disciplines**: Good-till-cancel, fill-and-kill (IOC), fill-or-kill, good-for-day, and market orders. Market orders are converted to good-till-cancel at the worst opposite price so they sweep every crossable level.
//!
//! - **O(1) Cancellation**: Resting orders live in an arena with stable handles, so a cancel by id never walks a queue.
//!
//! - **Aggregated Depth**: A per-price `(count, quantity)` index answers fill-or-kill admission and depth queries in amortised O(levels).
//!
//! - **Good-For-Day Pruning**: A background worker cancels every good-for-day order at the daily close (16:00 local time), cooperating with the matching thread under the engine mutex.
//!
//! - **Script Harness**: A line-oriented command format for driving the engine end-to-end, with a strict parser and a runner that checks terminal expectations.
//!
//! ## Concurrency Model
//!
//! All mutable state sits behind a single mutex; every public operation takes
//! it for its whole duration, so concurrent commands linearise in lock
//! order. Returned trades, snapshots and order copies are owned by the
//! caller and hold no reference into engine state.
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderType, Side};
//!
//! let book = OrderBook::new("DEMO");
//! book.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10))?;
//! let trades = book.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 10))?;
//!
//! assert_eq!(trades.len(), 1);
//! assert!(book.is_empty());
//! # Ok::<(), matchbook::OrderBookError>(())
//! ```

mod orderbook;

mod orders;

pub mod script;

mod utils;

pub use orderbook::{LevelInfo, OrderBook, OrderBookError, OrderBookSnapshot};
pub use orders::{
    Order, OrderError, OrderId, OrderIds, OrderModify, OrderType, Price, Quantity, Side, Trade,
    TradeInfo, Trades, INVALID_PRICE,
};
pub use utils::{current_time_millis, Clock, SystemClock};
