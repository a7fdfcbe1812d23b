//! Order book snapshot for market data

use super::book::BookState;
use crate::orders::{Price, Quantity};
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};

/// One price level of a depth snapshot: the price and the summed remaining
/// quantity of every order resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// A deep-copied view of the book's depth at a specific point in time.
///
/// Bids are normalised to descending price (best first), asks to ascending.
/// The snapshot shares nothing with the engine and stays valid after the
/// engine lock is released.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best (highest) price first
    pub bids: Vec<LevelInfo>,

    /// Ask levels, best (lowest) price first
    pub asks: Vec<LevelInfo>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.first().map(|level| (level.price, level.quantity))
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.first().map(|level| (level.price, level.quantity))
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        }
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| u64::from(level.quantity)).sum()
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| u64::from(level.quantity)).sum()
    }
}

impl BookState {
    /// Builds the snapshot by summing each level's queue directly; the
    /// aggregated index is deliberately not consulted, so tests can play
    /// the two against each other. `depth == 0` means every level.
    pub(super) fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let take = if depth == 0 { usize::MAX } else { depth };

        let bids = self
            .bids
            .iter()
            .rev()
            .take(take)
            .map(|(&price, level)| LevelInfo {
                price,
                quantity: level
                    .iter(&self.arena)
                    .map(|order| order.remaining_quantity())
                    .sum(),
            })
            .collect();

        let asks = self
            .asks
            .iter()
            .take(take)
            .map(|(&price, level)| LevelInfo {
                price,
                quantity: level
                    .iter(&self.arena)
                    .map(|order| order.remaining_quantity())
                    .sum(),
            })
            .collect();

        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids,
            asks,
        }
    }
}
