//! Executed trades.

use super::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};

/// One side's view of an execution: which order traded, at what price, for
/// how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    /// The resting price of this side's order. The two sides of one trade
    /// can record different prices when the book crossed.
    pub price: Price,
    pub quantity: Quantity,
}

/// A single match between a resting bid and a resting ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub bid: TradeInfo,
    pub ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// Executed quantity, identical on both sides.
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades produced by one engine command, in execution order.
pub type Trades = Vec<Trade>;
