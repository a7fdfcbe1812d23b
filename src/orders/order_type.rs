use super::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifetime and execution discipline of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests on the book until explicitly cancelled.
    GoodTillCancel,
    /// Executes what it can immediately; the unfilled remainder is cancelled.
    FillAndKill,
    /// Executes completely and immediately, or not at all.
    FillOrKill,
    /// Rests on the book until the end-of-day pruning pass.
    GoodForDay,
    /// Priced to execute against any resting opposite order; converted to
    /// GoodTillCancel at the worst opposite price before matching.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::GoodTillCancel => "GoodTillCancel",
            OrderType::FillAndKill => "FillAndKill",
            OrderType::FillOrKill => "FillOrKill",
            OrderType::GoodForDay => "GoodForDay",
            OrderType::Market => "Market",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GoodTillCancel" => Ok(OrderType::GoodTillCancel),
            "FillAndKill" => Ok(OrderType::FillAndKill),
            "FillOrKill" => Ok(OrderType::FillOrKill),
            "GoodForDay" => Ok(OrderType::GoodForDay),
            "Market" => Ok(OrderType::Market),
            _ => Err(OrderError::UnknownOrderType(s.to_string())),
        }
    }
}
