use super::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an order buys or sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side of the book, i.e. the side an order on
    /// `self` matches against.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    /// Parses the script token form: `B` for buy, `S` for sell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Side::Buy),
            "S" => Ok(Side::Sell),
            _ => Err(OrderError::UnknownSide(s.to_string())),
        }
    }
}
