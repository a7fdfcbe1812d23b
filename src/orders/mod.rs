//! Domain types shared by the matching engine: prices, quantities, orders,
//! modification requests and trades.

pub mod error;
pub mod order;
pub mod order_type;
pub mod side;
pub mod trade;

pub use error::OrderError;
pub use order::{Order, OrderModify};
pub use order_type::OrderType;
pub use side::Side;
pub use trade::{Trade, TradeInfo, Trades};

/// Price in instrument ticks.
pub type Price = i32;

/// Order or trade quantity.
pub type Quantity = u32;

/// Unique order identifier.
pub type OrderId = u64;

/// A batch of order identifiers.
pub type OrderIds = Vec<OrderId>;

/// Sentinel price carried by market orders until they are converted to a
/// priced order. Outside the valid tick range, so it can never collide with
/// a real level.
pub const INVALID_PRICE: Price = Price::MIN;
