//! Line-oriented command scripts for driving the engine end-to-end.
//!
//! A script is a sequence of commands, one per line, closed by a terminal
//! expectation line. A blank line ends the stream.
//!
//! - `A <side:B|S> <type> <price> <quantity> <id>`: add an order. Type
//!   tokens are the spelled-out [`OrderType`] names; the price column of a
//!   `Market` add is parsed like any number but not used.
//! - `M <id> <side:B|S> <price> <quantity>`: modify an order.
//! - `C <id>`: cancel an order.
//! - `R <allCount> <bidCount> <askCount>`: expected live-order counts once
//!   every command has been applied. Must be the last non-empty line; a
//!   missing `R`, or data following it, is an error.
//!
//! Numbers parse as signed integers and must be non-negative. All parse
//! failures are fatal; they never reach the engine.

use crate::orderbook::{OrderBook, OrderBookError};
use crate::orders::{Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trades};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// A single parsed script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add an order to the book.
    Add {
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    /// Replace an existing order's side, price and quantity.
    Modify(OrderModify),
    /// Cancel an order by id.
    Cancel(OrderId),
}

/// The terminal `R` line: expected counts of live orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    /// Orders resting on either side.
    pub total: usize,
    /// Orders resting on the bid side.
    pub bids: usize,
    /// Orders resting on the ask side.
    pub asks: usize,
}

/// A fully parsed command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub commands: Vec<Command>,
    pub expectation: Expectation,
}

/// Script parse and execution failures. All of them are fatal to the run.
#[derive(Debug)]
pub enum ScriptError {
    /// The underlying reader failed.
    Io(std::io::Error),

    /// A field did not parse as a signed integer, or overflowed its type.
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A numeric field was negative.
    NegativeNumber {
        /// 1-based line number.
        line: usize,
        /// The parsed value.
        value: i64,
    },

    /// A side or order type token was not recognised.
    UnknownToken {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A line did not start with `A`, `M`, `C` or `R`.
    UnknownCommand {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A command had the wrong number of fields.
    WrongFieldCount {
        /// 1-based line number.
        line: usize,
        /// Fields required by the command.
        expected: usize,
        /// Fields found on the line.
        found: usize,
    },

    /// The stream ended without a terminal `R` line.
    MissingResultLine,

    /// A non-empty line followed the terminal `R` line.
    TrailingData {
        /// 1-based line number.
        line: usize,
    },

    /// The book did not match the terminal expectation after the run.
    ExpectationMismatch {
        expected: Expectation,
        actual: Expectation,
    },

    /// The engine rejected a command with a caller error.
    Book(OrderBookError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(err) => write!(f, "Script read failed: {}", err),
            ScriptError::InvalidNumber { line, token } => {
                write!(f, "Line {}: invalid number '{}'", line, token)
            }
            ScriptError::NegativeNumber { line, value } => {
                write!(f, "Line {}: negative value {}", line, value)
            }
            ScriptError::UnknownToken { line, token } => {
                write!(f, "Line {}: unknown token '{}'", line, token)
            }
            ScriptError::UnknownCommand { line, token } => {
                write!(f, "Line {}: unknown command '{}'", line, token)
            }
            ScriptError::WrongFieldCount {
                line,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Line {}: expected {} fields, found {}",
                    line, expected, found
                )
            }
            ScriptError::MissingResultLine => {
                write!(f, "Script ended without a result line")
            }
            ScriptError::TrailingData { line } => {
                write!(f, "Line {}: data after the result line", line)
            }
            ScriptError::ExpectationMismatch { expected, actual } => {
                write!(
                    f,
                    "Expected {}/{}/{} orders (all/bid/ask), found {}/{}/{}",
                    expected.total,
                    expected.bids,
                    expected.asks,
                    actual.total,
                    actual.bids,
                    actual.asks
                )
            }
            ScriptError::Book(err) => write!(f, "Order book error: {}", err),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<OrderBookError> for ScriptError {
    fn from(err: OrderBookError) -> Self {
        ScriptError::Book(err)
    }
}

impl Script {
    /// Parses a script from a buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, ScriptError> {
        let mut commands = Vec::new();
        let mut expectation = None;

        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(ScriptError::Io)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if expectation.is_some() {
                return Err(ScriptError::TrailingData { line: number });
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            match fields[0] {
                "A" => {
                    require_fields(&fields, 6, number)?;
                    let side = parse_token::<Side>(fields[1], number)?;
                    let order_type = parse_token::<OrderType>(fields[2], number)?;
                    let price = parse_number(fields[3], number)?;
                    let quantity = parse_number(fields[4], number)?;
                    let id = parse_number(fields[5], number)?;
                    commands.push(Command::Add {
                        order_type,
                        id,
                        side,
                        price,
                        quantity,
                    });
                }
                "M" => {
                    require_fields(&fields, 5, number)?;
                    let id = parse_number(fields[1], number)?;
                    let side = parse_token::<Side>(fields[2], number)?;
                    let price = parse_number(fields[3], number)?;
                    let quantity = parse_number(fields[4], number)?;
                    commands.push(Command::Modify(OrderModify::new(id, side, price, quantity)));
                }
                "C" => {
                    require_fields(&fields, 2, number)?;
                    commands.push(Command::Cancel(parse_number(fields[1], number)?));
                }
                "R" => {
                    require_fields(&fields, 4, number)?;
                    let total: u32 = parse_number(fields[1], number)?;
                    let bids: u32 = parse_number(fields[2], number)?;
                    let asks: u32 = parse_number(fields[3], number)?;
                    expectation = Some(Expectation {
                        total: total as usize,
                        bids: bids as usize,
                        asks: asks as usize,
                    });
                }
                token => {
                    return Err(ScriptError::UnknownCommand {
                        line: number,
                        token: token.to_string(),
                    });
                }
            }
        }

        match expectation {
            Some(expectation) => Ok(Script {
                commands,
                expectation,
            }),
            None => Err(ScriptError::MissingResultLine),
        }
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::parse(s.as_bytes())
    }
}

/// Applies every command of `script` to `book`, then checks the book's
/// live-order counts against the terminal expectation. Returns all trades
/// produced, in execution order.
pub fn run(script: &Script, book: &OrderBook) -> Result<Trades, ScriptError> {
    let mut trades = Trades::new();

    for command in &script.commands {
        match *command {
            Command::Add {
                order_type,
                id,
                side,
                price,
                quantity,
            } => {
                let order = match order_type {
                    OrderType::Market => Order::market(id, side, quantity),
                    _ => Order::new(order_type, id, side, price, quantity),
                };
                trades.extend(book.add_order(order)?);
            }
            Command::Modify(modify) => trades.extend(book.modify_order(modify)?),
            Command::Cancel(id) => book.cancel_order(id),
        }
    }

    let (bids, asks) = book.side_order_counts();
    let actual = Expectation {
        total: book.len(),
        bids,
        asks,
    };
    if actual != script.expectation {
        return Err(ScriptError::ExpectationMismatch {
            expected: script.expectation,
            actual,
        });
    }
    Ok(trades)
}

fn require_fields(fields: &[&str], expected: usize, line: usize) -> Result<(), ScriptError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::WrongFieldCount {
            line,
            expected,
            found: fields.len(),
        })
    }
}

/// Parses a numeric field: signed first, so `-5` is reported as negative
/// rather than as garbage, then narrowed to the target width.
fn parse_number<T: TryFrom<i64>>(token: &str, line: usize) -> Result<T, ScriptError> {
    let value = token
        .parse::<i64>()
        .map_err(|_| ScriptError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
    if value < 0 {
        return Err(ScriptError::NegativeNumber { line, value });
    }
    T::try_from(value).map_err(|_| ScriptError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_token<T: FromStr>(token: &str, line: usize) -> Result<T, ScriptError> {
    token.parse::<T>().map_err(|_| ScriptError::UnknownToken {
        line,
        token: token.to_string(),
    })
}
