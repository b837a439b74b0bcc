//! Enumeration types used in requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Instruction of an order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instruction {
    /// Buy equity
    Buy,
    /// Sell equity
    Sell,
    /// Buy to cover a short equity position
    BuyToCover,
    /// Open a short equity position
    SellShort,
    /// Buy to open a new long position
    #[default]
    BuyToOpen,
    /// Buy to close an existing short position
    BuyToClose,
    /// Sell to open a new short position
    SellToOpen,
    /// Sell to close an existing long position
    SellToClose,
}

impl Instruction {
    /// All instructions, in wire order.
    pub const ALL: [Instruction; 8] = [
        Instruction::Buy,
        Instruction::Sell,
        Instruction::BuyToCover,
        Instruction::SellShort,
        Instruction::BuyToOpen,
        Instruction::BuyToClose,
        Instruction::SellToOpen,
        Instruction::SellToClose,
    ];

    /// Wire name of the instruction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instruction::Buy => "BUY",
            Instruction::Sell => "SELL",
            Instruction::BuyToCover => "BUY_TO_COVER",
            Instruction::SellShort => "SELL_SHORT",
            Instruction::BuyToOpen => "BUY_TO_OPEN",
            Instruction::BuyToClose => "BUY_TO_CLOSE",
            Instruction::SellToOpen => "SELL_TO_OPEN",
            Instruction::SellToClose => "SELL_TO_CLOSE",
        }
    }

    /// Returns `true` if this is a buy instruction.
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            Instruction::Buy
                | Instruction::BuyToCover
                | Instruction::BuyToOpen
                | Instruction::BuyToClose
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Instruction::ALL
            .into_iter()
            .find(|i| i.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown instruction: {}", s)))
    }
}

/// Order type. Orders from this crate are always limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Limit order
    #[default]
    Limit,
}

/// Trading session an order is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Session {
    /// Regular market hours
    #[default]
    Normal,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDuration {
    /// Expires at the end of the trading day
    #[default]
    Day,
}

/// Order strategy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStrategyType {
    /// A standalone order
    #[default]
    Single,
}

/// Asset type of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Common stock / ETF
    #[default]
    Equity,
}

/// Period unit of a price-history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Hours
    #[default]
    Hour,
    /// Days
    Day,
    /// Months
    Month,
    /// Years
    Year,
    /// Year to date
    Ytd,
}

impl FromStr for PeriodType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(PeriodType::Hour),
            "day" => Ok(PeriodType::Day),
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            "ytd" => Ok(PeriodType::Ytd),
            _ => Err(Error::InvalidInput(format!("Unknown period type: {}", s))),
        }
    }
}

/// Candle width unit of a price-history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    /// Minute candles
    #[default]
    Minute,
    /// Daily candles
    Daily,
    /// Weekly candles
    Weekly,
    /// Monthly candles
    Monthly,
}

impl FromStr for FrequencyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" => Ok(FrequencyType::Minute),
            "daily" => Ok(FrequencyType::Daily),
            "weekly" => Ok(FrequencyType::Weekly),
            "monthly" => Ok(FrequencyType::Monthly),
            _ => Err(Error::InvalidInput(format!("Unknown frequency type: {}", s))),
        }
    }
}
