//! Price-history request parameters and candle models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{FrequencyType, PeriodType};

/// Window and candle width of a price-history request.
///
/// The default asks for one hour of one-minute candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryQuery {
    /// Unit of `period`
    pub period_type: PeriodType,
    /// Number of `period_type` units to return
    pub period: u32,
    /// Unit of `frequency`
    pub frequency_type: FrequencyType,
    /// Number of `frequency_type` units per candle
    pub frequency: u32,
}

impl Default for PriceHistoryQuery {
    fn default() -> Self {
        Self {
            period_type: PeriodType::Hour,
            period: 1,
            frequency_type: FrequencyType::Minute,
            frequency: 1,
        }
    }
}

impl PriceHistoryQuery {
    /// Create a query with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the period.
    pub fn period(mut self, period_type: PeriodType, period: u32) -> Self {
        self.period_type = period_type;
        self.period = period;
        self
    }

    /// Set the candle frequency.
    pub fn frequency(mut self, frequency_type: FrequencyType, frequency: u32) -> Self {
        self.frequency_type = frequency_type;
        self.frequency = frequency;
        self
    }
}

/// Query string sent to the price-history endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceHistoryParams<'a> {
    pub apikey: &'a str,
    pub period_type: PeriodType,
    pub period: u32,
    pub frequency_type: FrequencyType,
    pub frequency: u32,
}

impl<'a> PriceHistoryParams<'a> {
    pub(crate) fn new(apikey: &'a str, query: PriceHistoryQuery) -> Self {
        Self {
            apikey,
            period_type: query.period_type,
            period: query.period,
            frequency_type: query.frequency_type,
            frequency: query.frequency,
        }
    }
}

/// Decoded price-history body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Candles, oldest first
    #[serde(default)]
    pub candles: Vec<Candle>,
    /// Requested symbol
    #[serde(default)]
    pub symbol: String,
    /// `true` when the window held no data
    #[serde(default)]
    pub empty: bool,
}

impl PriceHistory {
    /// The most recent candle, if any.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }
}

/// One OHLCV bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price
    pub open: Decimal,
    /// High
    pub high: Decimal,
    /// Low
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Traded volume
    #[serde(default)]
    pub volume: u64,
    /// Bucket start
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub datetime: DateTime<Utc>,
}
