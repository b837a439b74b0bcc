//! Data models for the TD Ameritrade API.
//!
//! - [`primitives`] - Identifier newtypes (`AccountId`, `Symbol`)
//! - [`enums`] - Instructions and fixed order / price-history vocabularies
//! - [`order`] - Order requests and their wire payload
//! - [`market_data`] - Price-history queries and candles

pub mod primitives;
pub mod enums;
pub mod order;
pub mod market_data;

pub use primitives::*;
pub use enums::*;
pub use order::*;
pub use market_data::*;
