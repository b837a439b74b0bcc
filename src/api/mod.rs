//! API service modules for TD Ameritrade endpoints.
//!
//! Each service covers one slice of the API and borrows the client's
//! shared state.

mod market_data;
mod orders;

pub use market_data::{price_history_path, MarketDataService};
pub use orders::{orders_path, OrderOutcome, OrdersService};
