//! Shipping quotes for an order: nearest warehouse, one consolidated
//! package, carrier rates normalized for the caller.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shipping;

pub use config::AppConfig;
pub use error::{GenericError, ShippingError};
pub use shipping::{QuoteRequest, QuoteResponse, ShippingQuoter};
