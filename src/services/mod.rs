use std::time::Duration;

use derive_more::Display;
use reqwest::Client;

use crate::ShippingError;

pub mod address;
pub mod carrier;
pub mod geocoding;

const USER_AGENT: &str = concat!("shipping-quote/", env!("CARGO_PKG_VERSION"));

/// Approximate position on the globe, in decimal degrees.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq)]
#[display(fmt = "({}, {})", lat, lon)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// Strips everything but ASCII digits, so `"01310-100"` becomes `"01310100"`.
pub fn digits_only(postal_code: &str) -> String {
    postal_code.chars().filter(char::is_ascii_digit).collect()
}

/// Shared HTTP client for every upstream service.
pub fn http_client(timeout: Option<Duration>) -> Result<Client, ShippingError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ShippingError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
