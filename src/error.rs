use thiserror::Error;

pub type GenericError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ShippingError {
    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("no warehouse available to ship from")]
    NoWarehouseAvailable,
    #[error("malformed carrier response: {field} = {value:?}")]
    MalformedCarrierResponse { field: &'static str, value: String },
    #[error("carrier rejected service {code}: {message}")]
    CarrierRejected { code: String, message: String },
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ShippingError {
    fn from(error: reqwest::Error) -> Self {
        ShippingError::UpstreamUnavailable(error.to_string())
    }
}
