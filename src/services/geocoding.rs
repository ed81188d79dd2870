use super::Coordinate;

use crate::ShippingError;

use async_trait::async_trait;
use google_maps::{
    geocoding::{error::Error as GeocodingError, response::status::Status},
    GoogleMapsClient, GoogleMapsError,
};
use log::*;
use rust_decimal::prelude::ToPrimitive;

#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Position of the best match for a free-text query, `None` when nothing matched.
    async fn geocode(&self, query: String) -> Result<Option<Coordinate>, ShippingError>;
}

pub struct GoogleMapsService {
    client: GoogleMapsClient,
}

impl GoogleMapsService {
    pub fn new(token: &str) -> Self {
        GoogleMapsService {
            client: GoogleMapsClient::new(token),
        }
    }
}

/// The geocoding API answers an unmatched query with `ZERO_RESULTS`, which
/// the client reports as a service error.
fn is_zero_results(error: &GoogleMapsError) -> bool {
    matches!(
        error,
        GoogleMapsError::Geocoding(GeocodingError::GoogleMapsService(Status::ZeroResults, _))
    )
}

#[async_trait]
impl GeocodingService for GoogleMapsService {
    async fn geocode(&self, query: String) -> Result<Option<Coordinate>, ShippingError> {
        let response = match self
            .client
            .geocoding()
            .with_address(&query)
            .execute()
            .await
        {
            Ok(response) => response,
            Err(error) if is_zero_results(&error) => return Ok(None),
            Err(error) => return Err(ShippingError::UpstreamUnavailable(error.to_string())),
        };

        let coordinates = response.results.first().map(|result| {
            let location = &result.geometry.location;
            Coordinate::new(
                location.lat.to_f64().unwrap_or_default(),
                location.lng.to_f64().unwrap_or_default(),
            )
        });
        trace!("Received coordinates from Google Maps geocoding API.");
        Ok(coordinates)
    }
}
