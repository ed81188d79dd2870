use log::*;

use crate::{
    services::{
        address::AddressLookupService, digits_only, geocoding::GeocodingService, Coordinate,
    },
    ShippingError,
};

/// Turns postal codes into coordinates: address lookup first, then geocoding.
pub struct GeoResolver {
    addresses: Box<dyn AddressLookupService>,
    geocoder: Box<dyn GeocodingService>,
}

impl GeoResolver {
    pub fn new<A, G>(addresses: A, geocoder: G) -> Self
    where
        A: AddressLookupService + 'static,
        G: GeocodingService + 'static,
    {
        GeoResolver {
            addresses: Box::new(addresses),
            geocoder: Box::new(geocoder),
        }
    }

    /// Resolves a postal code to its approximate position.
    ///
    /// A query the geocoder cannot match resolves to `(0, 0)` instead of
    /// failing. Lookup and geocoding transport failures propagate.
    pub async fn resolve(&self, postal_code: &str) -> Result<Coordinate, ShippingError> {
        let postal_code = digits_only(postal_code);
        let address = self.addresses.lookup(&postal_code).await?;
        let query = address.to_query();

        match self.geocoder.geocode(query.clone()).await? {
            Some(coordinate) => {
                trace!("Resolved {} to {}.", postal_code, coordinate);
                Ok(coordinate)
            }
            None => {
                warn!(
                    "No geocoding match for {} (query {:?}), falling back to (0, 0).",
                    postal_code, query
                );
                Ok(Coordinate::default())
            }
        }
    }
}
