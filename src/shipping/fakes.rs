//! In-memory stand-ins for the upstream services.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::{GeoResolver, RateRequest};
use crate::{
    services::{
        address::{Address, AddressLookupService},
        carrier::{CarrierService, RawRateOption},
        geocoding::GeocodingService,
        Coordinate,
    },
    ShippingError,
};

pub struct StaticAddresses(pub HashMap<String, Address>);

#[async_trait]
impl AddressLookupService for StaticAddresses {
    async fn lookup(&self, postal_code: &str) -> Result<Address, ShippingError> {
        Ok(self.0.get(postal_code).cloned().unwrap_or_default())
    }
}

pub struct StaticGeocoder(pub HashMap<String, Coordinate>);

#[async_trait]
impl GeocodingService for StaticGeocoder {
    async fn geocode(&self, query: String) -> Result<Option<Coordinate>, ShippingError> {
        Ok(self.0.get(&query).copied())
    }
}

pub struct Unreachable;

#[async_trait]
impl AddressLookupService for Unreachable {
    async fn lookup(&self, _: &str) -> Result<Address, ShippingError> {
        Err(ShippingError::UpstreamUnavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl GeocodingService for Unreachable {
    async fn geocode(&self, _: String) -> Result<Option<Coordinate>, ShippingError> {
        Err(ShippingError::UpstreamUnavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl CarrierService for Unreachable {
    async fn quote(&self, _: &RateRequest) -> Result<Vec<RawRateOption>, ShippingError> {
        Err(ShippingError::UpstreamUnavailable("connection refused".to_string()))
    }
}

/// Table lookup that refuses one postal code.
pub struct OutageFor {
    pub postal_code: String,
    pub addresses: StaticAddresses,
}

#[async_trait]
impl AddressLookupService for OutageFor {
    async fn lookup(&self, postal_code: &str) -> Result<Address, ShippingError> {
        if postal_code == self.postal_code {
            return Unreachable.lookup(postal_code).await;
        }
        self.addresses.lookup(postal_code).await
    }
}

/// Resolver over a fixed table of digits-only postal codes; `None` entries
/// have an address but no geocoding match.
pub fn resolver(places: &[(&str, Option<(f64, f64)>)]) -> GeoResolver {
    let (addresses, geocoder) = tables(places);
    GeoResolver::new(addresses, geocoder)
}

/// Like [`resolver`], but the address lookup is down for `postal_code`.
pub fn resolver_with_outage(places: &[(&str, Option<(f64, f64)>)], postal_code: &str) -> GeoResolver {
    let (addresses, geocoder) = tables(places);
    let addresses = OutageFor {
        postal_code: postal_code.to_string(),
        addresses,
    };
    GeoResolver::new(addresses, geocoder)
}

fn tables(places: &[(&str, Option<(f64, f64)>)]) -> (StaticAddresses, StaticGeocoder) {
    let mut addresses = HashMap::new();
    let mut coordinates = HashMap::new();
    for (postal_code, position) in places {
        let address = Address {
            street: format!("Rua {}", postal_code),
            city: "Cidade".to_string(),
            state: "UF".to_string(),
        };
        if let Some((lat, lon)) = position {
            coordinates.insert(address.to_query(), Coordinate::new(*lat, *lon));
        }
        addresses.insert(postal_code.to_string(), address);
    }
    (StaticAddresses(addresses), StaticGeocoder(coordinates))
}

/// Carrier answering with fixed rows and remembering what it was asked.
#[derive(Clone, Default)]
pub struct RecordingCarrier {
    pub options: Vec<RawRateOption>,
    pub requests: Arc<Mutex<Vec<RateRequest>>>,
}

impl RecordingCarrier {
    pub fn answering(options: Vec<RawRateOption>) -> Self {
        RecordingCarrier {
            options,
            ..Default::default()
        }
    }

    pub fn last_request(&self) -> Option<RateRequest> {
        self.requests.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl CarrierService for RecordingCarrier {
    async fn quote(&self, request: &RateRequest) -> Result<Vec<RawRateOption>, ShippingError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.options.clone())
    }
}
