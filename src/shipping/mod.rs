//! Quote pipeline: resolve the destination, pick the nearest warehouse,
//! consolidate the order, ask the carrier and normalize its answer.

use std::sync::Arc;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    services::{
        address::ViaCepService,
        carrier::{CarrierService, CorreiosService},
        geocoding::GoogleMapsService,
        http_client,
    },
    ShippingError,
};

pub mod distance;
pub mod geo;
pub mod normalize;
pub mod package;
pub mod rate;
pub mod warehouse;

#[cfg(test)]
pub(crate) mod fakes;

pub use distance::distance;
pub use geo::GeoResolver;
pub use normalize::{normalize, Quote, ServiceLevel};
pub use package::{consolidate, ConsolidatedPackage, SkuLine};
pub use rate::RateRequest;
pub use warehouse::{select_nearest, Warehouse};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub postal_code: String,
    #[serde(default)]
    pub items: Vec<SkuLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    pub quotes: Vec<Quote>,
}

pub struct ShippingQuoter {
    config: Arc<AppConfig>,
    resolver: GeoResolver,
    carrier: Box<dyn CarrierService>,
}

impl ShippingQuoter {
    pub fn new<C>(config: Arc<AppConfig>, resolver: GeoResolver, carrier: C) -> Self
    where
        C: CarrierService + 'static,
    {
        ShippingQuoter {
            config,
            resolver,
            carrier: Box::new(carrier),
        }
    }

    /// Wires the live upstream services named in `config`.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, ShippingError> {
        let client = http_client(config.upstream_timeout)?;
        let resolver = GeoResolver::new(
            ViaCepService::new(client.clone(), &config.address_lookup_url),
            GoogleMapsService::new(&config.geocoding_key),
        );
        let carrier = CorreiosService::new(client, &config.carrier.endpoint);
        Ok(ShippingQuoter::new(config, resolver, carrier))
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, ShippingError> {
        let destination = self.resolver.resolve(&request.postal_code).await?;
        let origin =
            select_nearest(&self.resolver, destination, &self.config.warehouses).await?;
        info!(
            "Quoting {} items from {} to {}.",
            request.items.len(),
            origin.name,
            request.postal_code
        );

        let package = consolidate(&request.items);
        let rate_request = RateRequest::build(
            &self.config.carrier,
            &origin.postal_code,
            &request.postal_code,
            &package,
        );
        let options = self.carrier.quote(&rate_request).await?;

        let quotes = normalize(&options, &self.config.carrier.express_code)?;
        Ok(QuoteResponse { quotes })
    }
}
