use async_trait::async_trait;
use log::*;
use reqwest::Client;
use serde::Deserialize;

use crate::ShippingError;

/// Street-level address behind a postal code. Any part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
}

impl Address {
    /// Free-text query for a geocoder, keeping empty segments in place.
    pub fn to_query(&self) -> String {
        format!("{}, {}, {}", self.street, self.city, self.state)
    }
}

#[async_trait]
pub trait AddressLookupService: Send + Sync {
    /// Looks up a digits-only postal code.
    async fn lookup(&self, postal_code: &str) -> Result<Address, ShippingError>;
}

pub struct ViaCepService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

impl ViaCepService {
    pub fn new(client: Client, base_url: &str) -> Self {
        ViaCepService {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AddressLookupService for ViaCepService {
    async fn lookup(&self, postal_code: &str) -> Result<Address, ShippingError> {
        let response: ViaCepResponse = self
            .client
            .get(format!("{}/ws/{}/json/", self.base_url, postal_code))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        trace!("Received address for postal code {} from lookup service.", postal_code);

        // Unknown codes come back as `{"erro": true}`, i.e. with no address fields.
        Ok(Address {
            street: response.logradouro.unwrap_or_default(),
            city: response.localidade.unwrap_or_default(),
            state: response.uf.unwrap_or_default(),
        })
    }
}
