//! Process-wide configuration, read once at startup.
//!
//! Values come from the environment (a `.env` file is honoured through
//! `dotenv`). Nothing here is reloaded; the resulting [`AppConfig`] is shared
//! read-only between requests.

use std::time::Duration;

use log::LevelFilter;

use crate::{shipping::Warehouse, ShippingError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_SERVICE_CODES: &str = "04162,04669";
const DEFAULT_EXPRESS_CODE: &str = "04162";
const DEFAULT_CARRIER_URL: &str = "http://ws.correios.com.br/calculador/CalcPrecoPrazo.aspx";
const DEFAULT_ADDRESS_LOOKUP_URL: &str = "https://viacep.com.br";

/// Static terms of the carrier contract.
#[derive(Debug, Clone)]
pub struct CarrierContract {
    pub company_code: String,
    pub password: String,
    pub service_codes: Vec<String>,
    /// Service code reported as [`ServiceLevel::Express`](crate::shipping::ServiceLevel).
    pub express_code: String,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub log_level: LevelFilter,
    pub warehouses: Vec<Warehouse>,
    pub carrier: CarrierContract,
    pub address_lookup_url: String,
    pub geocoding_key: String,
    pub upstream_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ShippingError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShippingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            present(key).ok_or_else(|| ShippingError::Configuration(format!("{} not set.", key)))
        };
        let or_default =
            |key: &str, default: &str| present(key).unwrap_or_else(|| default.to_string());

        let warehouses: Vec<Warehouse> = serde_json::from_str(&required("WAREHOUSES")?)
            .map_err(|e| ShippingError::Configuration(format!("WAREHOUSES: {}", e)))?;

        let service_codes: Vec<String> = or_default("CARRIER_SERVICE_CODES", DEFAULT_SERVICE_CODES)
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from)
            .collect();
        if service_codes.is_empty() {
            return Err(ShippingError::Configuration(
                "CARRIER_SERVICE_CODES lists no service.".to_string(),
            ));
        }

        let log_level = or_default("LOG_LEVEL", "info")
            .parse::<LevelFilter>()
            .map_err(|e| ShippingError::Configuration(format!("LOG_LEVEL: {}", e)))?;

        let upstream_timeout = present("UPSTREAM_TIMEOUT_MS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ShippingError::Configuration(format!("UPSTREAM_TIMEOUT_MS: {}", e)))
            })
            .transpose()?;

        Ok(AppConfig {
            bind_address: or_default("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            log_level,
            warehouses,
            carrier: CarrierContract {
                company_code: required("CARRIER_COMPANY_CODE")?,
                password: required("CARRIER_PASSWORD")?,
                service_codes,
                express_code: or_default("CARRIER_EXPRESS_CODE", DEFAULT_EXPRESS_CODE),
                endpoint: or_default("CARRIER_URL", DEFAULT_CARRIER_URL),
            },
            address_lookup_url: or_default("ADDRESS_LOOKUP_URL", DEFAULT_ADDRESS_LOOKUP_URL),
            geocoding_key: required("GOOGLE_MAPS_TOKEN")?,
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "WAREHOUSES",
                r#"[{"name":"Sao Paulo","postalCode":"01310-100"},{"name":"Recife","postalCode":"50030-230"}]"#,
            ),
            ("CARRIER_COMPANY_CODE", "08082650"),
            ("CARRIER_PASSWORD", "secret"),
            ("GOOGLE_MAPS_TOKEN", "token"),
        ]
    }

    #[test]
    fn loads_defaults_around_required_values() {
        let config = AppConfig::from_lookup(lookup_from(&minimal())).unwrap();

        assert_eq!(config.warehouses.len(), 2);
        assert_eq!(config.warehouses[1].name, "Recife");
        assert_eq!(config.warehouses[1].postal_code, "50030-230");
        assert_eq!(config.carrier.service_codes, vec!["04162", "04669"]);
        assert_eq!(config.carrier.express_code, "04162");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn parses_service_codes_and_timeout() {
        let mut pairs = minimal();
        pairs.push(("CARRIER_SERVICE_CODES", " 04014 , ,04510"));
        pairs.push(("UPSTREAM_TIMEOUT_MS", "2500"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.carrier.service_codes, vec!["04014", "04510"]);
        assert_eq!(config.upstream_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let mut pairs = minimal();
        pairs.push(("BIND_ADDRESS", ""));
        pairs.push(("CARRIER_EXPRESS_CODE", "  "));
        pairs.push(("CARRIER_SERVICE_CODES", ""));
        pairs.push(("UPSTREAM_TIMEOUT_MS", ""));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.carrier.express_code, DEFAULT_EXPRESS_CODE);
        assert_eq!(config.carrier.service_codes, vec!["04162", "04669"]);
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn missing_credentials_fail() {
        let pairs: Vec<_> = minimal()
            .into_iter()
            .filter(|(k, _)| *k != "CARRIER_PASSWORD")
            .collect();
        let error = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(error, ShippingError::Configuration(msg) if msg.contains("CARRIER_PASSWORD")));
    }

    #[test]
    fn malformed_warehouse_list_fails() {
        let mut pairs = minimal();
        pairs[0] = ("WAREHOUSES", "not json");
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ShippingError::Configuration(_))
        ));
    }
}
