use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{services::carrier::RawRateOption, ShippingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceLevel {
    Express,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub label: String,
    pub service_level: ServiceLevel,
    pub price: Decimal,
    pub eta_days: u32,
    pub quote_id: u32,
}

/// Parses a carrier price such as `"25,90"` or `"1.025,90"`.
pub fn parse_price(raw: &str) -> Result<Decimal, ShippingError> {
    let raw = raw.trim();
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    Decimal::from_str(&normalized).map_err(|_| ShippingError::MalformedCarrierResponse {
        field: "Valor",
        value: raw.to_string(),
    })
}

/// Parses a carrier lead time in days.
pub fn parse_lead_time(raw: &str) -> Result<u32, ShippingError> {
    raw.trim()
        .parse()
        .map_err(|_| ShippingError::MalformedCarrierResponse {
            field: "PrazoEntrega",
            value: raw.to_string(),
        })
}

/// Maps carrier rows, in carrier order, to caller-facing quotes.
pub fn normalize(
    options: &[RawRateOption],
    express_code: &str,
) -> Result<Vec<Quote>, ShippingError> {
    (1u32..)
        .zip(options)
        .map(|(quote_id, option)| -> Result<Quote, ShippingError> {
            Ok(Quote {
                label: format!("OPÇÃO FRETE {}", quote_id),
                service_level: if option.codigo.trim() == express_code {
                    ServiceLevel::Express
                } else {
                    ServiceLevel::Standard
                },
                price: parse_price(&option.valor)?,
                eta_days: parse_lead_time(&option.prazo_entrega)?,
                quote_id,
            })
        })
        .collect()
}
