use async_trait::async_trait;
use log::*;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    shipping::{normalize::parse_price, RateRequest},
    ShippingError,
};

/// One priced option exactly as the carrier sent it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRateOption {
    pub codigo: String,
    pub valor: String,
    pub prazo_entrega: String,
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default)]
    pub msg_erro: Option<String>,
}

impl RawRateOption {
    pub fn new(codigo: &str, valor: &str, prazo_entrega: &str) -> Self {
        RawRateOption {
            codigo: codigo.to_string(),
            valor: valor.to_string(),
            prazo_entrega: prazo_entrega.to_string(),
            erro: None,
            msg_erro: None,
        }
    }

    /// Error codes also flag informational notes (`010`, `011`, ...) on rows
    /// that still carry a price; only a row without a price is a refusal.
    fn rejection(&self) -> Option<ShippingError> {
        let code = self.erro.as_deref().map(str::trim).unwrap_or_default();
        if code.is_empty() || code == "0" {
            return None;
        }
        if parse_price(&self.valor).map_or(false, |price| price > Decimal::ZERO) {
            debug!("Service {} answered with note {}.", self.codigo, code);
            return None;
        }
        Some(ShippingError::CarrierRejected {
            code: format!("{}/{}", self.codigo, code),
            message: self.msg_erro.clone().unwrap_or_default(),
        })
    }
}

/// `<Servicos><cServico>...</cServico>...</Servicos>`
#[derive(Debug, Deserialize)]
struct Servicos {
    #[serde(rename = "cServico", default)]
    servicos: Vec<RawRateOption>,
}

#[async_trait]
pub trait CarrierService: Send + Sync {
    async fn quote(&self, request: &RateRequest) -> Result<Vec<RawRateOption>, ShippingError>;
}

pub struct CorreiosService {
    client: Client,
    endpoint: String,
}

impl CorreiosService {
    pub fn new(client: Client, endpoint: &str) -> Self {
        CorreiosService {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

fn parse_servicos(body: &str) -> Result<Vec<RawRateOption>, ShippingError> {
    quick_xml::de::from_str::<Servicos>(body)
        .map(|envelope| envelope.servicos)
        .map_err(|e| ShippingError::MalformedCarrierResponse {
            field: "Servicos",
            value: e.to_string(),
        })
}

#[async_trait]
impl CarrierService for CorreiosService {
    async fn quote(&self, request: &RateRequest) -> Result<Vec<RawRateOption>, ShippingError> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(request)
            .query(&[("StrRetorno", "xml"), ("nIndicaCalculo", "3")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let options = parse_servicos(&body)?;
        trace!(
            "Received {} rate options for {} -> {}.",
            options.len(),
            request.origin_postal_code,
            request.destination_postal_code
        );

        if let Some(rejection) = options.iter().find_map(RawRateOption::rejection) {
            return Err(rejection);
        }
        Ok(options)
    }
}
