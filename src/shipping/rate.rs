use serde::Serialize;

use super::ConsolidatedPackage;
use crate::{config::CarrierContract, services::digits_only};

/// Box or parcel, as opposed to roll/prism (2) and envelope (3).
pub const FORMAT_BOX: u8 = 1;
const NO: &str = "N";

/// Carrier rate query, in the carrier's own field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRequest {
    #[serde(rename = "nCdEmpresa")]
    pub company_code: String,
    #[serde(rename = "sDsSenha")]
    pub password: String,
    #[serde(rename = "nCdServico")]
    pub service_codes: String,
    #[serde(rename = "sCepOrigem")]
    pub origin_postal_code: String,
    #[serde(rename = "sCepDestino")]
    pub destination_postal_code: String,
    #[serde(rename = "nVlPeso")]
    pub weight: String,
    #[serde(rename = "nCdFormato")]
    pub format: u8,
    #[serde(rename = "nVlComprimento")]
    pub length: String,
    #[serde(rename = "nVlAltura")]
    pub height: String,
    #[serde(rename = "nVlLargura")]
    pub width: String,
    #[serde(rename = "nVlDiametro")]
    pub diameter: String,
    #[serde(rename = "sCdMaoPropria")]
    pub own_hands: &'static str,
    #[serde(rename = "nVlValorDeclarado")]
    pub declared_value: String,
    #[serde(rename = "sCdAvisoRecebimento")]
    pub receipt_notice: &'static str,
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

impl RateRequest {
    pub fn build(
        contract: &CarrierContract,
        origin_postal_code: &str,
        destination_postal_code: &str,
        package: &ConsolidatedPackage,
    ) -> Self {
        RateRequest {
            company_code: contract.company_code.clone(),
            password: contract.password.clone(),
            service_codes: contract.service_codes.join(","),
            origin_postal_code: digits_only(origin_postal_code),
            destination_postal_code: digits_only(destination_postal_code),
            weight: two_decimals(package.total_weight),
            format: FORMAT_BOX,
            length: two_decimals(package.length),
            height: two_decimals(package.height),
            width: two_decimals(package.width),
            diameter: "0".to_string(),
            own_hands: NO,
            declared_value: two_decimals(package.declared_value),
            receipt_notice: NO,
        }
    }
}
