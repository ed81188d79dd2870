//! HTTP surface.
//!
//! - `POST /shipping/quote` - quote an order
//! - `GET /health` - liveness check

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::*;
use serde_json::json;

use crate::shipping::{QuoteRequest, ShippingQuoter};

/// Message returned for every failed quote, whichever step failed.
pub const QUOTE_FAILED_MESSAGE: &str = "Erro ao calcular frete";

pub fn router(quoter: Arc<ShippingQuoter>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/shipping/quote", post(quote))
        .with_state(quoter)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn quote(
    State(quoter): State<Arc<ShippingQuoter>>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    trace!("Received quote request for {}.", request.postal_code);
    match quoter.quote(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(why) => {
            error!("Quote calculation failed: {}", why);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": QUOTE_FAILED_MESSAGE })),
            )
                .into_response()
        }
    }
}
