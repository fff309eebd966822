use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::JSON_CONTENT_TYPE;
use crate::{fragment, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<fragment::Client>,
    pub metrics: Metrics,
    pub registry: prometheus::Registry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price_ton_per_star: f64,
}

/// `/metrics` serves the registry, every other request is a price lookup.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", any(metrics))
        .route("/api/price", any(price))
        .fallback(price)
        .with_state(state)
}

#[tracing::instrument(skip(state))]
pub async fn price(State(state): State<AppState>) -> Response {
    match state.client.load_price().await {
        Ok((value, source)) => {
            tracing::info!("Price {} from {:?}", value, source);
            state.metrics.record_success(source, value);

            (
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                Json(PriceResponse {
                    price_ton_per_star: value,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Loading Price {:?}", e);
            state.metrics.record_failure(e.outcome());

            e.into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
async fn metrics(State(state): State<AppState>) -> String {
    tracing::trace!("Getting metrics");

    let encoder = prometheus::TextEncoder::new();
    let metrics_families = state.registry.gather();
    match encoder.encode_to_string(&metrics_families) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Encoding Metrics {:?}", e);

            String::new()
        }
    }
}
