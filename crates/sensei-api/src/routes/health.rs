use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health of the API and its store
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let mut services = HashMap::new();

    let store_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Store ping failed: {}", e);
            false
        }
    };
    let store_status = if store_ok { "connected" } else { "disconnected" };
    services.insert(
        format!("store:{}", state.store.backend()),
        store_status.to_string(),
    );
    services.insert(
        format!("search:{}", state.search_backend),
        "configured".to_string(),
    );

    let status = if store_ok { "healthy" } else { "degraded" };
    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    }))
}
