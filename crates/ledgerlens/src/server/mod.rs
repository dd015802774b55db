mod error;
mod wallet;

use std::sync::Arc;

use axum::routing::{any, get};
use axum::{Json, Router};
use eyre::WrapErr;
use tower_http::cors::{AllowOrigin, CorsLayer};

use ledgerlens_core::WalletExplorer;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub explorer: Arc<WalletExplorer>,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState, origin: &str) -> eyre::Result<Router> {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches.
    let allowed: axum::http::HeaderValue = origin
        .parse()
        .wrap_err_with(|| format!("invalid origin `{origin}`"))?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed,
        ))
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let shared = Arc::new(state);

    let router = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/wallet", get(wallet::get_wallet_without_address))
        .route("/api/v1/wallet/", get(wallet::get_wallet_without_address))
        .route("/api/v1/wallet/{address}", get(wallet::get_wallet))
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .layer(cors)
        .with_state(shared);

    Ok(router)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
