use axum::extract::{Path, State};
use axum::Json;

use ledgerlens_core::WalletSnapshot;

use super::error::AppError;
use super::SharedState;

pub(super) async fn get_wallet(
    State(state): State<SharedState>,
    Path(address): Path<String>,
) -> Result<Json<WalletSnapshot>, AppError> {
    let snapshot = state.explorer.explore(&address).await?;
    Ok(Json(snapshot))
}

/// `GET /api/v1/wallet/` with no address segment; validation rejects it.
pub(super) async fn get_wallet_without_address(
    State(state): State<SharedState>,
) -> Result<Json<WalletSnapshot>, AppError> {
    let snapshot = state.explorer.explore("").await?;
    Ok(Json(snapshot))
}
