use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::problem::Problem;
use crate::state::AppState;

/// Landing-page counters; open to unauthenticated callers.
pub async fn base_info(State(state): State<AppState>) -> Result<impl IntoResponse, Problem> {
    let dto = state.stats.base_info().await?;
    Ok(Json(dto))
}
