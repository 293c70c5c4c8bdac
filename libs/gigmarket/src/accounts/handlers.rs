use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::extract::ApiJson;
use crate::problem::Problem;
use crate::state::AppState;

use super::dto::{LoginRequest, RegistrationRequest};

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegistrationRequest>,
) -> Result<impl IntoResponse, Problem> {
    let resp = state.accounts.register(req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, Problem> {
    let resp = state.accounts.login(req).await?;
    Ok(Json(resp))
}
