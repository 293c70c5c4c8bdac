use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::extract::{ApiJson, CurrentUser};
use crate::infra::entities::profiles::Role;
use crate::problem::Problem;
use crate::state::AppState;

use super::dto::ProfileUpdateRequest;

pub async fn get_profile(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.profiles.get(user_id).await?;
    Ok(Json(dto))
}

pub async fn update_profile(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ApiJson(patch): ApiJson<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.profiles.update(caller.id, user_id, patch).await?;
    Ok(Json(dto))
}

pub async fn list_business_profiles(
    _caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Problem> {
    let dtos = state.profiles.list_by_role(Role::Business).await?;
    Ok(Json(dtos))
}

pub async fn list_customer_profiles(
    _caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Problem> {
    let dtos = state.profiles.list_by_role(Role::Customer).await?;
    Ok(Json(dtos))
}
