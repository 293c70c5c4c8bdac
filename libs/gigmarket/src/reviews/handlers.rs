use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::extract::{ApiJson, CurrentUser};
use crate::problem::Problem;
use crate::state::AppState;

use super::dto::{ReviewCreateRequest, ReviewListQuery, ReviewUpdateRequest};

pub async fn list_reviews(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, Problem> {
    let dtos = state.reviews.list(query).await?;
    Ok(Json(dtos))
}

pub async fn create_review(
    caller: CurrentUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReviewCreateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.reviews.create(caller.id, req).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn get_review(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.reviews.get(review_id).await?;
    Ok(Json(dto))
}

pub async fn update_review(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
    ApiJson(patch): ApiJson<ReviewUpdateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.reviews.update(caller.id, review_id, patch).await?;
    Ok(Json(dto))
}

pub async fn delete_review(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    state.reviews.delete(caller.id, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn review_stats(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(business_user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.reviews.stats_for(business_user_id).await?;
    Ok(Json(dto))
}
