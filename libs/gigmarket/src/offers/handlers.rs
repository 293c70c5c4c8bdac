use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::extract::{ApiJson, CurrentUser};
use crate::pagination::PageQuery;
use crate::problem::Problem;
use crate::state::AppState;

use super::dto::{OfferCreateRequest, OfferListQuery, OfferUpdateRequest};

/// Listing is public; no token required.
pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<OfferListQuery>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .resolve(state.pagination.page_size, state.pagination.max_page_size);
    let page = state.offers.list(query, page, page_size).await?;
    Ok(Json(page))
}

pub async fn create_offer(
    caller: CurrentUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OfferCreateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.offers.create(caller.id, req).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn get_offer(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.offers.retrieve(offer_id).await?;
    Ok(Json(dto))
}

pub async fn update_offer(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(offer_id): Path<Uuid>,
    ApiJson(patch): ApiJson<OfferUpdateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.offers.update(caller.id, offer_id, patch).await?;
    Ok(Json(dto))
}

pub async fn delete_offer(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    state.offers.delete(caller.id, offer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_offer_detail(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(detail_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.offers.get_detail(detail_id).await?;
    Ok(Json(dto))
}
