use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::extract::{ApiJson, CurrentUser};
use crate::infra::entities::orders::OrderStatus;
use crate::problem::Problem;
use crate::state::AppState;

use super::dto::{CompletedOrderCountDto, OrderCountDto, OrderCreateRequest, OrderUpdateRequest};

pub async fn create_order(
    caller: CurrentUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OrderCreateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.orders.create(caller.id, req.offer_detail_id).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn list_orders(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Problem> {
    let dtos = state.orders.list_for(caller.id).await?;
    Ok(Json(dtos))
}

pub async fn get_order(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state.orders.get(caller.id, order_id).await?;
    Ok(Json(dto))
}

pub async fn update_order(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    ApiJson(req): ApiJson<OrderUpdateRequest>,
) -> Result<impl IntoResponse, Problem> {
    let dto = state
        .orders
        .update_status(caller.id, order_id, req.status)
        .await?;
    Ok(Json(dto))
}

pub async fn delete_order(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    state.orders.delete(caller.id, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn order_count(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(business_user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let order_count = state
        .orders
        .count_with_status(business_user_id, OrderStatus::InProgress)
        .await?;
    Ok(Json(OrderCountDto { order_count }))
}

pub async fn completed_order_count(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(business_user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Problem> {
    let completed_order_count = state
        .orders
        .count_with_status(business_user_id, OrderStatus::Completed)
        .await?;
    Ok(Json(CompletedOrderCountDto {
        completed_order_count,
    }))
}
