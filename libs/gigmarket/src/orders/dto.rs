use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::entities::offer_details::OfferType;
use crate::infra::entities::orders::{self, OrderStatus};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderCreateRequest {
    pub offer_detail_id: Uuid,
}

/// Only the status is writable after creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderUpdateRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    pub customer_user: Uuid,
    pub business_user: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: f64,
    pub features: Vec<String>,
    pub offer_type: OfferType,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for OrderDto {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            customer_user: model.customer_user_id,
            business_user: model.business_user_id,
            title: model.title,
            revisions: model.revisions,
            delivery_time_in_days: model.delivery_time_in_days,
            price: model.price,
            features: model.features.0,
            offer_type: model.offer_type,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderCountDto {
    pub order_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletedOrderCountDto {
    pub completed_order_count: u64,
}
