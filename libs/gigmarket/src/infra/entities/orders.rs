use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::offer_details::{FeatureList, OfferType};

/// Frozen snapshot of an offer detail taken at purchase time. The copied
/// columns are never re-synced when the source detail changes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_user_id: Uuid,
    pub business_user_id: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Json")]
    pub features: FeatureList,
    pub offer_type: OfferType,
    pub status: OrderStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerUserId",
        to = "super::users::Column::Id"
    )]
    CustomerUser,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::BusinessUserId",
        to = "super::users::Column::Id"
    )]
    BusinessUser,
}

impl ActiveModelBehavior for ActiveModel {}
