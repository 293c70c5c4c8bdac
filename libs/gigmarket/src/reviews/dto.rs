use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::entities::reviews;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewCreateRequest {
    pub business_user: Uuid,
    pub rating: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReviewUpdateRequest {
    pub rating: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListQuery {
    pub business_user_id: Option<Uuid>,
    pub reviewer_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOrdering {
    UpdatedAtAsc,
    UpdatedAtDesc,
    RatingAsc,
    RatingDesc,
}

impl ReviewOrdering {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("updated_at") => Self::UpdatedAtAsc,
            Some("rating") => Self::RatingAsc,
            Some("-rating") => Self::RatingDesc,
            _ => Self::UpdatedAtDesc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: Uuid,
    pub business_user: Uuid,
    pub reviewer: Uuid,
    pub rating: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<reviews::Model> for ReviewDto {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            business_user: model.business_user_id,
            reviewer: model.reviewer_id,
            rating: model.rating,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Aggregate picture of one business user's reviews.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewStatsDto {
    pub business_user_id: Uuid,
    pub total_reviews: u64,
    /// Rounded to one decimal; 0.0 without reviews.
    pub average_rating: f64,
    /// Counts keyed by rating value "1" through "5".
    pub rating_distribution: BTreeMap<String, u64>,
    pub positive_reviews: u64,
    pub neutral_reviews: u64,
    pub negative_reviews: u64,
}
