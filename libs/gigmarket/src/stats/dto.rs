use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public landing-page numbers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BaseInfoDto {
    pub review_count: u64,
    /// Rounded to one decimal; 0.0 without reviews.
    pub average_rating: f64,
    pub business_profile_count: u64,
    pub offer_count: u64,
}
