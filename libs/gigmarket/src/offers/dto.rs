use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::entities::offer_details::{self, OfferType};
use crate::infra::entities::{offers, users};

/// One package tier as submitted on create/update. On update the tier key
/// selects the row to upsert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OfferDetailWrite {
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: f64,
    pub features: Vec<String>,
    pub offer_type: OfferType,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OfferCreateRequest {
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub details: Vec<OfferDetailWrite>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OfferUpdateRequest {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub details: Option<Vec<OfferDetailWrite>>,
}

/// Filters and ordering for the public offer list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub creator_id: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_delivery_time: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOrdering {
    UpdatedAtAsc,
    UpdatedAtDesc,
    MinPriceAsc,
    MinPriceDesc,
}

impl OfferOrdering {
    /// Unknown directives fall back to the default ordering, newest first.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("updated_at") => Self::UpdatedAtAsc,
            Some("min_price") => Self::MinPriceAsc,
            Some("-min_price") => Self::MinPriceDesc,
            _ => Self::UpdatedAtDesc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferDetailDto {
    pub id: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: f64,
    pub features: Vec<String>,
    pub offer_type: OfferType,
}

impl From<offer_details::Model> for OfferDetailDto {
    fn from(model: offer_details::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            revisions: model.revisions,
            delivery_time_in_days: model.delivery_time_in_days,
            price: model.price,
            features: model.features.0,
            offer_type: model.offer_type,
        }
    }
}

/// Id + link pair used in list/retrieve views instead of inlined details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferDetailLink {
    pub id: Uuid,
    pub url: String,
}

impl OfferDetailLink {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            url: format!("/api/offerdetails/{id}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailsDto {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferListItemDto {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub details: Vec<OfferDetailLink>,
    pub min_price: f64,
    pub min_delivery_time: i32,
    pub user_details: UserDetailsDto,
}

impl OfferListItemDto {
    pub fn from_models(
        offer: &offers::Model,
        details: &[offer_details::Model],
        user: &users::Model,
    ) -> Self {
        Self {
            id: offer.id,
            user: offer.user_id,
            title: offer.title.clone(),
            image: offer.image.clone(),
            description: offer.description.clone(),
            created_at: offer.created_at,
            updated_at: offer.updated_at,
            details: details.iter().map(|d| OfferDetailLink::new(d.id)).collect(),
            min_price: min_price(details),
            min_delivery_time: min_delivery_time(details),
            user_details: UserDetailsDto {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                username: user.username.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferRetrieveDto {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub details: Vec<OfferDetailLink>,
    pub min_price: f64,
    pub min_delivery_time: i32,
}

impl OfferRetrieveDto {
    pub fn from_models(offer: &offers::Model, details: &[offer_details::Model]) -> Self {
        Self {
            id: offer.id,
            user: offer.user_id,
            title: offer.title.clone(),
            image: offer.image.clone(),
            description: offer.description.clone(),
            created_at: offer.created_at,
            updated_at: offer.updated_at,
            details: details.iter().map(|d| OfferDetailLink::new(d.id)).collect(),
            min_price: min_price(details),
            min_delivery_time: min_delivery_time(details),
        }
    }
}

/// Response body for create/update, with details inlined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferWithDetailsDto {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub details: Vec<OfferDetailDto>,
}

impl OfferWithDetailsDto {
    pub fn from_models(offer: &offers::Model, details: Vec<offer_details::Model>) -> Self {
        Self {
            id: offer.id,
            title: offer.title.clone(),
            image: offer.image.clone(),
            description: offer.description.clone(),
            details: details.into_iter().map(OfferDetailDto::from).collect(),
        }
    }
}

pub(crate) fn min_price(details: &[offer_details::Model]) -> f64 {
    details
        .iter()
        .map(|d| d.price)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

pub(crate) fn min_delivery_time(details: &[offer_details::Model]) -> i32 {
    details
        .iter()
        .map(|d| d.delivery_time_in_days)
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::entities::offer_details::FeatureList;

    fn detail(price: f64, days: i32, tier: OfferType) -> offer_details::Model {
        offer_details::Model {
            id: Uuid::new_v4(),
            offer_id: Uuid::new_v4(),
            title: "pkg".to_owned(),
            revisions: 2,
            delivery_time_in_days: days,
            price,
            features: FeatureList(vec!["Logo".to_owned()]),
            offer_type: tier,
        }
    }

    #[test]
    fn min_aggregates_over_details() {
        let details = vec![
            detail(30.0, 10, OfferType::Premium),
            detail(10.0, 3, OfferType::Basic),
            detail(20.0, 5, OfferType::Standard),
        ];
        assert_eq!(min_price(&details), 10.0);
        assert_eq!(min_delivery_time(&details), 3);
    }

    #[test]
    fn min_is_zero_without_details() {
        assert_eq!(min_price(&[]), 0.0);
        assert_eq!(min_delivery_time(&[]), 0);
    }

    #[test]
    fn ordering_parse_falls_back_to_newest_first() {
        assert_eq!(
            OfferOrdering::parse(Some("min_price")),
            OfferOrdering::MinPriceAsc
        );
        assert_eq!(
            OfferOrdering::parse(Some("bogus")),
            OfferOrdering::UpdatedAtDesc
        );
        assert_eq!(OfferOrdering::parse(None), OfferOrdering::UpdatedAtDesc);
    }
}
