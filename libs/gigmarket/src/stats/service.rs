use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::instrument;

use crate::error::DomainError;
use crate::infra::entities::profiles::{self, Role};
use crate::infra::entities::{offers, reviews};
use crate::reviews::service::round_one_decimal;

use super::dto::BaseInfoDto;

#[derive(Clone)]
pub struct StatsService {
    db: DatabaseConnection,
}

impl StatsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn base_info(&self) -> Result<BaseInfoDto, DomainError> {
        let ratings: Vec<i32> = reviews::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| r.rating)
            .collect();
        let review_count = ratings.len() as u64;
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
            round_one_decimal(sum as f64 / ratings.len() as f64)
        };

        let business_profile_count = profiles::Entity::find()
            .filter(profiles::Column::Role.eq(Role::Business))
            .count(&self.db)
            .await?;
        let offer_count = offers::Entity::find().count(&self.db).await?;

        Ok(BaseInfoDto {
            review_count,
            average_rating,
            business_profile_count,
            offer_count,
        })
    }
}
