use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::DomainError;
use crate::infra::entities::profiles::Role;
use crate::infra::entities::reviews;
use crate::profiles::service::role_of;

use super::dto::{
    ReviewCreateRequest, ReviewDto, ReviewListQuery, ReviewOrdering, ReviewStatsDto,
    ReviewUpdateRequest,
};

#[derive(Clone)]
pub struct ReviewsService {
    db: DatabaseConnection,
}

impl ReviewsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, query))]
    pub async fn list(&self, query: ReviewListQuery) -> Result<Vec<ReviewDto>, DomainError> {
        let ordering = ReviewOrdering::parse(query.ordering.as_deref());

        let mut select = reviews::Entity::find();
        if let Some(business_user_id) = query.business_user_id {
            select = select.filter(reviews::Column::BusinessUserId.eq(business_user_id));
        }
        if let Some(reviewer_id) = query.reviewer_id {
            select = select.filter(reviews::Column::ReviewerId.eq(reviewer_id));
        }
        if let Some(rating) = query.rating {
            select = select.filter(reviews::Column::Rating.eq(rating));
        }
        if let Some(rating_min) = query.rating_min {
            select = select.filter(reviews::Column::Rating.gte(rating_min));
        }
        if let Some(rating_max) = query.rating_max {
            select = select.filter(reviews::Column::Rating.lte(rating_max));
        }

        select = match ordering {
            ReviewOrdering::UpdatedAtAsc => select.order_by_asc(reviews::Column::UpdatedAt),
            ReviewOrdering::UpdatedAtDesc => select.order_by_desc(reviews::Column::UpdatedAt),
            ReviewOrdering::RatingAsc => select.order_by_asc(reviews::Column::Rating),
            ReviewOrdering::RatingDesc => select.order_by_desc(reviews::Column::Rating),
        };

        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(ReviewDto::from).collect())
    }

    #[instrument(skip(self, req), fields(caller_id = %caller_id))]
    pub async fn create(
        &self,
        caller_id: Uuid,
        req: ReviewCreateRequest,
    ) -> Result<ReviewDto, DomainError> {
        if role_of(&self.db, caller_id).await? != Role::Customer {
            return Err(DomainError::forbidden(
                "Only customers can write reviews.",
            ));
        }
        if caller_id == req.business_user {
            return Err(DomainError::validation(
                "business_user",
                "You cannot review yourself.",
            ));
        }
        validate_rating(req.rating)?;
        if req.description.trim().is_empty() {
            return Err(DomainError::validation(
                "description",
                "This field is required.",
            ));
        }

        // Target must exist and actually be on the business side.
        match role_of(&self.db, req.business_user).await {
            Ok(Role::Business) => {}
            Ok(Role::Customer) | Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::not_found("Business user"));
            }
            Err(other) => return Err(other),
        }

        let already = reviews::Entity::find()
            .filter(reviews::Column::BusinessUserId.eq(req.business_user))
            .filter(reviews::Column::ReviewerId.eq(caller_id))
            .one(&self.db)
            .await?;
        if already.is_some() {
            return Err(DomainError::validation(
                "non_field_errors",
                "You have already reviewed this business user.",
            ));
        }

        let now = Utc::now();
        let review = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_user_id: Set(req.business_user),
            reviewer_id: Set(caller_id),
            rating: Set(req.rating),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(ReviewDto::from(review))
    }

    #[instrument(skip(self), fields(review_id = %review_id))]
    pub async fn get(&self, review_id: Uuid) -> Result<ReviewDto, DomainError> {
        let review = self.load(review_id).await?;
        Ok(ReviewDto::from(review))
    }

    #[instrument(skip(self, patch), fields(caller_id = %caller_id, review_id = %review_id))]
    pub async fn update(
        &self,
        caller_id: Uuid,
        review_id: Uuid,
        patch: ReviewUpdateRequest,
    ) -> Result<ReviewDto, DomainError> {
        let review = self.load(review_id).await?;
        if review.reviewer_id != caller_id {
            return Err(DomainError::forbidden(
                "You may only edit your own reviews.",
            ));
        }
        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
        }
        if let Some(description) = patch.description.as_deref()
            && description.trim().is_empty()
        {
            return Err(DomainError::validation(
                "description",
                "This field is required.",
            ));
        }

        let mut active: reviews::ActiveModel = review.into();
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now());
        let review = active.update(&self.db).await?;
        Ok(ReviewDto::from(review))
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, review_id = %review_id))]
    pub async fn delete(&self, caller_id: Uuid, review_id: Uuid) -> Result<(), DomainError> {
        let review = self.load(review_id).await?;
        if review.reviewer_id != caller_id {
            return Err(DomainError::forbidden(
                "You may only delete your own reviews.",
            ));
        }
        review.delete(&self.db).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(business_user_id = %business_user_id))]
    pub async fn stats_for(
        &self,
        business_user_id: Uuid,
    ) -> Result<ReviewStatsDto, DomainError> {
        match role_of(&self.db, business_user_id).await {
            Ok(Role::Business) => {}
            Ok(Role::Customer) | Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::not_found("Business user"));
            }
            Err(other) => return Err(other),
        }

        let ratings: Vec<i32> = reviews::Entity::find()
            .filter(reviews::Column::BusinessUserId.eq(business_user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        Ok(build_stats(business_user_id, &ratings))
    }

    async fn load(&self, review_id: Uuid) -> Result<reviews::Model, DomainError> {
        reviews::Entity::find_by_id(review_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))
    }
}

fn validate_rating(rating: i32) -> Result<(), DomainError> {
    if !(1..=5).contains(&rating) {
        return Err(DomainError::validation(
            "rating",
            "Rating must be between 1 and 5.",
        ));
    }
    Ok(())
}

fn build_stats(business_user_id: Uuid, ratings: &[i32]) -> ReviewStatsDto {
    let total = ratings.len() as u64;
    let average = if ratings.is_empty() {
        0.0
    } else {
        let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        round_one_decimal(sum as f64 / ratings.len() as f64)
    };

    let mut distribution: BTreeMap<String, u64> =
        (1..=5).map(|r| (r.to_string(), 0)).collect();
    for rating in ratings {
        if let Some(slot) = distribution.get_mut(&rating.to_string()) {
            *slot += 1;
        }
    }

    ReviewStatsDto {
        business_user_id,
        total_reviews: total,
        average_rating: average,
        rating_distribution: distribution,
        positive_reviews: ratings.iter().filter(|&&r| r >= 4).count() as u64,
        neutral_reviews: ratings.iter().filter(|&&r| r == 3).count() as u64,
        negative_reviews: ratings.iter().filter(|&&r| r <= 2).count() as u64,
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn stats_with_no_reviews_average_zero() {
        let stats = build_stats(Uuid::new_v4(), &[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.rating_distribution.len(), 5);
        assert!(stats.rating_distribution.values().all(|&c| c == 0));
    }

    #[test]
    fn stats_aggregate_histogram_and_buckets() {
        let stats = build_stats(Uuid::new_v4(), &[5, 4, 3, 1, 5]);
        assert_eq!(stats.total_reviews, 5);
        assert_eq!(stats.average_rating, 3.6);
        assert_eq!(stats.rating_distribution["5"], 2);
        assert_eq!(stats.rating_distribution["2"], 0);
        assert_eq!(stats.positive_reviews, 3);
        assert_eq!(stats.neutral_reviews, 1);
        assert_eq!(stats.negative_reviews, 1);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(4.4444), 4.4);
        assert_eq!(round_one_decimal(4.45), 4.5);
    }
}
