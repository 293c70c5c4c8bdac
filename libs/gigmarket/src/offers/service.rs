use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    LoaderTrait, ModelTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::DomainError;
use crate::infra::entities::offer_details::{self, FeatureList, OfferType};
use crate::infra::entities::profiles::Role;
use crate::infra::entities::{offers, users};
use crate::pagination::Page;
use crate::profiles::service::role_of;

use super::dto::{
    OfferCreateRequest, OfferDetailDto, OfferDetailWrite, OfferListItemDto, OfferListQuery,
    OfferOrdering, OfferRetrieveDto, OfferUpdateRequest, OfferWithDetailsDto,
};

#[derive(Clone)]
pub struct OffersService {
    db: DatabaseConnection,
}

impl OffersService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Public listing with filters, ordering and page-number pagination.
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        query: OfferListQuery,
        page: u64,
        page_size: u64,
    ) -> Result<Page<OfferListItemDto>, DomainError> {
        let ordering = OfferOrdering::parse(query.ordering.as_deref());

        let mut select = offers::Entity::find();

        if let Some(creator_id) = query.creator_id {
            select = select.filter(offers::Column::UserId.eq(creator_id));
        }
        if let Some(min_price) = query.min_price {
            select = select.filter(
                offers::Column::Id.in_subquery(
                    Query::select()
                        .column(offer_details::Column::OfferId)
                        .from(offer_details::Entity)
                        .and_where(offer_details::Column::Price.gte(min_price))
                        .to_owned(),
                ),
            );
        }
        if let Some(max_days) = query.max_delivery_time {
            select = select.filter(
                offers::Column::Id.in_subquery(
                    Query::select()
                        .column(offer_details::Column::OfferId)
                        .from(offer_details::Entity)
                        .and_where(offer_details::Column::DeliveryTimeInDays.lte(max_days))
                        .to_owned(),
                ),
            );
        }
        if let Some(term) = query.search.as_deref().map(str::trim)
            && !term.is_empty()
        {
            // Lowercase both sides so LIKE is case-insensitive on Postgres too.
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            offers::Entity,
                            offers::Column::Title,
                        ))))
                        .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            offers::Entity,
                            offers::Column::Description,
                        ))))
                        .like(pattern),
                    ),
            );
        }

        select = match ordering {
            OfferOrdering::UpdatedAtAsc => select.order_by_asc(offers::Column::UpdatedAt),
            OfferOrdering::UpdatedAtDesc => select.order_by_desc(offers::Column::UpdatedAt),
            OfferOrdering::MinPriceAsc | OfferOrdering::MinPriceDesc => {
                let direction = if ordering == OfferOrdering::MinPriceAsc {
                    Order::Asc
                } else {
                    Order::Desc
                };
                select
                    .join(JoinType::LeftJoin, offers::Relation::Details.def())
                    .group_by(offers::Column::Id)
                    .order_by(
                        Expr::col((offer_details::Entity, offer_details::Column::Price)).min(),
                        direction,
                    )
            }
        };

        let paginator = select.paginate(&self.db, page_size);
        let count = paginator.num_items().await?;
        let offer_page = paginator.fetch_page(page - 1).await?;
        let details = offer_page.load_many(offer_details::Entity, &self.db).await?;

        let user_ids: Vec<Uuid> = offer_page.iter().map(|o| o.user_id).collect();
        let users_by_id: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut results = Vec::with_capacity(offer_page.len());
        for (offer, details) in offer_page.iter().zip(details.iter()) {
            let user = users_by_id
                .get(&offer.user_id)
                .ok_or_else(|| DomainError::not_found("Offer"))?;
            results.push(OfferListItemDto::from_models(offer, details, user));
        }

        Ok(Page::new(count, page, page_size, results))
    }

    #[instrument(skip(self, req), fields(caller_id = %caller_id))]
    pub async fn create(
        &self,
        caller_id: Uuid,
        req: OfferCreateRequest,
    ) -> Result<OfferWithDetailsDto, DomainError> {
        if role_of(&self.db, caller_id).await? != Role::Business {
            return Err(DomainError::forbidden(
                "Only business users can create offers.",
            ));
        }
        if req.title.trim().is_empty() {
            return Err(DomainError::validation("title", "This field is required."));
        }
        validate_full_tier_set(&req.details)?;

        let (offer, details) = self
            .db
            .transaction::<_, (offers::Model, Vec<offer_details::Model>), DomainError>(
                move |txn| {
                    Box::pin(async move {
                        let now = Utc::now();
                        let offer = offers::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            user_id: Set(caller_id),
                            title: Set(req.title),
                            image: Set(req.image),
                            description: Set(req.description),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                        .insert(txn)
                        .await?;

                        let mut created = Vec::with_capacity(req.details.len());
                        for detail in req.details {
                            created.push(
                                detail_active_model(offer.id, detail).insert(txn).await?,
                            );
                        }
                        Ok((offer, created))
                    })
                },
            )
            .await?;

        Ok(OfferWithDetailsDto::from_models(&offer, details))
    }

    #[instrument(skip(self), fields(offer_id = %offer_id))]
    pub async fn retrieve(&self, offer_id: Uuid) -> Result<OfferRetrieveDto, DomainError> {
        let (offer, details) = self.load_with_details(offer_id).await?;
        Ok(OfferRetrieveDto::from_models(&offer, &details))
    }

    /// Partial update. Submitted details upsert by tier; the tier set may
    /// stay incomplete only because creation already guaranteed coverage.
    #[instrument(skip(self, patch), fields(caller_id = %caller_id, offer_id = %offer_id))]
    pub async fn update(
        &self,
        caller_id: Uuid,
        offer_id: Uuid,
        patch: OfferUpdateRequest,
    ) -> Result<OfferWithDetailsDto, DomainError> {
        let (offer, existing) = self.load_with_details(offer_id).await?;
        if offer.user_id != caller_id {
            return Err(DomainError::forbidden(
                "You may only edit your own offers.",
            ));
        }
        if let Some(title) = patch.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(DomainError::validation("title", "This field is required."));
        }
        if let Some(details) = patch.details.as_deref() {
            for detail in details {
                validate_detail_fields(detail)?;
            }
        }

        let (offer, details) = self
            .db
            .transaction::<_, (offers::Model, Vec<offer_details::Model>), DomainError>(
                move |txn| {
                    Box::pin(async move {
                        let mut active: offers::ActiveModel = offer.into();
                        if let Some(title) = patch.title {
                            active.title = Set(title);
                        }
                        if let Some(image) = patch.image {
                            active.image = Set(Some(image));
                        }
                        if let Some(description) = patch.description {
                            active.description = Set(description);
                        }
                        active.updated_at = Set(Utc::now());
                        let offer = active.update(txn).await?;

                        let mut by_tier: HashMap<OfferType, offer_details::Model> =
                            existing.into_iter().map(|d| (d.offer_type, d)).collect();
                        for write in patch.details.unwrap_or_default() {
                            let updated = match by_tier.remove(&write.offer_type) {
                                Some(current) => {
                                    let mut active: offer_details::ActiveModel = current.into();
                                    active.title = Set(write.title);
                                    active.revisions = Set(write.revisions);
                                    active.delivery_time_in_days =
                                        Set(write.delivery_time_in_days);
                                    active.price = Set(write.price);
                                    active.features = Set(FeatureList(write.features));
                                    active.update(txn).await?
                                }
                                None => detail_active_model(offer.id, write).insert(txn).await?,
                            };
                            by_tier.insert(updated.offer_type, updated);
                        }

                        let mut details: Vec<offer_details::Model> =
                            by_tier.into_values().collect();
                        details.sort_by_key(|d| tier_rank(d.offer_type));
                        Ok((offer, details))
                    })
                },
            )
            .await?;

        Ok(OfferWithDetailsDto::from_models(&offer, details))
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, offer_id = %offer_id))]
    pub async fn delete(&self, caller_id: Uuid, offer_id: Uuid) -> Result<(), DomainError> {
        let offer = offers::Entity::find_by_id(offer_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;
        if offer.user_id != caller_id {
            return Err(DomainError::forbidden(
                "You may only delete your own offers.",
            ));
        }

        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    offer_details::Entity::delete_many()
                        .filter(offer_details::Column::OfferId.eq(offer_id))
                        .exec(txn)
                        .await?;
                    offer.delete(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(detail_id = %detail_id))]
    pub async fn get_detail(&self, detail_id: Uuid) -> Result<OfferDetailDto, DomainError> {
        let detail = offer_details::Entity::find_by_id(detail_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer detail"))?;
        Ok(OfferDetailDto::from(detail))
    }

    async fn load_with_details(
        &self,
        offer_id: Uuid,
    ) -> Result<(offers::Model, Vec<offer_details::Model>), DomainError> {
        let offer = offers::Entity::find_by_id(offer_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;
        let mut details = offer
            .find_related(offer_details::Entity)
            .all(&self.db)
            .await?;
        details.sort_by_key(|d| tier_rank(d.offer_type));
        Ok((offer, details))
    }
}

fn detail_active_model(offer_id: Uuid, write: OfferDetailWrite) -> offer_details::ActiveModel {
    offer_details::ActiveModel {
        id: Set(Uuid::new_v4()),
        offer_id: Set(offer_id),
        title: Set(write.title),
        revisions: Set(write.revisions),
        delivery_time_in_days: Set(write.delivery_time_in_days),
        price: Set(write.price),
        features: Set(FeatureList(write.features)),
        offer_type: Set(write.offer_type),
    }
}

fn tier_rank(tier: OfferType) -> u8 {
    match tier {
        OfferType::Basic => 0,
        OfferType::Standard => 1,
        OfferType::Premium => 2,
    }
}

/// Creation requires exactly one detail for each of the three tiers.
fn validate_full_tier_set(details: &[OfferDetailWrite]) -> Result<(), DomainError> {
    if details.len() != 3 {
        return Err(DomainError::validation(
            "details",
            "An offer must contain exactly 3 details.",
        ));
    }
    for tier in OfferType::ALL {
        if details.iter().filter(|d| d.offer_type == tier).count() != 1 {
            return Err(DomainError::validation(
                "details",
                "An offer must contain one basic, one standard and one premium detail.",
            ));
        }
    }
    for detail in details {
        validate_detail_fields(detail)?;
    }
    Ok(())
}

fn validate_detail_fields(detail: &OfferDetailWrite) -> Result<(), DomainError> {
    if detail.title.trim().is_empty() {
        return Err(DomainError::validation(
            "details.title",
            "This field is required.",
        ));
    }
    if detail.price < 0.0 {
        return Err(DomainError::validation(
            "details.price",
            "Price must not be negative.",
        ));
    }
    if detail.revisions < -1 {
        return Err(DomainError::validation(
            "details.revisions",
            "Revisions must be -1 (unlimited) or a non-negative number.",
        ));
    }
    if detail.delivery_time_in_days < 1 {
        return Err(DomainError::validation(
            "details.delivery_time_in_days",
            "Delivery time must be at least one day.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(tier: OfferType) -> OfferDetailWrite {
        OfferDetailWrite {
            title: "pkg".to_owned(),
            revisions: 2,
            delivery_time_in_days: 5,
            price: 100.0,
            features: vec!["Logo".to_owned()],
            offer_type: tier,
        }
    }

    #[test]
    fn tier_set_must_have_three_entries() {
        let err = validate_full_tier_set(&[write(OfferType::Basic)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn tier_set_rejects_duplicates() {
        let details = vec![
            write(OfferType::Basic),
            write(OfferType::Basic),
            write(OfferType::Premium),
        ];
        assert!(validate_full_tier_set(&details).is_err());
    }

    #[test]
    fn tier_set_accepts_one_of_each() {
        let details = vec![
            write(OfferType::Basic),
            write(OfferType::Standard),
            write(OfferType::Premium),
        ];
        assert!(validate_full_tier_set(&details).is_ok());
    }

    #[test]
    fn detail_fields_are_checked() {
        let mut bad = write(OfferType::Basic);
        bad.delivery_time_in_days = 0;
        assert!(validate_detail_fields(&bad).is_err());

        let mut bad = write(OfferType::Basic);
        bad.price = -1.0;
        assert!(validate_detail_fields(&bad).is_err());
    }
}
