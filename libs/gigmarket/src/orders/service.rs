use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::DomainError;
use crate::infra::entities::orders::{self, OrderStatus};
use crate::infra::entities::profiles::Role;
use crate::infra::entities::{offer_details, offers, users};
use crate::profiles::service::role_of;

use super::dto::OrderDto;

#[derive(Clone)]
pub struct OrdersService {
    db: DatabaseConnection,
}

impl OrdersService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Buying freezes the package: every priced field is copied off the
    /// detail so later edits to the offer never touch running orders.
    #[instrument(skip(self), fields(caller_id = %caller_id, detail_id = %offer_detail_id))]
    pub async fn create(
        &self,
        caller_id: Uuid,
        offer_detail_id: Uuid,
    ) -> Result<OrderDto, DomainError> {
        if role_of(&self.db, caller_id).await? != Role::Customer {
            return Err(DomainError::forbidden(
                "Only customers can place orders.",
            ));
        }

        let detail = offer_details::Entity::find_by_id(offer_detail_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer detail"))?;
        let offer = offers::Entity::find_by_id(detail.offer_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;

        let now = Utc::now();
        let order = orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_user_id: Set(caller_id),
            business_user_id: Set(offer.user_id),
            title: Set(detail.title),
            revisions: Set(detail.revisions),
            delivery_time_in_days: Set(detail.delivery_time_in_days),
            price: Set(detail.price),
            features: Set(detail.features),
            offer_type: Set(detail.offer_type),
            status: Set(OrderStatus::InProgress),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(OrderDto::from(order))
    }

    /// Orders where the caller sits on either side of the deal.
    #[instrument(skip(self), fields(caller_id = %caller_id))]
    pub async fn list_for(&self, caller_id: Uuid) -> Result<Vec<OrderDto>, DomainError> {
        let rows = orders::Entity::find()
            .filter(
                Condition::any()
                    .add(orders::Column::CustomerUserId.eq(caller_id))
                    .add(orders::Column::BusinessUserId.eq(caller_id)),
            )
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(OrderDto::from).collect())
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, order_id = %order_id))]
    pub async fn get(&self, caller_id: Uuid, order_id: Uuid) -> Result<OrderDto, DomainError> {
        let order = self.load_for_participant(caller_id, order_id).await?;
        Ok(OrderDto::from(order))
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, order_id = %order_id))]
    pub async fn update_status(
        &self,
        caller_id: Uuid,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderDto, DomainError> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;
        if order.business_user_id != caller_id {
            return Err(DomainError::forbidden(
                "Only the business partner can update an order's status.",
            ));
        }

        let mut active: orders::ActiveModel = order.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        let order = active.update(&self.db).await?;
        Ok(OrderDto::from(order))
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, order_id = %order_id))]
    pub async fn delete(&self, caller_id: Uuid, order_id: Uuid) -> Result<(), DomainError> {
        let caller = users::Entity::find_by_id(caller_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::Unauthorized("unknown user".to_owned()))?;
        if !caller.is_staff {
            return Err(DomainError::forbidden("Only staff can delete orders."));
        }

        let order = orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;
        order.delete(&self.db).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(business_user_id = %business_user_id))]
    pub async fn count_with_status(
        &self,
        business_user_id: Uuid,
        status: OrderStatus,
    ) -> Result<u64, DomainError> {
        match role_of(&self.db, business_user_id).await {
            Ok(Role::Business) => {}
            Ok(Role::Customer) | Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::not_found("Business user"));
            }
            Err(other) => return Err(other),
        }
        let count = orders::Entity::find()
            .filter(orders::Column::BusinessUserId.eq(business_user_id))
            .filter(orders::Column::Status.eq(status))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn load_for_participant(
        &self,
        caller_id: Uuid,
        order_id: Uuid,
    ) -> Result<orders::Model, DomainError> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;
        if order.customer_user_id != caller_id && order.business_user_id != caller_id {
            return Err(DomainError::forbidden(
                "You are not a participant of this order.",
            ));
        }
        Ok(order)
    }
}
