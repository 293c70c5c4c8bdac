use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::DomainError;
use crate::infra::entities::{profiles, users};

use super::dto::{ProfileDto, ProfileListItemDto, ProfileUpdateRequest};

/// Look up a user's role. Authorization boundaries call this rather than
/// trusting anything carried in the request.
pub async fn role_of<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<profiles::Role, DomainError> {
    let profile = profiles::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Profile"))?;
    Ok(profile.role)
}

#[derive(Clone)]
pub struct ProfilesService {
    db: DatabaseConnection,
}

impl ProfilesService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get(&self, user_id: Uuid) -> Result<ProfileDto, DomainError> {
        debug!("fetching profile");
        let (user, profile) = self.load_pair(user_id).await?;
        Ok(ProfileDto::from_models(&user, &profile))
    }

    /// Owner-only partial update across the user and profile rows.
    #[instrument(skip(self, patch), fields(user_id = %user_id))]
    pub async fn update(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
        patch: ProfileUpdateRequest,
    ) -> Result<ProfileDto, DomainError> {
        if caller_id != user_id {
            return Err(DomainError::forbidden(
                "You may only edit your own profile.",
            ));
        }

        let (user, profile) = self.load_pair(user_id).await?;

        if let Some(email) = patch.email.as_deref().map(str::trim) {
            if email.is_empty() || !email.contains('@') {
                return Err(DomainError::validation("email", "Enter a valid email address."));
            }
            // Keep the unique index from surfacing as a 500.
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(email))
                .filter(users::Column::Id.ne(user_id))
                .one(&self.db)
                .await?
                .is_some();
            if taken {
                return Err(DomainError::validation(
                    "email",
                    "A user with that email already exists.",
                ));
            }
        }

        let (user, profile) = self
            .db
            .transaction::<_, (users::Model, profiles::Model), DomainError>(move |txn| {
                Box::pin(async move {
                    let mut user_update: users::ActiveModel = user.into();
                    if let Some(v) = patch.first_name {
                        user_update.first_name = ActiveValue::Set(v);
                    }
                    if let Some(v) = patch.last_name {
                        user_update.last_name = ActiveValue::Set(v);
                    }
                    if let Some(v) = patch.email {
                        user_update.email = ActiveValue::Set(v.trim().to_owned());
                    }
                    let user = user_update.update(txn).await?;

                    let mut profile_update: profiles::ActiveModel = profile.into();
                    if let Some(v) = patch.file {
                        profile_update.file = ActiveValue::Set(Some(v));
                    }
                    if let Some(v) = patch.location {
                        profile_update.location = ActiveValue::Set(Some(v));
                    }
                    if let Some(v) = patch.tel {
                        profile_update.tel = ActiveValue::Set(Some(v));
                    }
                    if let Some(v) = patch.description {
                        profile_update.description = ActiveValue::Set(Some(v));
                    }
                    if let Some(v) = patch.working_hours {
                        profile_update.working_hours = ActiveValue::Set(Some(v));
                    }
                    let profile = profile_update.update(txn).await?;

                    Ok((user, profile))
                })
            })
            .await?;

        info!("profile updated");
        Ok(ProfileDto::from_models(&user, &profile))
    }

    #[instrument(skip(self))]
    pub async fn list_by_role(
        &self,
        role: profiles::Role,
    ) -> Result<Vec<ProfileListItemDto>, DomainError> {
        let rows = profiles::Entity::find()
            .filter(profiles::Column::Role.eq(role))
            .order_by_desc(profiles::Column::CreatedAt)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(profile, user)| {
                user.map(|user| ProfileListItemDto::from_models(&user, &profile))
            })
            .collect())
    }

    async fn load_pair(
        &self,
        user_id: Uuid,
    ) -> Result<(users::Model, profiles::Model), DomainError> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile"))?;
        let profile = profiles::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile"))?;
        Ok((user, profile))
    }
}
