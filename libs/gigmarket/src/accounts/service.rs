use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{password, token::TokenService};
use crate::error::DomainError;
use crate::infra::entities::{profiles, users};

use super::dto::{AuthResponse, LoginRequest, RegistrationRequest};

/// Registration and login. User and profile rows are written atomically;
/// the login error never distinguishes a bad username from a bad password.
#[derive(Clone)]
pub struct AccountsService {
    db: DatabaseConnection,
    tokens: TokenService,
}

impl AccountsService {
    pub fn new(db: DatabaseConnection, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn register(&self, req: RegistrationRequest) -> Result<AuthResponse, DomainError> {
        let username = req.username.trim().to_owned();
        let email = req.email.trim().to_owned();

        if username.is_empty() {
            return Err(DomainError::validation("username", "Username is required."));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email", "Enter a valid email address."));
        }
        if req.password.is_empty() {
            return Err(DomainError::validation("password", "Password is required."));
        }
        if req.password != req.repeated_password {
            return Err(DomainError::validation(
                "repeated_password",
                "Passwords do not match.",
            ));
        }

        let username_taken = users::Entity::find()
            .filter(users::Column::Username.eq(&username))
            .one(&self.db)
            .await?
            .is_some();
        if username_taken {
            return Err(DomainError::validation(
                "username",
                "A user with that username already exists.",
            ));
        }

        let email_taken = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.db)
            .await?
            .is_some();
        if email_taken {
            return Err(DomainError::validation(
                "email",
                "A user with that email already exists.",
            ));
        }

        let password_hash = password::hash(&req.password)?;
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let role = req.role;

        let (username, email) = self
            .db
            .transaction::<_, (String, String), DomainError>(move |txn| {
                Box::pin(async move {
                    let user = users::ActiveModel {
                        id: ActiveValue::Set(user_id),
                        username: ActiveValue::Set(username),
                        email: ActiveValue::Set(email),
                        password_hash: ActiveValue::Set(password_hash),
                        first_name: ActiveValue::Set(String::new()),
                        last_name: ActiveValue::Set(String::new()),
                        is_staff: ActiveValue::Set(false),
                        created_at: ActiveValue::Set(now),
                    }
                    .insert(txn)
                    .await?;

                    profiles::ActiveModel {
                        user_id: ActiveValue::Set(user_id),
                        role: ActiveValue::Set(role),
                        file: ActiveValue::Set(None),
                        location: ActiveValue::Set(None),
                        tel: ActiveValue::Set(None),
                        description: ActiveValue::Set(None),
                        working_hours: ActiveValue::Set(None),
                        created_at: ActiveValue::Set(now),
                    }
                    .insert(txn)
                    .await?;

                    Ok((user.username, user.email))
                })
            })
            .await?;

        let token = self.tokens.issue(user_id)?;
        info!(user_id = %user_id, "registered new user");

        Ok(AuthResponse {
            token,
            username,
            email,
            user_id,
        })
    }

    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, DomainError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(req.username.as_str()))
            .one(&self.db)
            .await?;

        // Same error either way so usernames cannot be enumerated.
        let invalid =
            || DomainError::validation("non_field_errors", "Invalid credentials.");

        let user = user.ok_or_else(invalid)?;
        if !password::verify(&req.password, &user.password_hash) {
            return Err(invalid());
        }

        let token = self.tokens.issue(user.id)?;
        Ok(AuthResponse {
            token,
            username: user.username,
            email: user.email,
            user_id: user.id,
        })
    }
}
