use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::entities::profiles::Role;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub repeated_password: String,
    /// Profile role, fixed for the lifetime of the account.
    #[serde(rename = "type")]
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by both registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub user_id: Uuid,
}
