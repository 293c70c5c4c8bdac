use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::entities::{profiles, users};

/// Full profile view. Optional text columns come out as empty strings;
/// that coercion lives here, not in the domain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub user: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub file: String,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    #[serde(rename = "type")]
    pub role: profiles::Role,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl ProfileDto {
    pub fn from_models(user: &users::Model, profile: &profiles::Model) -> Self {
        Self {
            user: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            file: profile.file.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
            tel: profile.tel.clone().unwrap_or_default(),
            description: profile.description.clone().unwrap_or_default(),
            working_hours: profile.working_hours.clone().unwrap_or_default(),
            role: profile.role,
            email: user.email.clone(),
            created_at: profile.created_at,
        }
    }
}

/// Partial profile update; the role is immutable and not accepted here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub file: Option<String>,
    pub location: Option<String>,
    pub tel: Option<String>,
    pub description: Option<String>,
    pub working_hours: Option<String>,
}

/// Compact entry for the business/customer list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileListItemDto {
    pub user: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub file: String,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    #[serde(rename = "type")]
    pub role: profiles::Role,
}

impl ProfileListItemDto {
    pub fn from_models(user: &users::Model, profile: &profiles::Model) -> Self {
        Self {
            user: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            file: profile.file.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
            tel: profile.tel.clone().unwrap_or_default(),
            description: profile.description.clone().unwrap_or_default(),
            working_hours: profile.working_hours.clone().unwrap_or_default(),
            role: profile.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixture() -> (users::Model, profiles::Model) {
        let user = users::Model {
            id: Uuid::new_v4(),
            username: "max".to_owned(),
            email: "max@example.com".to_owned(),
            password_hash: "x".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            created_at: Utc::now(),
        };
        let profile = profiles::Model {
            user_id: user.id,
            role: profiles::Role::Business,
            file: None,
            location: Some("Berlin".to_owned()),
            tel: None,
            description: None,
            working_hours: None,
            created_at: Utc::now(),
        };
        (user, profile)
    }

    #[test]
    fn null_columns_serialize_as_empty_strings() {
        let (user, profile) = fixture();
        let dto = ProfileDto::from_models(&user, &profile);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["tel"], "");
        assert_eq!(json["description"], "");
        assert_eq!(json["location"], "Berlin");
        assert_eq!(json["type"], "business");
    }
}
