//! Request extractors: authenticated caller and problem-mapped JSON bodies.

use axum::Json;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use axum::http::header;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::problem::Problem;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Carries only the user id; role and ownership checks hit the
/// database in the services.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                Problem::unauthorized("Authentication credentials were not provided.")
            })?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| Problem::unauthorized("Invalid authorization header."))?;

        let tokens = TokenService::from_ref(state);
        let id = tokens.verify(token).map_err(Problem::from)?;
        Ok(Self { id })
    }
}

/// `Json<T>` that reports malformed bodies as a 400 validation problem
/// instead of axum's default rejection.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(Problem::validation("body", rejection.body_text())),
        }
    }
}
