//! Bearer token issue/verify.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// Signs and verifies the opaque bearer tokens handed out at
/// registration and login. The token carries only the user id; roles are
/// always read from the profile row.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    /// Fails only if HMAC signing itself fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + i64::try_from(self.ttl_secs).unwrap_or(i64::MAX),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    /// `Unauthorized` for expired, malformed, or wrongly signed tokens.
    pub fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|_| DomainError::Unauthorized("Invalid or expired token.".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("test-secret".to_owned()), 3600)
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let token = svc.issue(user_id).unwrap();
        assert_eq!(svc.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let svc = service();
        let err = svc.verify("not-a-token").unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = TokenService::new(&SecretString::from("other-secret".to_owned()), 3600);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(service().verify(&token).is_err());
    }
}
