//! Domain error taxonomy shared by every service.

use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

use crate::problem::Problem;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or inconsistent input (400).
    #[error("validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed for this role/ownership (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity absent (404).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Storage failure (500); detail is never surfaced to the caller.
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// Unexpected failure outside the storage layer (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

impl From<TransactionError<DomainError>> for DomainError {
    fn from(e: TransactionError<DomainError>) -> Self {
        match e {
            TransactionError::Connection(err) => Self::Database(err),
            TransactionError::Transaction(err) => err,
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => Problem::validation(field, message),
            DomainError::Unauthorized(msg) => Problem::unauthorized(msg),
            DomainError::Forbidden(msg) => Problem::forbidden(msg),
            DomainError::NotFound { entity } => Problem::not_found(format!("{entity} not found.")),
            DomainError::Database(err) => {
                tracing::error!(error = ?err, "database error");
                Problem::internal_error("An internal error occurred.")
            }
            DomainError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                Problem::internal_error("An internal error occurred.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn maps_to_expected_status_codes() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (
                DomainError::validation("rating", "out of range"),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Unauthorized("missing token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::forbidden("not the owner"),
                StatusCode::FORBIDDEN,
            ),
            (DomainError::not_found("Offer"), StatusCode::NOT_FOUND),
            (
                DomainError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let problem: Problem = err.into();
            assert_eq!(problem.status, status);
        }
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let problem: Problem = DomainError::Database(DbErr::Custom("secret dsn".into())).into();
        assert!(!problem.detail.contains("secret"));
    }
}
