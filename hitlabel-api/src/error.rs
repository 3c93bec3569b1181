//! Error types for hitlabel-api
//!
//! Every handler returns [`ApiResult`]; nothing from the storage layer reaches
//! the transport uncaught. Bodies are always `{"error": "<message>"}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Primary result code SQLite uses for every constraint failure,
/// trigger aborts included
const SQLITE_CONSTRAINT: i32 = 19;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation failure (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource or route (404)
    #[error("{0}")]
    NotFound(String),

    /// Known route, unsupported method (405)
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Storage rejected the statement: constraint or trigger (400)
    #[error("{0}")]
    Constraint(String),

    /// Storage unreachable (500)
    #[error("{0}")]
    Unavailable(String),

    /// Anything else (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 400 naming every required field absent from a create payload
    pub fn missing_fields(fields: &[(&str, bool)]) -> Self {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect();
        ApiError::BadRequest(format!("Missing required fields: {}", missing.join(", ")))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Constraint(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unavailable(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if is_constraint(db_err.code().as_deref()) => {
                ApiError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => {
                ApiError::Unavailable(format!("Database connection error: {}", err))
            }
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            other => ApiError::Internal(format!("Database error: {}", other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        // A non-numeric id segment names no resource
        ApiError::NotFound("Endpoint not found".to_string())
    }
}

fn is_constraint(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| c & 0xff == SQLITE_CONSTRAINT)
        .unwrap_or(false)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = ApiError::missing_fields(&[("name", true), ("genre", false), ("nationality", true)]);
        assert_eq!(err.to_string(), "Missing required fields: name, nationality");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_constraint_codes() {
        assert!(is_constraint(Some("19")));
        assert!(is_constraint(Some("787"))); // foreign key
        assert!(is_constraint(Some("1555"))); // primary key
        assert!(is_constraint(Some("1811"))); // trigger
        assert!(!is_constraint(Some("1"))); // generic SQL error
        assert!(!is_constraint(Some("5"))); // busy
        assert!(!is_constraint(None));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Constraint("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MethodNotAllowed("x".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Unavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
