use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::errors::DomainError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
    DomainError(DomainError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::DomainError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, retryable) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
            }
            ApiError::DomainError(err) => domain_error_response(err),
        };

        let mut body = json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let Some(retryable) = retryable {
            body["retryable"] = json!(retryable);
        }

        (status, Json(body)).into_response()
    }
}

/// Maps a `DomainError` to the status code the client or tick scheduler
/// should act on. `Transient` carries a `retryable` flag through to the
/// response body: the tick scheduler retries auto-picks on its own, a human
/// client decides for itself whether to resubmit.
fn domain_error_response(err: DomainError) -> (StatusCode, String, Option<bool>) {
    match err {
        DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
        DomainError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, None),
        DomainError::DuplicateEntry(msg) => (StatusCode::CONFLICT, msg, None),
        DomainError::InvalidState(msg) => (StatusCode::BAD_REQUEST, msg, None),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
        DomainError::PlayerAlreadyDrafted(msg) => (StatusCode::CONFLICT, msg, None),
        DomainError::DeadlinePassed(msg) => (StatusCode::BAD_REQUEST, msg, None),
        DomainError::PickConflict(msg) => (StatusCode::CONFLICT, msg, None),
        DomainError::Transient { message, retryable } => {
            tracing::warn!(error = %message, retryable, "transient error");
            (StatusCode::SERVICE_UNAVAILABLE, message, Some(retryable))
        }
        DomainError::DatabaseError(msg) => {
            tracing::error!(error = %msg, "database error");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
        }
        DomainError::InternalError(msg) => {
            tracing::error!(error = %msg, "internal error");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ApiError::NotFound("draft not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_error() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_domain_validation_error_conversion() {
        let domain_err = DomainError::ValidationError("invalid data".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_entry_error() {
        let domain_err = DomainError::DuplicateEntry("pick already made".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_forbidden_error() {
        let domain_err = DomainError::Forbidden("not your pick".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_error() {
        let domain_err = DomainError::Conflict("no eligible autopick target".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_player_already_drafted_error() {
        let domain_err = DomainError::PlayerAlreadyDrafted("player already drafted".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_deadline_passed_error_is_bad_request() {
        let domain_err = DomainError::DeadlinePassed("pick deadline has passed".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pick_conflict_error_is_conflict() {
        let domain_err = DomainError::PickConflict("expected pick number mismatch".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_transient_error_is_service_unavailable() {
        let domain_err = DomainError::transient("database pool exhausted");
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_database_error_is_internal() {
        let domain_err = DomainError::DatabaseError("connection reset".to_string());
        let api_error = ApiError::from(domain_err);
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
