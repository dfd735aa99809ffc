// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidId(String),

    // 401 Unauthorized
    MissingToken(String),
    InvalidToken(String),

    // 403 Forbidden (authenticated but not entitled)
    Forbidden(String),

    // 404 Not Found
    NotFound(String),
    /// Record absent or owned by someone else; the two cases are merged on
    /// purpose so callers cannot probe for other users' records.
    NotFoundOrNotOwned(String),

    // 500 Internal Server Error (underlying store failure, detail logged only)
    StoreFailure,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotFoundOrNotOwned(_) => StatusCode::NOT_FOUND,
            ApiError::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidId(msg) => msg,
            ApiError::MissingToken(msg) => msg,
            ApiError::InvalidToken(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::NotFoundOrNotOwned(msg) => msg,
            ApiError::StoreFailure => "An error occurred while processing your request",
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::MissingToken(_) => "MISSING_TOKEN",
            ApiError::InvalidToken(_) => "INVALID_TOKEN",
            ApiError::Forbidden(_) => "FORBIDDEN",
            // Deliberately the same code as NotFound: the body must not reveal
            // whether the record exists under another owner.
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::NotFoundOrNotOwned(_) => "NOT_FOUND",
            ApiError::StoreFailure => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        ApiError::InvalidId(message.into())
    }

    pub fn missing_token(message: impl Into<String>) -> Self {
        ApiError::MissingToken(message.into())
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        ApiError::InvalidToken(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn not_found_or_not_owned(message: impl Into<String>) -> Self {
        ApiError::NotFoundOrNotOwned(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the real error but never leak store internals to clients
        tracing::error!("store error: {}", err);
        ApiError::StoreFailure
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => {
                ApiError::missing_token("Unauthorized access: No token provided")
            }
            AuthError::InvalidToken(reason) => {
                tracing::debug!("token rejected: {}", reason);
                ApiError::invalid_token("Unauthorized access: Invalid or expired token")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_not_owned_share_a_code() {
        let absent = ApiError::not_found("Bid not found");
        let foreign = ApiError::not_found_or_not_owned("Bid not found or not owned by user");
        assert_eq!(absent.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(absent.error_code(), foreign.error_code());
    }

    #[test]
    fn store_failure_message_is_generic() {
        let err = ApiError::StoreFailure;
        let body = err.to_json();
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "An error occurred while processing your request");
    }
}
