//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! No error is fatal to the process; each request is isolated.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses except 401 follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "not found: contest ...",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Fixed body returned for authentication failures.
#[derive(Debug, Serialize)]
pub struct UnauthorizedResponse {
    /// Always `"Unauthorized Access!"`.
    pub message: &'static str,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server/Upstream | 500 / 502                    |
/// | 4000–4999 | Payment         | 422 Unprocessable Entity     |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid bearer identity token.
    #[error("Unauthorized Access!")]
    Unauthorized,

    /// Referenced document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Checkout session exists but its status is not `complete`.
    #[error("payment not completed for session {0}")]
    PaymentIncomplete(String),

    /// An order for this transaction id has already been recorded.
    ///
    /// Raised by the storage layer's insert-or-fail guard; the
    /// reconciliation service converts it into the idempotent
    /// "already reconciled" response rather than surfacing it.
    #[error("order already exists for transaction {0}")]
    DuplicateOrder(String),

    /// Payment processor or identity provider call failed.
    #[error("upstream lookup failed: {0}")]
    UpstreamLookup(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Unauthorized => 401,
            Self::InvalidRequest(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::DuplicateOrder(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::UpstreamLookup(_) => 3002,
            Self::PaymentIncomplete(_) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateOrder(_) => StatusCode::CONFLICT,
            Self::PaymentIncomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamLookup(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Auth failures use the fixed body the clients key on.
        if matches!(self, Self::Unauthorized) {
            let mut response = axum::Json(UnauthorizedResponse {
                message: "Unauthorized Access!",
            })
            .into_response();
            *response.status_mut() = status;
            return response;
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("contest".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DuplicateOrder("pi_1".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::UpstreamLookup("timeout".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::PaymentIncomplete("cs_1".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn unauthorized_uses_fixed_message() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized Access!");
    }
}
