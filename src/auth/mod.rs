//! Bearer-token authentication: verifier port and request extractor.
//!
//! Token verification is delegated to an external identity provider; this
//! module only extracts the bearer token, asks the injected
//! [`TokenVerifier`] for the caller's email, and rejects with the fixed
//! 401 body on any failure.

pub mod firebase;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Port to the external identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verifies an identity token and returns the email it asserts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for any invalid, expired, or
    /// unverifiable token.
    async fn verify(&self, token: &str) -> Result<String, ApiError>;
}

/// Extractor that requires a verified bearer identity token.
///
/// ```rust,ignore
/// async fn my_contests(
///     AuthedUser { email }: AuthedUser,
/// ) -> impl IntoResponse { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct AuthedUser {
    /// Email asserted by the verified token.
    pub email: String,
}

impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let email = state.verifier.verify(token).await?;
        Ok(Self { email })
    }
}
