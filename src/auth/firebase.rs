//! Identity-provider client implementing the [`TokenVerifier`] port.
//!
//! Resolves identity tokens through the provider's `accounts:lookup`
//! endpoint. Verification failures of any kind (bad token, network error,
//! malformed response) collapse into [`ApiError::Unauthorized`] — the
//! caller only learns that access was denied.

use async_trait::async_trait;
use serde::Deserialize;

use super::TokenVerifier;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    email: Option<String>,
}

/// Token verifier backed by the Google identity toolkit REST API.
#[derive(Clone)]
pub struct FirebaseVerifier {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl std::fmt::Debug for FirebaseVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseVerifier")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl FirebaseVerifier {
    /// Creates a new verifier. `api_base` has no trailing slash.
    #[must_use]
    pub fn new(api_base: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            api_key,
        }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(format!(
                "{}/v1/accounts:lookup?key={}",
                self.api_base, self.api_key
            ))
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "identity provider unreachable");
                ApiError::Unauthorized
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "identity token rejected");
            return Err(ApiError::Unauthorized);
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "malformed identity lookup response");
            ApiError::Unauthorized
        })?;

        lookup
            .users
            .into_iter()
            .next()
            .and_then(|user| user.email)
            .ok_or(ApiError::Unauthorized)
    }
}
