//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::persistence::ContestStore;
use crate::service::OrderService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor. Every collaborator is a trait object so tests can
/// assemble the state from fakes.
#[derive(Clone)]
pub struct AppState {
    /// Storage port for all collections.
    pub store: Arc<dyn ContestStore>,
    /// Checkout and reconciliation service.
    pub orders: Arc<OrderService>,
    /// Identity-token verifier for auth-gated routes.
    pub verifier: Arc<dyn TokenVerifier>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
