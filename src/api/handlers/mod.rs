//! REST endpoint handlers organized by resource.

pub mod contests;
pub mod drafts;
pub mod payments;
pub mod submissions;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(contests::routes())
        .merge(drafts::routes())
        .merge(submissions::routes())
        .merge(payments::routes())
}
