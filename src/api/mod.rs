//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted at the root, matching the paths the web
//! client already uses.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering the full HTTP surface.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::system::root_handler,
        handlers::system::health_handler,
        handlers::users::list_users,
        handlers::users::login,
        handlers::users::role,
        handlers::users::update_role,
        handlers::contests::create_contest,
        handlers::contests::list_contests,
        handlers::contests::get_contest,
        handlers::contests::my_contests,
        handlers::contests::search_contests,
        handlers::drafts::create_draft,
        handlers::drafts::list_drafts,
        handlers::drafts::get_draft,
        handlers::drafts::update_draft,
        handlers::drafts::update_draft_status,
        handlers::drafts::delete_draft,
        handlers::submissions::list_submissions,
        handlers::submissions::create_submission,
        handlers::submissions::get_submission,
        handlers::payments::create_checkout,
        handlers::payments::payment_success,
    ),
    components(schemas(
        crate::domain::User,
        crate::domain::Contest,
        crate::domain::ContestDraft,
        crate::domain::Submission,
        crate::domain::Order,
        dto::LoginRequest,
        dto::RoleResponse,
        dto::UpdateRoleRequest,
        dto::CreateContestRequest,
        dto::UpdateStatusRequest,
        dto::Participator,
        dto::CheckoutRequestDto,
        dto::CheckoutResponse,
        dto::PaymentSuccessRequest,
        dto::PaymentSuccessResponse,
    ))
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::util::ServiceExt;

    use crate::auth::TokenVerifier;
    use crate::error::ApiError;
    use crate::payments::{
        CheckoutRequest, CheckoutSession, PaymentProcessor, SessionMetadata, SessionStatus,
    };
    use crate::persistence::memory::MemoryStore;
    use crate::service::OrderService;

    #[derive(Debug, Default)]
    struct FakeProcessor {
        sessions: HashMap<String, CheckoutSession>,
    }

    #[async_trait]
    impl PaymentProcessor for FakeProcessor {
        async fn create_checkout(&self, _request: &CheckoutRequest) -> Result<String, ApiError> {
            Ok("https://pay.example/session".to_string())
        }

        async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, ApiError> {
            self.sessions
                .get(session_id)
                .cloned()
                .ok_or_else(|| ApiError::UpstreamLookup("unknown session".to_string()))
        }
    }

    /// Accepts exactly the token `"valid-token"` as `a@x.com`.
    #[derive(Debug)]
    struct FakeVerifier;

    #[async_trait]
    impl TokenVerifier for FakeVerifier {
        async fn verify(&self, token: &str) -> Result<String, ApiError> {
            if token == "valid-token" {
                Ok("a@x.com".to_string())
            } else {
                Err(ApiError::Unauthorized)
            }
        }
    }

    fn test_app(store: MemoryStore, processor: FakeProcessor) -> Router {
        let store: Arc<dyn crate::persistence::ContestStore> = Arc::new(store);
        let orders = Arc::new(OrderService::new(Arc::clone(&store), Arc::new(processor)));
        let state = AppState {
            store,
            orders,
            verifier: Arc::new(FakeVerifier),
        };
        build_router().with_state(state)
    }

    fn get_request(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let Ok(request) = builder.body(Body::empty()) else {
            panic!("request should build");
        };
        request
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request should build");
        };
        request
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body should be JSON");
        };
        value
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = test_app(MemoryStore::new(), FakeProcessor::default());
        let Ok(response) = app.oneshot(get_request("/health", None)).await else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("healthy"));
    }

    #[tokio::test]
    async fn role_without_token_is_unauthorized() {
        let app = test_app(MemoryStore::new(), FakeProcessor::default());
        let Ok(response) = app.oneshot(get_request("/users/role", None)).await else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(|v| v.as_str()),
            Some("Unauthorized Access!")
        );
    }

    #[tokio::test]
    async fn role_with_token_returns_user_role() {
        let store = MemoryStore::new();
        let app = test_app(store.clone(), FakeProcessor::default());

        use crate::persistence::ContestStore;
        let seeded = store.upsert_user("a@x.com", None, None).await;
        assert!(seeded.is_ok());

        let Ok(response) = app
            .oneshot(get_request("/users/role", Some("valid-token")))
            .await
        else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("role").and_then(|v| v.as_str()), Some("user"));
    }

    #[tokio::test]
    async fn login_upserts_user() {
        let app = test_app(MemoryStore::new(), FakeProcessor::default());
        let Ok(response) = app
            .oneshot(post_json("/users", r#"{"email":"new@x.com"}"#))
            .await
        else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("email").and_then(|v| v.as_str()), Some("new@x.com"));
        assert_eq!(body.get("role").and_then(|v| v.as_str()), Some("user"));
    }

    #[tokio::test]
    async fn unknown_contest_is_not_found() {
        let app = test_app(MemoryStore::new(), FakeProcessor::default());
        let Ok(response) = app
            .oneshot(get_request(
                "/contests/00000000-0000-0000-0000-000000000000",
                None,
            ))
            .await
        else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn payment_success_returns_wire_field_names() {
        let store = MemoryStore::new();
        let contest = crate::domain::Contest {
            id: uuid::Uuid::new_v4(),
            name: "Logo Design Battle".to_string(),
            contest_type: "design".to_string(),
            description: None,
            banner_image: None,
            creator_email: "creator@x.com".to_string(),
            price: rust_decimal_macros::dec!(25),
            participants: vec![],
            created_at: chrono::Utc::now(),
        };
        store.seed_contest(contest.clone()).await;

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            CheckoutSession {
                id: "cs_1".to_string(),
                status: SessionStatus::Complete,
                payment_intent: Some("pi_1".to_string()),
                amount_total: Some(2500),
                metadata: SessionMetadata {
                    contest_id: contest.id.to_string(),
                    participator: "a@x.com".to_string(),
                },
            },
        );

        let app = test_app(store, processor);
        let Ok(response) = app
            .oneshot(post_json("/payment-success", r#"{"sessionId":"cs_1"}"#))
            .await
        else {
            panic!("request should succeed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body.get("transactionId").and_then(|v| v.as_str()),
            Some("pi_1")
        );
        assert!(body.get("contestorderId").is_some());
    }
}
