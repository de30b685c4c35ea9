// tests/support/helpers.rs
use std::sync::Arc;

use super::mocks;
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use stockroom::application::ports::{security::TokenManager, time::Clock};
use stockroom::application::services::{ApplicationServices, AuditRecorder};
use stockroom::domain::audit::AuditLogRepository;
use stockroom::infrastructure::repositories::InMemoryStore;
use stockroom::presentation::http::{routes::build_router, state::HttpState};
use tower::util::ServiceExt as _;

/// Router wired to an in-memory store, plus handles tests need to inspect it.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::build(store.clone(), store, 64)
    }

    /// Same wiring, but audit entries go to `audit_repo` through a queue of `capacity`.
    pub fn with_audit_store(audit_repo: Arc<dyn AuditLogRepository>, capacity: usize) -> Self {
        Self::build(Arc::new(InMemoryStore::new()), audit_repo, capacity)
    }

    fn build(
        store: Arc<InMemoryStore>,
        audit_repo: Arc<dyn AuditLogRepository>,
        capacity: usize,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(mocks::FixedClock);
        let token_manager: Arc<dyn TokenManager> = Arc::new(mocks::DummyTokenManager);

        let (audit_recorder, _worker) = AuditRecorder::spawn(Arc::clone(&audit_repo), Arc::clone(&clock), capacity);

        let services = Arc::new(ApplicationServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::clone(&audit_repo),
            audit_recorder,
            token_manager,
            clock,
        ));

        let router = build_router(
            HttpState {
                services: Arc::clone(&services),
            },
            &["http://localhost:3000".to_string()],
        );

        Self {
            router,
            services,
            store,
        }
    }

    /// Send one request and decode the JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("expected JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, Some(mocks::ADMIN_TOKEN), body).await
    }

    /// Wait for queued audit entries to land in the store.
    pub async fn flush_audit(&self) {
        self.services.audit_recorder().flush().await;
    }

    /// Create a product through the API and return its id.
    pub async fn seed_product(&self, name: &str, stock: i32) -> i64 {
        let (status, body) = self
            .admin(
                Method::POST,
                "/api/v1/products",
                Some(serde_json::json!({ "name": name, "price": "12.50", "stock": stock })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "seed product failed: {body}");
        body["id"].as_i64().expect("product id")
    }

    pub async fn stock_of(&self, product_id: i64) -> i64 {
        let (status, body) = self.get(&format!("/api/v1/products/{product_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        body["stock"].as_i64().expect("stock")
    }
}

/// Assert an `{ "error": ... }` body with the expected status and message.
pub fn assert_error(actual: &(StatusCode, Value), expected_status: StatusCode, expected_error: &str) {
    let (status, body) = actual;
    assert_eq!(*status, expected_status, "unexpected status, body: {body}");
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(expected_error),
        "unexpected error body: {body}"
    );
}
