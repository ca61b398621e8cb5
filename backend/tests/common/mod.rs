//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. Stores are
//! in-memory, so every `TestApp` is fully isolated and nothing external
//! is required.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use gatehouse_backend::config::AppConfig;
use gatehouse_backend::repositories::{MemorySessionStore, MemoryUserStore};
use gatehouse_backend::{routes, state::AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a new test application backed by fresh in-memory stores
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemorySessionStore::new(Duration::hours(1))),
            test_config(),
        );
        let app = routes::create_router(state);

        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let (status, _, body) = self.request("GET", path, None, None).await;
        (status, body)
    }

    /// Make a GET request carrying a session cookie
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> (StatusCode, String) {
        let (status, _, body) = self.request("GET", path, None, Some(cookie)).await;
        (status, body)
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let (status, _, body) = self.request("POST", path, Some(body), None).await;
        (status, body)
    }

    /// Make a POST request and also return any Set-Cookie header
    pub async fn post_returning_cookie(
        &self,
        path: &str,
        body: &str,
    ) -> (StatusCode, Option<String>, String) {
        self.request("POST", path, Some(body), None).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        cookie: Option<&str>,
    ) -> (StatusCode, Option<String>, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie.to_string());
        }
        let request = builder
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(bytes.to_vec()).unwrap();

        (status, set_cookie, body_str)
    }
}

/// Extract the `name=value` pair from a Set-Cookie header for replay on
/// later requests
pub fn session_cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    // Minimum bcrypt cost keeps the suite fast
    config.auth.bcrypt_cost = 4;
    config
}
