//! Test harness driving the router in-process with a scripted AI provider.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use osint_core::kernel::MockAI;
use osint_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1_048_576;

/// Router plus a handle on the mock it was built with.
pub struct TestHarness {
    pub app: Router,
    pub ai: MockAI,
}

impl TestHarness {
    pub fn new(ai: MockAI) -> Self {
        // Respect RUST_LOG when debugging: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let app = build_app(Arc::new(ai.clone()));
        Self { app, ai }
    }

    /// POST a JSON body and return status plus parsed response.
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
    }

    /// POST raw bytes with the given content type.
    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router call");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        let json = serde_json::from_slice(&bytes).expect("parse json");
        (status, json)
    }
}
