#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config;
use tower::util::ServiceExt;
use user_service::config::UserServiceConfig;
use user_service::{AppState, Application};

pub fn test_config(port: u16) -> UserServiceConfig {
    UserServiceConfig {
        common: Config { port },
        environment: "test".to_string(),
        log_level: "error".to_string(),
        allowed_origins: vec!["*".to_string()],
        otlp_endpoint: None,
        metrics_port: None,
    }
}

pub fn test_state() -> AppState {
    AppState::new(test_config(0)).expect("Failed to build app state")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Sends one request through `app` in-process and decodes the JSON body
/// (`Null` when the body is empty or not JSON).
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("Request failed");
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.expect("Failed to read body").to_bytes();

    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Starts the full server on a random port and waits until it answers.
    pub async fn spawn() -> Self {
        let app = Application::build(test_config(0))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
