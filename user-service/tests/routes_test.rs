mod common;

use axum::http::StatusCode;
use chrono::DateTime;
use common::{get, send, test_state};
use user_service::{build_router, SERVICE_NAME, SERVICE_VERSION};

#[tokio::test]
async fn health_reports_ok_with_metadata() {
    let res = send(build_router(test_state()), get("/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["service"], SERVICE_NAME);
    assert_eq!(res.body["version"], SERVICE_VERSION);
    assert_eq!(res.body["environment"], "test");

    let timestamp = res.body["timestamp"].as_str().expect("timestamp is a string");
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn root_lists_endpoints() {
    let res = send(build_router(test_state()), get("/")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["service"], "user-service");
    assert_eq!(res.body["version"], SERVICE_VERSION);
    assert!(res.body["message"].as_str().unwrap().contains(SERVICE_NAME));
    assert_eq!(res.body["endpoints"]["health"], "/health");
    assert_eq!(res.body["endpoints"]["api"], "/api/v1/user-service");
    assert_eq!(res.body["endpoints"]["status"], "/api/v1/user-service/status");
}

#[tokio::test]
async fn api_overview_is_operational() {
    let res = send(build_router(test_state()), get("/api/v1/user-service")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["service"], SERVICE_NAME);
    assert_eq!(res.body["data"]["status"], "operational");
    assert_eq!(
        res.body["data"]["features"],
        serde_json::json!(["health-check", "basic-api", "logging"])
    );
    assert!(res.body["timestamp"].is_string());
}

#[tokio::test]
async fn status_reports_uptime_and_memory() {
    let res = send(build_router(test_state()), get("/api/v1/user-service/status")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["service"], SERVICE_NAME);
    assert_eq!(res.body["status"], "running");

    let uptime = res.body["uptime"].as_f64().expect("uptime is numeric");
    assert!(uptime >= 0.0);

    assert!(res.body["memory"]["rss"].as_u64().unwrap() > 0);
    assert!(res.body["memory"]["virtual"].is_u64());
    assert!(res.body["memory"]["heapUsed"].as_u64().unwrap() > 0);
    assert!(res.body["timestamp"].is_string());
}

#[tokio::test]
async fn uptime_grows_between_requests() {
    let app = build_router(test_state());

    let first = send(app.clone(), get("/api/v1/user-service/status")).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second = send(app, get("/api/v1/user-service/status")).await;

    assert!(second.body["uptime"].as_f64().unwrap() > first.body["uptime"].as_f64().unwrap());
}

#[tokio::test]
async fn every_response_carries_security_headers_and_request_id() {
    let app = build_router(test_state());

    for uri in ["/", "/health", "/api/v1/user-service", "/does-not-exist"] {
        let res = send(app.clone(), get(uri)).await;

        assert_eq!(res.headers["x-content-type-options"], "nosniff", "{}", uri);
        assert_eq!(res.headers["x-frame-options"], "DENY", "{}", uri);
        assert!(res.headers.contains_key("content-security-policy"), "{}", uri);
        assert!(res.headers.contains_key("x-request-id"), "{}", uri);
        assert!(
            res.headers["content-type"]
                .to_str()
                .unwrap()
                .starts_with("application/json"),
            "{}",
            uri
        );
    }
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("Origin", "http://frontend.test")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = send(build_router(test_state()), request).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["access-control-allow-origin"], "*");
}
