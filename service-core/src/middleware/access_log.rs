//! Per-request access logging in the Apache "combined" format.
//!
//! Each request produces one `tracing` event on the `access_log` target. The event
//! carries the individual fields for structured sinks and the rendered combined line
//! as its message for operators tailing plain logs.

use crate::middleware::tracing::RequestId;
use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, Method, Uri, Version, header},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

pub const ACCESS_LOG_TARGET: &str = "access_log";

#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: Option<IpAddr>,
    pub received_at: DateTime<Utc>,
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub status: u16,
    pub content_length: Option<u64>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remote = self
            .remote_addr
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        let length = self
            .content_length
            .map(|len| len.to_string())
            .unwrap_or_else(|| "-".to_string());

        write!(
            f,
            "{} - - [{}] \"{} {} {:?}\" {} {} \"{}\" \"{}\"",
            remote,
            self.received_at.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.uri,
            self.version,
            self.status,
            length,
            self.referrer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn response_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact())
}

pub async fn access_log_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let received_at = Utc::now();

    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let referrer = header_string(req.headers(), header::REFERER);
    let user_agent = header_string(req.headers(), header::USER_AGENT);

    let response = next.run(req).await;
    let latency = start.elapsed();

    let entry = AccessLogEntry {
        remote_addr,
        received_at,
        method,
        uri,
        version,
        status: response.status().as_u16(),
        content_length: response_length(&response),
        referrer,
        user_agent,
    };

    tracing::info!(
        target: ACCESS_LOG_TARGET,
        request_id = %request_id,
        method = %entry.method,
        path = %entry.uri.path(),
        status = entry.status,
        latency_ms = latency.as_secs_f64() * 1000.0,
        "{}",
        entry
    );

    response
}
