//! Application startup and lifecycle management.
//!
//! Builds the router (route table, fallback and middleware stack), binds the
//! listener and serves until SIGINT or SIGTERM.

use crate::config::UserServiceConfig;
use crate::error::panic_response;
use crate::handlers;
use crate::services::ProcessMonitor;
use crate::{API_PATH, HEALTH_PATH, SERVICE_NAME, STATUS_PATH};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    access_log::access_log_middleware, cors::cors_layer, metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use service_core::shutdown::shutdown_signal;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: UserServiceConfig,
    pub process: ProcessMonitor,
    started_at: Instant,
}

impl AppState {
    pub fn new(config: UserServiceConfig) -> Result<Self, AppError> {
        Ok(Self {
            config,
            process: ProcessMonitor::new()?,
            started_at: Instant::now(),
        })
    }

    /// Seconds elapsed since the state was created.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// The fixed route table plus the not-found fallback, without middleware.
///
/// Known paths only answer GET (and HEAD); any other method on them gets the
/// same 404 payload as an unknown path rather than a bare 405.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::service_info).fallback(handlers::not_found))
        .route(
            HEALTH_PATH,
            get(handlers::health_check).fallback(handlers::not_found),
        )
        .route(
            API_PATH,
            get(handlers::api_overview).fallback(handlers::not_found),
        )
        .route(
            STATUS_PATH,
            get(handlers::api_status).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
}

/// Applies the middleware stack to `router` and binds the state.
///
/// Panics are caught innermost so the 500 they produce still passes through
/// metrics, security headers, CORS and the access log.
pub fn with_middleware(router: Router<AppState>, state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    router
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(from_fn(access_log_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

pub fn build_router(state: AppState) -> Router {
    with_middleware(routes(), state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds a random free port, which tests rely on.
    pub async fn build(config: UserServiceConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::new(config)?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT or SIGTERM arrives.
    ///
    /// The serve future is dropped as soon as a signal is received: no new
    /// connections are accepted and in-flight requests are not drained.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        tracing::info!(port = self.port, "{} listening", SERVICE_NAME);
        tracing::info!("Health check: http://localhost:{}{}", self.port, HEALTH_PATH);
        tracing::info!("API: http://localhost:{}{}", self.port, API_PATH);

        let server = axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .into_future();

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(AppError::from(e));
                }
            }
            signal = shutdown_signal() => {
                let signal = signal?;
                tracing::info!(%signal, "Received {}, shutting down {}", signal, SERVICE_NAME);
            }
        }

        Ok(())
    }
}
