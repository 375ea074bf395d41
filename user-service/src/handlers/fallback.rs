use crate::error::ApiError;
use axum::extract::OriginalUri;

/// Fallback for every method/path pair outside the route table.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    tracing::debug!(path = %path, "No route matched");
    ApiError::NotFound { path }
}
