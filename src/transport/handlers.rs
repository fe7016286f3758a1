//! Transport API Handlers
//!
//! HTTP endpoints that expose cache groups to the network: the internode
//! fetch route used by peers and the public read/stats routes used by
//! clients. Handlers resolve the target group from the request path via the
//! process-wide registry.

use axum::{
    Json, Router,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use super::protocol::{DEFAULT_BASE_PATH, FetchResponse};
use crate::group::group::{CacheError, get_group};

/// Builds the routes served by every cache node.
pub fn router() -> Router {
    Router::new()
        .route(
            &format!("{}:group/:key", DEFAULT_BASE_PATH),
            get(handle_peer_fetch),
        )
        .route("/api/:group/:key", get(handle_client_get))
        .route("/api/stats/:group", get(handle_group_stats))
}

/// Internode fetch endpoint.
///
/// Called by the peer that received a client request for a key this node
/// owns. Responds with the bincode-encoded value as an octet stream; any
/// cache error becomes a plain-text non-success response.
pub async fn handle_peer_fetch(Path((group_name, key)): Path<(String, String)>) -> Response {
    let Some(group) = get_group(&group_name) else {
        let e = CacheError::NoSuchGroup(group_name);
        return (StatusCode::NOT_FOUND, e.to_string()).into_response();
    };

    tracing::debug!("FETCH: group {:?} key {:?}", group.name(), key);

    match group.get(&key).await {
        Ok(view) => {
            let message = FetchResponse { value: view.to_vec() };
            match bincode::serialize(&message) {
                Ok(body) => (
                    [(header::CONTENT_TYPE, "application/octet-stream")],
                    body,
                )
                    .into_response(),
                Err(e) => {
                    tracing::error!("FETCH: failed to encode response: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
                }
            }
        }
        Err(e) => cache_error_response(e),
    }
}

/// Public read endpoint: returns the raw value bytes for a key.
pub async fn handle_client_get(Path((group_name, key)): Path<(String, String)>) -> Response {
    let Some(group) = get_group(&group_name) else {
        let e = CacheError::NoSuchGroup(group_name);
        return (StatusCode::NOT_FOUND, e.to_string()).into_response();
    };

    match group.get(&key).await {
        Ok(view) => (
            [(header::CONTENT_TYPE, "application/octet-stream")],
            view.to_vec(),
        )
            .into_response(),
        Err(e) => cache_error_response(e),
    }
}

/// Public stats endpoint: resident entries and bytes for one group.
pub async fn handle_group_stats(Path(group_name): Path<String>) -> Response {
    let Some(group) = get_group(&group_name) else {
        let e = CacheError::NoSuchGroup(group_name);
        return (StatusCode::NOT_FOUND, e.to_string()).into_response();
    };

    Json(json!({
        "group": group.name(),
        "entries": group.cache_len(),
        "bytes": group.cache_bytes(),
    }))
    .into_response()
}

fn cache_error_response(e: CacheError) -> Response {
    let status = match e {
        CacheError::KeyRequired => StatusCode::BAD_REQUEST,
        CacheError::NoSuchGroup(_) => StatusCode::NOT_FOUND,
        CacheError::Load { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string()).into_response()
}
