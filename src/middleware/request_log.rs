use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Log each request against its route template (`/api/estimate`, not the raw
/// URI) with the outcome and how long the handler took.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(client_ip = %addr.ip(), %method, %route, "Rate limited");
        }
        s if s.is_server_error() => {
            tracing::error!(client_ip = %addr.ip(), %method, %route, %status, elapsed_ms, "Request failed");
        }
        s if s.is_client_error() => {
            tracing::info!(client_ip = %addr.ip(), %method, %route, %status, elapsed_ms, "Request rejected");
        }
        _ => {
            tracing::debug!(client_ip = %addr.ip(), %method, %route, %status, elapsed_ms, "Request completed");
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn request(uri: &str) -> Request {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        request
    }

    fn app() -> Router {
        Router::new()
            .route("/api/trips/{id}", get(|| async { "ok" }))
            .layer(middleware::from_fn(log_request))
    }

    #[tokio::test]
    async fn test_passes_responses_through() {
        let response = app().oneshot(request("/api/trips/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unmatched_routes_still_answer() {
        let response = app().oneshot(request("/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
