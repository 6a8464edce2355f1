use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Rate limit every route of `router` per client IP.
/// One token is replenished every `rate_limit_per_ms` milliseconds, up to
/// `rate_limit_burst` tokens.
pub fn with_public_rate_limit(router: Router, config: &Config) -> AppResult<Router> {
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.rate_limit_per_ms)
            .burst_size(config.rate_limit_burst)
            .finish()
            .ok_or_else(|| {
                AppError::Config(
                    "RATE_LIMIT_PER_MS and RATE_LIMIT_BURST must be positive".to_string(),
                )
            })?,
    );

    Ok(router.layer(GovernorLayer::new(governor_config).error_handler(rate_limit_error_handler)))
}

/// Turn governor rejections into the same JSON error shape as the handlers
pub fn rate_limit_error_handler(err: GovernorError) -> Response<Body> {
    let (status, message) = match err {
        GovernorError::TooManyRequests { wait_time, .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            format!("Too many requests, retry in {} seconds", wait_time),
        ),
        GovernorError::UnableToExtractKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unable to identify client".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Request rejected".to_string(),
        ),
    };

    let body = serde_json::json!({ "error": message }).to_string();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
