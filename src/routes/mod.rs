use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{coupon, fare};
use crate::AppState;

/// Build the API router. Rate limiting and request logging need the peer
/// address, so they are layered on in `main` where the listener is known.
pub fn create_router(state: AppState) -> Router {
    let fare_routes = Router::new()
        .route("/health", get(fare::health))
        .route("/tariff", get(fare::get_tariff))
        .route("/distance", post(fare::distance))
        .route("/estimate", post(fare::estimate));

    let coupon_routes = Router::new().route("/validate", post(coupon::validate_coupon));

    Router::new()
        .nest("/api", fare_routes)
        .nest("/api/coupons", coupon_routes)
        .with_state(state)
}
