use std::net::SocketAddr;

use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ride_fare_service::{
    config::Config,
    middleware::{rate_limit::with_public_rate_limit, request_log::log_request},
    pricing::CouponBook,
    routes, AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ride_fare_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!(
        base_fare = config.tariff.base_fare,
        per_km_rate = config.tariff.per_km_rate,
        minimum_fare = config.tariff.minimum_fare,
        "Tariff loaded"
    );

    let coupons = match &config.coupons_path {
        Some(path) => {
            let book = CouponBook::load(path).expect("Failed to load coupons");
            tracing::info!("Loaded {} coupons from {}", book.len(), path);
            book
        }
        None => {
            tracing::info!("No COUPONS_PATH set, coupons disabled");
            CouponBook::default()
        }
    };

    let state = AppState::new(config.clone(), coupons);

    // Create router with middleware
    let app = with_public_rate_limit(routes::create_router(state), &config)
        .expect("Invalid rate limit configuration")
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    // Start server with socket address for rate limiting
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
