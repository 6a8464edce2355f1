pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pricing;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use pricing::{CouponBook, GroupedFormatter};

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub formatter: GroupedFormatter,
    pub coupons: Arc<CouponBook>,
}

impl AppState {
    pub fn new(config: Config, coupons: CouponBook) -> Self {
        Self {
            formatter: config.formatter(),
            config,
            coupons: Arc::new(coupons),
        }
    }
}
