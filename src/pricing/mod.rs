//! Fare estimation: tariffs, price breakdowns, coupons and display formatting.

pub mod coupon;
pub mod estimate;
pub mod format;
pub mod tariff;

pub use coupon::{CatalogError, Coupon, CouponBook, CouponError, DiscountType};
pub use estimate::{estimate_fare, estimate_for_distance, PriceEstimate};
pub use format::{format_price, CurrencyFormatter, GroupedFormatter, Numerals};
pub use tariff::{TariffConfig, TariffError};
