pub mod coupon;
pub mod fare;
