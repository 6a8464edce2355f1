use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::pricing::{CurrencyFormatter, DiscountType};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub order_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct CouponResponse {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub discount: i64,
    pub final_price: i64,
    pub formatted_discount: String,
}

/// Check a coupon against an order amount without redeeming it
pub async fn validate_coupon(
    State(state): State<AppState>,
    Json(payload): Json<ValidateCouponRequest>,
) -> AppResult<Json<CouponResponse>> {
    if payload.order_amount < 0 {
        return Err(AppError::BadRequest(
            "Order amount must not be negative".to_string(),
        ));
    }

    let coupon = state
        .coupons
        .redeemable(&payload.code, payload.order_amount, Utc::now())
        .inspect_err(|err| tracing::debug!(code = %payload.code, "Coupon rejected: {}", err))?;

    let discount = coupon.discount(payload.order_amount);

    Ok(Json(CouponResponse {
        code: coupon.code.clone(),
        discount_type: coupon.discount_type,
        discount_value: coupon.discount_value,
        expires_at: coupon.expires_at,
        discount,
        final_price: coupon.final_price(payload.order_amount),
        formatted_discount: state.formatter.format(discount),
    }))
}
