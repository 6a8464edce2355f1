use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::pricing::{estimate_fare, CurrencyFormatter, PriceEstimate, TariffConfig};
use crate::utils::geo::Coordinate;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl TripRequest {
    fn endpoints(&self) -> AppResult<(Coordinate, Coordinate)> {
        Ok((
            Coordinate::new(self.pickup_lat, self.pickup_lng)?,
            Coordinate::new(self.dropoff_lat, self.dropoff_lng)?,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub estimate: PriceEstimate,
    pub formatted_total: String,
    pub coupon_code: Option<String>,
    pub discount: i64,
    pub final_fare: i64,
    pub formatted_final: String,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Active tariff
pub async fn get_tariff(State(state): State<AppState>) -> Json<TariffConfig> {
    Json(state.config.tariff.clone())
}

/// Straight-line distance between pickup and dropoff
pub async fn distance(
    Json(payload): Json<TripRequest>,
) -> AppResult<Json<DistanceResponse>> {
    let (pickup, dropoff) = payload.endpoints()?;

    Ok(Json(DistanceResponse {
        distance_km: pickup.distance_km(&dropoff),
    }))
}

/// Price a trip, applying a coupon when one is given
pub async fn estimate(
    State(state): State<AppState>,
    Json(payload): Json<TripRequest>,
) -> AppResult<Json<EstimateResponse>> {
    let (pickup, dropoff) = payload.endpoints()?;
    let estimate = estimate_fare(&pickup, &dropoff, &state.config.tariff);

    let coupon = match payload.coupon_code.as_deref() {
        Some(code) if !code.trim().is_empty() => Some(
            state
                .coupons
                .redeemable(code, estimate.total_fare, Utc::now())?,
        ),
        _ => None,
    };
    let coupon_code = coupon.map(|c| c.code.clone());
    let discount = coupon.map_or(0, |c| c.discount(estimate.total_fare));
    let final_fare = coupon.map_or(estimate.total_fare, |c| c.final_price(estimate.total_fare));

    tracing::debug!(
        distance_km = estimate.distance_km,
        minutes = estimate.estimated_minutes,
        total_fare = estimate.total_fare,
        final_fare,
        coupon = ?coupon_code,
        "Fare estimated"
    );

    Ok(Json(EstimateResponse {
        formatted_total: state.formatter.format(estimate.total_fare),
        formatted_final: state.formatter.format(final_fare),
        estimate,
        coupon_code,
        discount,
        final_fare,
    }))
}
