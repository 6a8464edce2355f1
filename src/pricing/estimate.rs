use serde::Serialize;

use crate::pricing::tariff::TariffConfig;
use crate::utils::geo::Coordinate;

/// Price breakdown for a single trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEstimate {
    /// Rounded to one decimal for display
    pub distance_km: f64,
    pub estimated_minutes: i64,
    pub base_fare: i64,
    pub distance_fare: i64,
    pub time_fare: i64,
    pub total_fare: i64,
}

/// Estimate the fare for a straight-line trip between two points
pub fn estimate_fare(
    pickup: &Coordinate,
    dropoff: &Coordinate,
    tariff: &TariffConfig,
) -> PriceEstimate {
    estimate_for_distance(pickup.distance_km(dropoff), tariff)
}

/// Apply a tariff to a distance in kilometers.
///
/// The unrounded distance drives minutes and fares; only the reported
/// `distance_km` is rounded. The tariff is expected to have passed
/// [`TariffConfig::validate`].
pub fn estimate_for_distance(distance_km: f64, tariff: &TariffConfig) -> PriceEstimate {
    let estimated_minutes = (distance_km / tariff.average_speed_kmh * 60.0).ceil() as i64;

    let base_fare = tariff.base_fare;
    let distance_fare = round_half_up(distance_km * tariff.per_km_rate);
    let time_fare = round_half_up(estimated_minutes as f64 * tariff.per_minute_rate);

    let raw_total = base_fare
        .saturating_add(distance_fare)
        .saturating_add(time_fare);
    let total_fare = round_up_to_unit(raw_total.max(tariff.minimum_fare), tariff.rounding_unit);

    PriceEstimate {
        distance_km: (distance_km * 10.0).round() / 10.0,
        estimated_minutes,
        base_fare,
        distance_fare,
        time_fare,
        total_fare,
    }
}

/// Round to the nearest integer, halves towards positive infinity.
/// The `as` cast maps NaN to 0 and clamps out-of-range values to the i64 bounds.
pub(crate) fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}

/// Smallest multiple of `unit` not below `amount`, or the largest multiple
/// that fits in an i64 when that would overflow.
fn round_up_to_unit(amount: i64, unit: i64) -> i64 {
    let remainder = amount.rem_euclid(unit);
    if remainder == 0 {
        return amount;
    }
    amount
        .checked_add(unit - remainder)
        .unwrap_or(amount - remainder)
}
