use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TariffError {
    #[error("Average speed must be a positive number, got {0}")]
    InvalidAverageSpeed(f64),
    #[error("Rounding unit must be positive, got {0}")]
    InvalidRoundingUnit(i64),
    #[error("{name} must be a non-negative number, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    NegativeFare { name: &'static str, value: i64 },
}

/// Pricing constants applied to a trip distance.
///
/// Amounts are whole currency units. A tariff is read-only once loaded and is
/// passed explicitly to the estimator, so several regimes (per city, per
/// vehicle class) can coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    pub base_fare: i64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub minimum_fare: i64,
    pub average_speed_kmh: f64,
    /// Totals are rounded up to a multiple of this
    pub rounding_unit: i64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            base_fare: 2500,
            per_km_rate: 750.0,
            per_minute_rate: 100.0,
            minimum_fare: 3000,
            average_speed_kmh: 30.0,
            rounding_unit: 250,
        }
    }
}

impl TariffConfig {
    /// Check the tariff once at load time so estimation never divides by zero
    pub fn validate(&self) -> Result<(), TariffError> {
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(TariffError::InvalidAverageSpeed(self.average_speed_kmh));
        }
        if self.rounding_unit <= 0 {
            return Err(TariffError::InvalidRoundingUnit(self.rounding_unit));
        }
        for (name, value) in [
            ("Per-km rate", self.per_km_rate),
            ("Per-minute rate", self.per_minute_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TariffError::InvalidRate { name, value });
            }
        }
        for (name, value) in [
            ("Base fare", self.base_fare),
            ("Minimum fare", self.minimum_fare),
        ] {
            if value < 0 {
                return Err(TariffError::NegativeFare { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tariff_is_valid() {
        let tariff = TariffConfig::default();
        assert_eq!(tariff.validate(), Ok(()));
        assert_eq!(tariff.base_fare, 2500);
        assert_eq!(tariff.minimum_fare, 3000);
        assert_eq!(tariff.rounding_unit, 250);
    }

    #[test]
    fn test_rejects_zero_or_negative_speed() {
        for speed in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let tariff = TariffConfig {
                average_speed_kmh: speed,
                ..Default::default()
            };
            assert!(matches!(
                tariff.validate(),
                Err(TariffError::InvalidAverageSpeed(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_rounding_unit() {
        let tariff = TariffConfig {
            rounding_unit: 0,
            ..Default::default()
        };
        assert_eq!(tariff.validate(), Err(TariffError::InvalidRoundingUnit(0)));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let tariff = TariffConfig {
            per_minute_rate: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tariff.validate(),
            Err(TariffError::InvalidRate { name: "Per-minute rate", .. })
        ));

        let tariff = TariffConfig {
            minimum_fare: -500,
            ..Default::default()
        };
        assert_eq!(
            tariff.validate(),
            Err(TariffError::NegativeFare {
                name: "Minimum fare",
                value: -500
            })
        );
    }
}
