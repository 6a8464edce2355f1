use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::pricing::{GroupedFormatter, Numerals, TariffConfig};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub tariff: TariffConfig,
    pub currency_label: String,
    pub currency_numerals: Numerals,
    pub coupons_path: Option<String>,
    pub rate_limit_per_ms: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TariffConfig::default();
        let tariff = TariffConfig {
            base_fare: parse_or(&lookup, "TARIFF_BASE_FARE", defaults.base_fare)?,
            per_km_rate: parse_or(&lookup, "TARIFF_PER_KM_RATE", defaults.per_km_rate)?,
            per_minute_rate: parse_or(&lookup, "TARIFF_PER_MINUTE_RATE", defaults.per_minute_rate)?,
            minimum_fare: parse_or(&lookup, "TARIFF_MINIMUM_FARE", defaults.minimum_fare)?,
            average_speed_kmh: parse_or(
                &lookup,
                "TARIFF_AVERAGE_SPEED_KMH",
                defaults.average_speed_kmh,
            )?,
            rounding_unit: parse_or(&lookup, "TARIFF_ROUNDING_UNIT", defaults.rounding_unit)?,
        };
        tariff.validate()?;

        let currency_numerals = match lookup("CURRENCY_NUMERALS").as_deref() {
            None | Some("latin") => Numerals::Latin,
            Some("arabic") => Numerals::Arabic,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "CURRENCY_NUMERALS must be 'latin' or 'arabic', got '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", 3000)?,
            tariff,
            currency_label: lookup("CURRENCY_LABEL").unwrap_or_else(|| "IQD".to_string()),
            currency_numerals,
            coupons_path: lookup("COUPONS_PATH").filter(|p| !p.is_empty()),
            rate_limit_per_ms: parse_or(&lookup, "RATE_LIMIT_PER_MS", 60)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 100)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn formatter(&self) -> GroupedFormatter {
        GroupedFormatter {
            numerals: self.currency_numerals,
            label: self.currency_label.clone(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}
