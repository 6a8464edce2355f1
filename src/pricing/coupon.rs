use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::estimate::round_half_up;

#[derive(Debug, Error, PartialEq)]
pub enum CouponError {
    #[error("Coupon code is not valid")]
    NotFound,
    #[error("Coupon is no longer active")]
    Inactive,
    #[error("Coupon expired at {0}")]
    Expired(DateTime<Utc>),
    #[error("Coupon has reached its maximum number of uses")]
    Exhausted,
    #[error("Minimum order amount for this coupon is {0}")]
    BelowMinimum(i64),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read coupon catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed coupon catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Coupon {code}: {reason}")]
    InvalidCoupon { code: String, reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub min_amount: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    /// Reject catalog entries that could raise a price instead of lowering it
    pub fn check(&self) -> Result<(), CatalogError> {
        let reason = if self.code.trim().is_empty() {
            Some("code must not be empty")
        } else if self.discount_value < 0 {
            Some("discount value must not be negative")
        } else if self.discount_type == DiscountType::Percentage && self.discount_value > 100 {
            Some("percentage discount must not exceed 100")
        } else if self.min_amount < 0 {
            Some("minimum amount must not be negative")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CatalogError::InvalidCoupon {
                code: self.code.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Check the coupon can be applied to `order_amount` at `now`
    pub fn validate(&self, order_amount: i64, now: DateTime<Utc>) -> Result<(), CouponError> {
        if !self.is_active {
            return Err(CouponError::Inactive);
        }
        if let Some(expires_at) = self.expires_at {
            if expires_at < now {
                return Err(CouponError::Expired(expires_at));
            }
        }
        if let Some(max_uses) = self.max_uses {
            if self.used_count >= max_uses {
                return Err(CouponError::Exhausted);
            }
        }
        if order_amount < self.min_amount {
            return Err(CouponError::BelowMinimum(self.min_amount));
        }
        Ok(())
    }

    pub fn discount(&self, amount: i64) -> i64 {
        match self.discount_type {
            DiscountType::Percentage => {
                round_half_up(amount as f64 * self.discount_value as f64 / 100.0)
            }
            DiscountType::Fixed => self.discount_value,
        }
    }

    /// Amount after discount, never below zero
    pub fn final_price(&self, amount: i64) -> i64 {
        amount.saturating_sub(self.discount(amount)).max(0)
    }
}

/// Coupons keyed by upper-cased code
#[derive(Debug, Default)]
pub struct CouponBook {
    coupons: HashMap<String, Coupon>,
}

impl CouponBook {
    pub fn new(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let coupons = coupons
            .into_iter()
            .map(|c| (c.code.to_uppercase(), c))
            .collect();
        Self { coupons }
    }

    /// Parse a JSON array of coupons, checking every entry
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let coupons: Vec<Coupon> = serde_json::from_str(json)?;
        for coupon in &coupons {
            coupon.check()?;
        }
        Ok(Self::new(coupons))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    pub fn find(&self, code: &str) -> Result<&Coupon, CouponError> {
        self.coupons
            .get(&code.trim().to_uppercase())
            .ok_or(CouponError::NotFound)
    }

    /// Look up `code` and validate it against `order_amount`
    pub fn redeemable(
        &self,
        code: &str,
        order_amount: i64,
        now: DateTime<Utc>,
    ) -> Result<&Coupon, CouponError> {
        let coupon = self.find(code)?;
        coupon.validate(order_amount, now)?;
        Ok(coupon)
    }
}
