use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    #[default]
    Fixed,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponCadence {
    #[default]
    Once,
    Repeated,
    Forever,
}

/// Discount grant as returned by the billing API. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub coupon_type: CouponType,
    #[serde(default)]
    pub cadence: CouponCadence,
    /// Number of billing periods a `repeated` coupon applies for.
    #[serde(default)]
    pub duration_in_periods: Option<u32>,
    #[serde(default)]
    pub amount_off: Option<Decimal>,
    #[serde(default)]
    pub percentage_off: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub redeem_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub redeem_before: Option<DateTime<Utc>>,
    /// Absent or zero means unlimited.
    #[serde(default)]
    pub max_redemptions: Option<u64>,
    #[serde(default)]
    pub total_redemptions: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Coupon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_window(
        mut self,
        redeem_after: Option<DateTime<Utc>>,
        redeem_before: Option<DateTime<Utc>>,
    ) -> Self {
        self.redeem_after = redeem_after;
        self.redeem_before = redeem_before;
        self
    }

    pub fn with_redemptions(mut self, max: Option<u64>, total: u64) -> Self {
        self.max_redemptions = max;
        self.total_redemptions = total;
        self
    }

    pub fn fixed(mut self, amount_off: Decimal) -> Self {
        self.coupon_type = CouponType::Fixed;
        self.amount_off = Some(amount_off);
        self
    }

    pub fn percentage(mut self, percentage_off: Decimal) -> Self {
        self.coupon_type = CouponType::Percentage;
        self.percentage_off = Some(percentage_off);
        self
    }
}
