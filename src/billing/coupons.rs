use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    types::{
        coupon::{Coupon, CouponType},
        currency,
    },
    utils::error::BillingError,
};

impl Coupon {
    /// A window only constrains redemption when both bounds are set; the range
    /// is inclusive at both ends.
    pub fn within_redemption_window(&self, now: DateTime<Utc>) -> bool {
        match (self.redeem_after, self.redeem_before) {
            (Some(after), Some(before)) => after <= now && now <= before,
            _ => true,
        }
    }

    pub fn has_remaining_redemptions(&self) -> bool {
        match self.max_redemptions {
            Some(max) if max > 0 => self.total_redemptions < max,
            _ => true,
        }
    }

    pub fn matches_currency(&self, currency: &str) -> bool {
        self.currency
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(currency.trim()))
    }

    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.within_redemption_window(now) && self.has_remaining_redemptions()
    }

    /// Discount this coupon grants on `amount`, never more than `amount`.
    ///
    /// Percentage discounts are rounded to the coupon's currency precision
    /// (two places when the coupon carries no currency).
    pub fn discount_for(&self, amount: Decimal) -> Result<Decimal, BillingError> {
        if amount <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let raw = match self.coupon_type {
            CouponType::Fixed => self.amount_off.unwrap_or(Decimal::ZERO),
            CouponType::Percentage => {
                let pct = self
                    .percentage_off
                    .unwrap_or(Decimal::ZERO)
                    .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                let discount = (pct / Decimal::ONE_HUNDRED)
                    .checked_mul(amount)
                    .ok_or_else(|| {
                        BillingError::AmountOverflow(format!("{}% of {}", pct, amount))
                    })?;
                currency::round_amount(discount, self.currency.as_deref().unwrap_or("USD"))
            }
        };

        Ok(raw.max(Decimal::ZERO).min(amount))
    }
}

/// Coupons usable for a new redemption right now.
pub fn filter_eligible(coupons: &[Coupon], currency: Option<&str>) -> Vec<Coupon> {
    filter_eligible_at(coupons, currency, Utc::now())
}

/// Same as [`filter_eligible`] with an explicit evaluation instant.
///
/// Applies the window, redemption-count and currency checks in that order and
/// keeps the input order. The input is never modified.
pub fn filter_eligible_at(
    coupons: &[Coupon],
    currency: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<Coupon> {
    let eligible: Vec<Coupon> = coupons
        .iter()
        .filter(|c| c.within_redemption_window(now))
        .filter(|c| c.has_remaining_redemptions())
        .filter(|c| currency.is_none_or(|cur| c.matches_currency(cur)))
        .cloned()
        .collect();

    debug!(
        total = coupons.len(),
        eligible = eligible.len(),
        currency = currency.unwrap_or("*"),
        "Filtered coupons"
    );

    eligible
}
