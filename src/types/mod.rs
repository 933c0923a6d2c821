pub mod coupon;
pub mod currency;
pub mod models;
pub mod period;

pub use coupon::{Coupon, CouponCadence, CouponType};
pub use period::{BillingCycle, BillingPeriod};
