pub mod anchor;
pub mod coupons;
pub mod credits;

pub use anchor::{billing_anchor, next_billing_anchor};
pub use coupons::{filter_eligible, filter_eligible_at};
pub use credits::{amount_to_credits, credits_to_amount};
