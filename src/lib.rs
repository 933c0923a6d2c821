//! Admin toolkit for a billing/metering platform: calendar-aligned billing
//! anchors, coupon eligibility, wallet credit conversion, and a cached REST
//! client for the billing API with a CLI and a small preview server on top.

pub mod backend;
pub mod billing;
pub mod client;
pub mod cmd;
pub mod types;
pub mod utils;
