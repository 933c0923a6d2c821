use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::debug;

use crate::{
    billing::anchor::billing_anchor,
    types::period::{BillingCycle, BillingPeriod},
    utils::error::BillingError,
};

#[derive(Args)]
pub struct AnchorArgs {
    /// Start instant (RFC 3339), defaults to now
    #[arg(short, long)]
    pub start: Option<String>,

    /// DAILY, WEEKLY, MONTHLY, QUARTERLY, HALF_YEARLY or ANNUAL
    #[arg(short, long)]
    pub period: String,

    /// anniversary or calendar
    #[arg(short, long, default_value = "calendar")]
    pub cycle: String,
}

impl AnchorArgs {
    pub fn execute(&self) -> Result<()> {
        let anchor = self.resolve()?;
        println!("{}", anchor.to_rfc3339());
        Ok(())
    }

    pub fn resolve(&self) -> Result<DateTime<Utc>, BillingError> {
        let start = match &self.start {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map_err(|e| BillingError::InvalidTimestamp(format!("{}: {}", s, e)))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };
        let period: BillingPeriod = self.period.parse()?;
        let cycle: BillingCycle = self.cycle.parse()?;

        debug!(%start, %period, ?cycle, "Resolving billing anchor");

        Ok(billing_anchor(start, period, cycle))
    }
}
