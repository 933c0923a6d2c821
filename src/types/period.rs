use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::BillingError;

/// Unit of billing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Annual,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Daily => "DAILY",
            BillingPeriod::Weekly => "WEEKLY",
            BillingPeriod::Monthly => "MONTHLY",
            BillingPeriod::Quarterly => "QUARTERLY",
            BillingPeriod::HalfYearly => "HALF_YEARLY",
            BillingPeriod::Annual => "ANNUAL",
        }
    }

    /// Number of calendar months spanned, for month-aligned periods.
    pub fn months(&self) -> Option<u32> {
        match self {
            BillingPeriod::Monthly => Some(1),
            BillingPeriod::Quarterly => Some(3),
            BillingPeriod::HalfYearly => Some(6),
            BillingPeriod::Annual => Some(12),
            BillingPeriod::Daily | BillingPeriod::Weekly => None,
        }
    }

    pub fn all() -> Vec<BillingPeriod> {
        vec![
            BillingPeriod::Daily,
            BillingPeriod::Weekly,
            BillingPeriod::Monthly,
            BillingPeriod::Quarterly,
            BillingPeriod::HalfYearly,
            BillingPeriod::Annual,
        ]
    }
}

impl FromStr for BillingPeriod {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "DAILY" => Ok(BillingPeriod::Daily),
            "WEEKLY" => Ok(BillingPeriod::Weekly),
            "MONTHLY" => Ok(BillingPeriod::Monthly),
            "QUARTERLY" => Ok(BillingPeriod::Quarterly),
            "HALF_YEARLY" => Ok(BillingPeriod::HalfYearly),
            "ANNUAL" => Ok(BillingPeriod::Annual),
            _ => Err(BillingError::UnsupportedPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a subscription's first invoice boundary is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    /// Periods run from the subscription start instant.
    #[default]
    Anniversary,
    /// Periods snap to calendar boundaries (1st of month, Monday, ...).
    Calendar,
}

impl FromStr for BillingCycle {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anniversary" => Ok(BillingCycle::Anniversary),
            "calendar" => Ok(BillingCycle::Calendar),
            _ => Err(BillingError::Validation(format!(
                "unknown billing cycle: {}. Supported: anniversary, calendar",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loose_spellings() {
        assert_eq!(
            "half-yearly".parse::<BillingPeriod>().unwrap(),
            BillingPeriod::HalfYearly
        );
        assert_eq!(
            " monthly ".parse::<BillingPeriod>().unwrap(),
            BillingPeriod::Monthly
        );
        assert_eq!(
            "Half Yearly".parse::<BillingPeriod>().unwrap(),
            BillingPeriod::HalfYearly
        );
    }

    #[test]
    fn rejects_unknown_period() {
        let err = "FORTNIGHTLY".parse::<BillingPeriod>().unwrap_err();
        assert!(matches!(err, BillingError::UnsupportedPeriod(p) if p == "FORTNIGHTLY"));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&BillingPeriod::HalfYearly).unwrap();
        assert_eq!(json, "\"HALF_YEARLY\"");

        let parsed: BillingPeriod = serde_json::from_str("\"ANNUAL\"").unwrap();
        assert_eq!(parsed, BillingPeriod::Annual);

        assert!(serde_json::from_str::<BillingPeriod>("\"YEARLY\"").is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for period in BillingPeriod::all() {
            assert_eq!(period.to_string().parse::<BillingPeriod>().unwrap(), period);
        }
    }

    #[test]
    fn billing_cycle_defaults_to_anniversary() {
        assert_eq!(BillingCycle::default(), BillingCycle::Anniversary);
        assert_eq!(
            "CALENDAR".parse::<BillingCycle>().unwrap(),
            BillingCycle::Calendar
        );
        assert!("weekly".parse::<BillingCycle>().is_err());
    }
}
