use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::types::period::{BillingCycle, BillingPeriod};

/// First calendar-aligned billing boundary after `start`.
///
/// Works on the UTC calendar fields of `start` and always returns a UTC
/// midnight. The result is strictly later than `start`'s date, so a start that
/// already sits on a boundary (a Monday, the 1st of a quarter, ...) advances a
/// whole period. Dates past the end of the representable calendar saturate at
/// `NaiveDate::MAX`.
pub fn next_billing_anchor(start: DateTime<Utc>, period: BillingPeriod) -> DateTime<Utc> {
    let date = start.date_naive();

    let anchor = match period {
        BillingPeriod::Daily => date.checked_add_days(Days::new(1)),
        BillingPeriod::Weekly => {
            let until_monday = 7 - u64::from(date.weekday().num_days_from_monday());
            date.checked_add_days(Days::new(until_monday))
        }
        BillingPeriod::Monthly => next_aligned_month(date, 1),
        BillingPeriod::Quarterly => next_aligned_month(date, 3),
        BillingPeriod::HalfYearly => next_aligned_month(date, 6),
        BillingPeriod::Annual => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
    };

    midnight(anchor.unwrap_or(NaiveDate::MAX))
}

/// Anchor for a subscription starting at `start`.
pub fn billing_anchor(
    start: DateTime<Utc>,
    period: BillingPeriod,
    cycle: BillingCycle,
) -> DateTime<Utc> {
    match cycle {
        BillingCycle::Anniversary => start,
        BillingCycle::Calendar => next_billing_anchor(start, period),
    }
}

/// 1st of the month opening the next `span`-month block, blocks starting in
/// January.
fn next_aligned_month(date: NaiveDate, span: u32) -> Option<NaiveDate> {
    let month0 = date.month0();
    let next0 = (month0 / span + 1) * span;

    let (year, month0) = if next0 >= 12 {
        (date.year().checked_add(1)?, next0 - 12)
    } else {
        (date.year(), next0)
    };

    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn daily_moves_to_next_midnight() {
        assert_eq!(
            next_billing_anchor(at("2024-02-28T23:59:59Z"), BillingPeriod::Daily),
            at("2024-02-29T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-12-31T00:00:00Z"), BillingPeriod::Daily),
            at("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn weekly_never_returns_same_monday() {
        // 2024-06-10 is a Monday
        assert_eq!(
            next_billing_anchor(at("2024-06-10T00:00:00Z"), BillingPeriod::Weekly),
            at("2024-06-17T00:00:00Z")
        );
        // Sunday
        assert_eq!(
            next_billing_anchor(at("2024-06-16T18:00:00Z"), BillingPeriod::Weekly),
            at("2024-06-17T00:00:00Z")
        );
        // Wednesday
        assert_eq!(
            next_billing_anchor(at("2024-06-12T09:30:00Z"), BillingPeriod::Weekly),
            at("2024-06-17T00:00:00Z")
        );
    }

    #[test]
    fn monthly_goes_to_first_of_next_month() {
        assert_eq!(
            next_billing_anchor(at("2024-03-15T10:00:00Z"), BillingPeriod::Monthly),
            at("2024-04-01T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-12-01T00:00:00Z"), BillingPeriod::Monthly),
            at("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn quarterly_rolls_over_year() {
        assert_eq!(
            next_billing_anchor(at("2024-11-01T00:00:00Z"), BillingPeriod::Quarterly),
            at("2025-01-01T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-01-01T00:00:00Z"), BillingPeriod::Quarterly),
            at("2024-04-01T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-06-30T23:00:00Z"), BillingPeriod::Quarterly),
            at("2024-07-01T00:00:00Z")
        );
    }

    #[test]
    fn half_yearly_aligns_to_january_and_july() {
        assert_eq!(
            next_billing_anchor(at("2024-02-10T00:00:00Z"), BillingPeriod::HalfYearly),
            at("2024-07-01T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-07-01T00:00:00Z"), BillingPeriod::HalfYearly),
            at("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn annual_goes_to_next_january() {
        assert_eq!(
            next_billing_anchor(at("2024-12-20T00:00:00Z"), BillingPeriod::Annual),
            at("2025-01-01T00:00:00Z")
        );
        assert_eq!(
            next_billing_anchor(at("2024-01-01T00:00:00Z"), BillingPeriod::Annual),
            at("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn uses_utc_fields_of_offset_input() {
        // 2024-03-31T22:00-05:00 is already April 1st in UTC
        let start = DateTime::parse_from_rfc3339("2024-03-31T22:00:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            next_billing_anchor(start, BillingPeriod::Monthly),
            at("2024-05-01T00:00:00Z")
        );
    }

    #[test]
    fn anniversary_cycle_keeps_start() {
        let start = at("2024-03-15T10:00:00Z");
        assert_eq!(
            billing_anchor(start, BillingPeriod::Monthly, BillingCycle::Anniversary),
            start
        );
        assert_eq!(
            billing_anchor(start, BillingPeriod::Monthly, BillingCycle::Calendar),
            at("2024-04-01T00:00:00Z")
        );
    }

    #[test]
    fn saturates_at_calendar_end() {
        let last = midnight(NaiveDate::MAX);
        assert_eq!(next_billing_anchor(last, BillingPeriod::Daily), last);
        assert_eq!(next_billing_anchor(last, BillingPeriod::Annual), last);
    }
}
