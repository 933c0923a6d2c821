use billdesk::{
    billing::anchor::{billing_anchor, next_billing_anchor},
    types::period::{BillingCycle, BillingPeriod},
};
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};
use proptest::prelude::*;

// 1970-01-01 .. 2200-01-01
fn any_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..7_258_118_400i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn any_period() -> impl Strategy<Value = BillingPeriod> {
    prop::sample::select(BillingPeriod::all())
}

proptest! {
    #[test]
    fn anchor_is_midnight_after_start_date(start in any_instant(), period in any_period()) {
        let anchor = next_billing_anchor(start, period);

        prop_assert_eq!(anchor.time(), NaiveTime::MIN);
        prop_assert!(anchor > start);
        prop_assert!(anchor.date_naive() > start.date_naive());
    }

    #[test]
    fn daily_is_next_midnight(start in any_instant()) {
        let anchor = next_billing_anchor(start, BillingPeriod::Daily);
        prop_assert_eq!(anchor.date_naive(), start.date_naive() + Duration::days(1));
    }

    #[test]
    fn weekly_lands_on_a_later_monday_within_a_week(start in any_instant()) {
        let anchor = next_billing_anchor(start, BillingPeriod::Weekly);
        let gap = (anchor.date_naive() - start.date_naive()).num_days();

        prop_assert_eq!(anchor.weekday(), Weekday::Mon);
        prop_assert!((1..=7).contains(&gap));
    }

    #[test]
    fn month_based_periods_land_on_block_start(start in any_instant(), period in any_period()) {
        let anchor = next_billing_anchor(start, period);

        if let Some(span) = period.months() {
            prop_assert_eq!(anchor.day(), 1);
            prop_assert_eq!(anchor.month0() % span, 0);
            // never skips a whole block
            let months_ahead = (anchor.year() - start.year()) * 12
                + anchor.month0() as i32
                - start.month0() as i32;
            prop_assert!(months_ahead >= 1 && months_ahead <= span as i32);
        }
    }

    #[test]
    fn anniversary_keeps_start(start in any_instant(), period in any_period()) {
        prop_assert_eq!(billing_anchor(start, period, BillingCycle::Anniversary), start);
    }
}
