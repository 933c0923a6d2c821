use billdesk::{billing::coupons::filter_eligible_at, types::coupon::Coupon};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

prop_compose! {
    fn any_coupon()(
        idx in 0u32..1_000,
        currency in prop::option::of(prop::sample::select(vec!["USD", "usd", "EUR", "INR", " eur "])),
        after in prop::option::of(-30i64..30),
        before in prop::option::of(-30i64..30),
        max in prop::option::of(0u64..5),
        total in 0u64..6,
    ) -> Coupon {
        let base = Coupon::new(format!("coupon_{idx}"))
            .with_window(
                after.map(|d| now() + Duration::days(d)),
                before.map(|d| now() + Duration::days(d)),
            )
            .with_redemptions(max, total);
        match currency {
            Some(c) => base.with_currency(c),
            None => base,
        }
    }
}

fn any_currency() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec!["USD", "eur", "GBP"]))
}

proptest! {
    #[test]
    fn output_is_ordered_subset(coupons in prop::collection::vec(any_coupon(), 0..20), currency in any_currency()) {
        let eligible = filter_eligible_at(&coupons, currency, now());

        prop_assert!(eligible.len() <= coupons.len());
        let mut rest = coupons.iter();
        for kept in &eligible {
            prop_assert!(rest.any(|c| c == kept), "{} out of order or missing", kept.id);
        }
    }

    #[test]
    fn filtering_is_idempotent(coupons in prop::collection::vec(any_coupon(), 0..20), currency in any_currency()) {
        let once = filter_eligible_at(&coupons, currency, now());
        let twice = filter_eligible_at(&once, currency, now());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_kept_coupon_passes_each_check(coupons in prop::collection::vec(any_coupon(), 0..20), currency in any_currency()) {
        for c in filter_eligible_at(&coupons, currency, now()) {
            if let (Some(after), Some(before)) = (c.redeem_after, c.redeem_before) {
                prop_assert!(after <= now() && now() <= before);
            }
            if let Some(max) = c.max_redemptions.filter(|m| *m > 0) {
                prop_assert!(c.total_redemptions < max);
            }
            if let Some(cur) = currency {
                prop_assert!(c.currency.as_deref().is_some_and(|cc| cc.trim().eq_ignore_ascii_case(cur)));
            }
        }
    }

    #[test]
    fn exhausted_coupons_never_survive(idx in 0u32..100, max in 1u64..10, extra in 0u64..5) {
        let coupon = Coupon::new(format!("c{idx}")).with_redemptions(Some(max), max + extra);
        prop_assert!(filter_eligible_at(&[coupon], None, now()).is_empty());
    }
}

#[test]
fn future_window_is_excluded() {
    let future = Coupon::new("future").with_window(
        Some(now() + Duration::days(1)),
        Some(now() + Duration::days(10)),
    );
    let open = Coupon::new("open").with_window(Some(now() + Duration::days(1)), None);

    let eligible = filter_eligible_at(&[future, open], None, now());
    let ids: Vec<&str> = eligible.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["open"]);
}

#[test]
fn currency_filter_drops_currencyless_coupons() {
    let coupons = vec![
        Coupon::new("usd").with_currency("USD"),
        Coupon::new("none"),
        Coupon::new("eur").with_currency("EUR"),
    ];

    let usd = filter_eligible_at(&coupons, Some("usd"), now());
    assert_eq!(usd.len(), 1);
    assert_eq!(usd[0].id, "usd");

    assert_eq!(filter_eligible_at(&coupons, None, now()).len(), 3);
}
