use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::period::{BillingCycle, BillingPeriod};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Envelope of every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ListResponse<T> {
    pub fn has_more(&self) -> bool {
        self.pagination
            .offset
            .saturating_add(self.items.len() as u64)
            < self.pagination.total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lookup_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub amount: Decimal,
    pub currency: String,
    pub billing_period: BillingPeriod,
    #[serde(default = "default_period_count")]
    pub billing_period_count: u32,
    #[serde(default)]
    pub meter_id: Option<String>,
}

fn default_period_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub plan_id: String,
    pub currency: String,
    pub billing_period: BillingPeriod,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub billing_anchor: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_period_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subscription_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub customer_id: String,
    pub currency: String,
    /// Balance in credits.
    #[serde(default)]
    pub balance: Decimal,
    /// Currency units per credit.
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: Decimal,
    #[serde(default)]
    pub wallet_status: Option<String>,
}

fn default_conversion_rate() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub credits_to_add: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub amount_due: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub invoice_status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub period_end: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn amount_remaining(&self) -> Decimal {
        (self.amount_due - self.amount_paid).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditGrant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub credits: Decimal,
    #[serde(default)]
    pub period: Option<BillingPeriod>,
    #[serde(default)]
    pub expiration_duration: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meter {
    pub id: String,
    pub event_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aggregation: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn list_response_reports_more_pages() {
        let page: ListResponse<Customer> = serde_json::from_str(
            r#"{"items": [{"id": "cus_1"}, {"id": "cus_2"}],
                "pagination": {"total": 5, "limit": 2, "offset": 0}}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more());

        let last: ListResponse<Customer> = serde_json::from_str(
            r#"{"items": [{"id": "cus_5"}],
                "pagination": {"total": 5, "limit": 2, "offset": 4}}"#,
        )
        .unwrap();
        assert!(!last.has_more());
    }

    #[test]
    fn has_more_tolerates_huge_offset() {
        let page: ListResponse<Customer> = serde_json::from_str(&format!(
            r#"{{"items": [{{"id": "cus_1"}}],
                "pagination": {{"total": {max}, "limit": 1, "offset": {max}}}}}"#,
            max = u64::MAX
        ))
        .unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn wallet_defaults_conversion_rate() {
        let wallet: Wallet = serde_json::from_str(
            r#"{"id": "w", "customer_id": "c", "currency": "usd", "balance": "40"}"#,
        )
        .unwrap();
        assert_eq!(wallet.conversion_rate, dec!(1));
        assert_eq!(wallet.balance, dec!(40));
    }

    #[test]
    fn subscription_rejects_unknown_period() {
        let result = serde_json::from_str::<Subscription>(
            r#"{"id": "s", "customer_id": "c", "plan_id": "p", "currency": "usd",
                "billing_period": "FORTNIGHTLY", "start_date": "2024-01-01T00:00:00Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invoice_remaining_never_negative() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id": "i", "customer_id": "c", "currency": "usd",
                "amount_due": "10", "amount_paid": "12.5"}"#,
        )
        .unwrap();
        assert_eq!(invoice.amount_remaining(), Decimal::ZERO);
    }
}
