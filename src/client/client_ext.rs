use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    billing::{coupons::filter_eligible, credits::amount_to_credits},
    client::{api::BillingApiClient, error::ApiError},
    types::{
        coupon::Coupon,
        models::{TopUpRequest, Wallet},
    },
    utils::error::BillingError,
};

#[async_trait]
pub trait BillingClientExt {
    /// Coupons currently redeemable, optionally restricted to one currency.
    async fn eligible_coupons(&self, currency: Option<&str>) -> Result<Vec<Coupon>, ApiError>;
    /// Customer wallets in a given currency.
    async fn wallets_in_currency(
        &self,
        customer_id: &str,
        currency: &str,
    ) -> Result<Vec<Wallet>, ApiError>;
    /// Top up a wallet by a currency amount. Without an explicit `rate` the
    /// wallet's own conversion rate is used.
    async fn top_up_wallet_amount(
        &self,
        wallet_id: &str,
        amount: Decimal,
        rate: Option<Decimal>,
        description: Option<String>,
    ) -> Result<Wallet, BillingError>;
}

#[async_trait]
impl BillingClientExt for BillingApiClient {
    async fn eligible_coupons(&self, currency: Option<&str>) -> Result<Vec<Coupon>, ApiError> {
        let page = self.list_coupons().await?;
        let eligible = filter_eligible(&page.items, currency);

        info!(
            fetched = page.items.len(),
            eligible = eligible.len(),
            "Resolved eligible coupons"
        );

        Ok(eligible)
    }

    async fn wallets_in_currency(
        &self,
        customer_id: &str,
        currency: &str,
    ) -> Result<Vec<Wallet>, ApiError> {
        let wallets = self.list_wallets(customer_id).await?;
        Ok(wallets
            .into_iter()
            .filter(|w| w.currency.eq_ignore_ascii_case(currency))
            .collect())
    }

    async fn top_up_wallet_amount(
        &self,
        wallet_id: &str,
        amount: Decimal,
        rate: Option<Decimal>,
        description: Option<String>,
    ) -> Result<Wallet, BillingError> {
        let rate = match rate {
            Some(rate) => rate,
            None => self.get_wallet(wallet_id).await?.conversion_rate,
        };
        let credits_to_add = amount_to_credits(amount, rate)?;

        info!(
            wallet = %wallet_id,
            %amount,
            %rate,
            credits = %credits_to_add,
            "Converted top-up amount"
        );

        let request = TopUpRequest {
            credits_to_add,
            description,
            expiry_date: None,
        };
        Ok(self.top_up_wallet(wallet_id, &request).await?)
    }
}
