use anyhow::{Ok, Result};
use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    client::{api::BillingApiClient, client_ext::BillingClientExt},
    cmd::print_json,
    types::currency::format_amount,
};

#[derive(Subcommand)]
pub enum CouponCommands {
    /// List all coupons
    List {},

    /// Show one coupon
    Get {
        /// Coupon ID
        id: String,
    },

    /// List coupons redeemable right now
    Eligible {
        /// Only coupons in this currency (case-insensitive)
        #[arg(short, long)]
        currency: Option<String>,

        /// Preview the discount each coupon grants on this amount
        #[arg(long)]
        amount: Option<Decimal>,
    },
}

impl CouponCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            CouponCommands::List {} => {
                let page = client.list_coupons().await?;
                info!(total = page.pagination.total, "Fetched coupons");
                print_json(&page.items)
            }
            CouponCommands::Get { id } => {
                let coupon = client.get_coupon(id).await?;
                print_json(&coupon)
            }
            CouponCommands::Eligible { currency, amount } => {
                let coupons = client.eligible_coupons(currency.as_deref()).await?;

                match amount {
                    Some(amount) => {
                        for coupon in &coupons {
                            let code = coupon
                                .currency
                                .as_deref()
                                .or(currency.as_deref())
                                .unwrap_or("USD");
                            println!(
                                "{}\t{}\t-{}",
                                coupon.id,
                                coupon.name,
                                format_amount(coupon.discount_for(*amount)?, code)
                            );
                        }
                        Ok(())
                    }
                    None => print_json(&coupons),
                }
            }
        }
    }
}
