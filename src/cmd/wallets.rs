use anyhow::{Ok, Result, anyhow};
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::{
    client::{api::BillingApiClient, client_ext::BillingClientExt},
    cmd::print_json,
    types::models::TopUpRequest,
    utils::logs_fmt::abbrev,
};

#[derive(Subcommand)]
pub enum WalletCommands {
    /// List a customer's wallets with balances
    List {
        #[arg(short, long)]
        customer: String,
    },

    /// Add credits to a wallet
    TopUp {
        /// Wallet ID
        #[arg(short, long)]
        wallet: String,

        /// Credits to add
        #[arg(long, conflicts_with_all = ["amount", "rate"])]
        credits: Option<Decimal>,

        /// Currency amount to add, converted to credits
        #[arg(long)]
        amount: Option<Decimal>,

        /// Currency units per credit for --amount; defaults to the wallet's own rate
        #[arg(long, requires = "amount")]
        rate: Option<Decimal>,

        #[arg(short, long)]
        description: Option<String>,
    },
}

impl WalletCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            WalletCommands::List { customer } => {
                let wallets = client.list_wallets(customer).await?;
                for wallet in &wallets {
                    println!(
                        "{}\t{} credits\t{}",
                        abbrev(&wallet.id),
                        wallet.balance,
                        wallet.formatted_balance()?
                    );
                }
                Ok(())
            }
            WalletCommands::TopUp {
                wallet,
                credits,
                amount,
                rate,
                description,
            } => {
                let updated = match (credits, amount) {
                    (Some(credits_to_add), _) => {
                        client
                            .top_up_wallet(
                                wallet,
                                &TopUpRequest {
                                    credits_to_add: *credits_to_add,
                                    description: description.clone(),
                                    expiry_date: None,
                                },
                            )
                            .await?
                    }
                    (None, Some(amount)) => {
                        client
                            .top_up_wallet_amount(wallet, *amount, *rate, description.clone())
                            .await?
                    }
                    (None, None) => return Err(anyhow!("either --credits or --amount is required")),
                };
                print_json(&updated)
            }
        }
    }
}
