pub mod anchor;
pub mod coupons;
pub mod customers;
pub mod wallets;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::cmd::{
    anchor::AnchorArgs,
    coupons::CouponCommands,
    customers::{
        CreditGrantCommands, CustomerCommands, InvoiceCommands, MeterCommands, PlanCommands,
        SubscriptionCommands,
    },
    wallets::WalletCommands,
};

#[derive(Parser)]
#[command(name = "billdesk")]
#[command(about = "Admin toolkit for the billing API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Billing API base URL (overrides BILLDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the next calendar-aligned billing anchor (offline)
    Anchor(AnchorArgs),

    /// Coupon commands
    #[command(subcommand)]
    Coupons(CouponCommands),

    /// Customer commands
    #[command(subcommand)]
    Customers(CustomerCommands),

    /// Wallet commands
    #[command(subcommand)]
    Wallets(WalletCommands),

    /// Plan commands
    #[command(subcommand)]
    Plans(PlanCommands),

    /// Subscription commands
    #[command(subcommand)]
    Subscriptions(SubscriptionCommands),

    /// Invoice commands
    #[command(subcommand)]
    Invoices(InvoiceCommands),

    /// Meter commands
    #[command(subcommand)]
    Meters(MeterCommands),

    /// Credit grant commands
    #[command(subcommand)]
    CreditGrants(CreditGrantCommands),
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
