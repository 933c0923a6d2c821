use anyhow::{Ok, Result};
use clap::Subcommand;
use tracing::info;

use crate::{
    client::api::BillingApiClient,
    cmd::print_json,
    types::currency::format_amount,
    utils::logs_fmt::abbrev,
};

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List customers
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: u64,

        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Show one customer
    Get {
        /// Customer ID
        id: String,
    },
}

impl CustomerCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            CustomerCommands::List { limit, offset } => {
                let page = client.list_customers(*limit, *offset).await?;
                for customer in &page.items {
                    println!(
                        "{}\t{}\t{}",
                        abbrev(&customer.id),
                        customer.name,
                        customer.email.as_deref().unwrap_or("-")
                    );
                }
                if page.has_more() {
                    info!(
                        total = page.pagination.total,
                        next_offset = offset + page.items.len() as u64,
                        "More customers available"
                    );
                }
                Ok(())
            }
            CustomerCommands::Get { id } => {
                let customer = client.get_customer(id).await?;
                print_json(&customer)
            }
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List plans with their prices
    List {},
}

impl PlanCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            PlanCommands::List {} => {
                let page = client.list_plans().await?;
                for plan in &page.items {
                    println!("{}\t{}", abbrev(&plan.id), plan.name);
                    for price in &plan.prices {
                        println!(
                            "  {}\t{} / {}",
                            abbrev(&price.id),
                            format_amount(price.amount, &price.currency),
                            price.billing_period
                        );
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// List a customer's subscriptions
    List {
        #[arg(short, long)]
        customer: String,
    },
}

impl SubscriptionCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            SubscriptionCommands::List { customer } => {
                let page = client.list_subscriptions(customer).await?;
                print_json(&page.items)
            }
        }
    }
}

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// List a customer's invoices
    List {
        #[arg(short, long)]
        customer: String,
    },
}

impl InvoiceCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            InvoiceCommands::List { customer } => {
                let page = client.list_invoices(customer).await?;
                for invoice in &page.items {
                    println!(
                        "{}\t{}\t{}\t{}",
                        abbrev(&invoice.id),
                        invoice.invoice_status.as_deref().unwrap_or("-"),
                        format_amount(invoice.amount_due, &invoice.currency),
                        format_amount(invoice.amount_remaining(), &invoice.currency)
                    );
                }
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
pub enum MeterCommands {
    /// List usage meters
    List {},
}

impl MeterCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            MeterCommands::List {} => {
                let page = client.list_meters().await?;
                for meter in &page.items {
                    println!("{}\t{}\t{}", abbrev(&meter.id), meter.event_name, meter.name);
                }
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
pub enum CreditGrantCommands {
    /// List credit grants
    List {
        /// Only grants attached to this plan
        #[arg(short, long)]
        plan: Option<String>,
    },
}

impl CreditGrantCommands {
    pub async fn execute(&self, client: &BillingApiClient) -> Result<()> {
        match self {
            CreditGrantCommands::List { plan } => {
                let page = client.list_credit_grants(plan.as_deref()).await?;
                for grant in &page.items {
                    let period = grant
                        .period
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}\t{}\t{} credits\t{}",
                        abbrev(&grant.id),
                        grant.name,
                        grant.credits,
                        period
                    );
                }
                Ok(())
            }
        }
    }
}
