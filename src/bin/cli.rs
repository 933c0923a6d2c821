use anyhow::Result;
use billdesk::{
    client::api::BillingApiClient,
    cmd::{Cli, Commands},
    utils::{config::AppConfig, logs_fmt::init_cli_logging},
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_cli_logging(cli.verbose)?;

    if let Commands::Anchor(args) = &cli.command {
        return args.execute();
    }

    let mut cfg = AppConfig::load()?;
    if let Some(api_url) = cli.api_url {
        cfg.api_url = api_url;
        cfg.validate()?;
    }

    info!("Connecting to billing API: {}", cfg.api_url);

    let client = BillingApiClient::new(&cfg.client_config(), cfg.session())?;

    match cli.command {
        Commands::Anchor(_) => {}
        Commands::Coupons(cmd) => cmd.execute(&client).await?,
        Commands::Customers(cmd) => cmd.execute(&client).await?,
        Commands::Wallets(cmd) => cmd.execute(&client).await?,
        Commands::Plans(cmd) => cmd.execute(&client).await?,
        Commands::Subscriptions(cmd) => cmd.execute(&client).await?,
        Commands::Invoices(cmd) => cmd.execute(&client).await?,
        Commands::Meters(cmd) => cmd.execute(&client).await?,
        Commands::CreditGrants(cmd) => cmd.execute(&client).await?,
    }

    client.end_session();

    Ok(())
}
