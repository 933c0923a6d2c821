pub mod handlers;
pub mod middleware;
pub mod router;

use crate::{
    client::api::BillingApiClient,
    utils::{config::AppConfig, error::BillingError},
};

pub struct AppState {
    pub cfg: AppConfig,
    pub client: BillingApiClient,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Result<Self, BillingError> {
        let client = BillingApiClient::new(&cfg.client_config(), cfg.session())?;
        Ok(Self { cfg, client })
    }
}
