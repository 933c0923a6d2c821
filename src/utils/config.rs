use std::time::Duration;

use serde::Deserialize;

use crate::{
    backend::middleware::AuthMode,
    client::{api::ClientConfig, session::Session},
    utils::error::BillingError,
};

pub const ENV_PREFIX: &str = "BILLDESK";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the billing REST API, e.g. https://api.example.com
    pub api_url: String,

    /// Secret key sent as `x-api-key`
    pub api_key: String,

    /// Optional environment scoping (sandbox / production)
    pub environment_id: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,

    /// How long a GET response stays in the query cache (milliseconds)
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,

    /// Port the preview server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub auth_mode: AuthMode,

    /// Expected value for ApiKey or BearerToken modes
    pub auth_secret: Option<String>,

    /// JSON logs on the server
    #[serde(default)]
    pub log_json: bool,
}

impl AppConfig {
    /// Load from `.env` and `BILLDESK_*` environment variables.
    pub fn load() -> Result<Self, BillingError> {
        dotenvy::dotenv().ok();
        Self::from_env(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    pub fn from_env(env: config::Environment) -> Result<Self, BillingError> {
        let cfg: AppConfig = config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BillingError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(BillingError::Validation(format!(
                "api_url must start with http:// or https://, got {}",
                self.api_url
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(BillingError::Validation("api_key must not be empty".into()));
        }

        if self.cache_ttl_ms == 0 {
            return Err(BillingError::Validation(
                "cache_ttl_ms must be greater than zero".into(),
            ));
        }

        match self.auth_mode {
            AuthMode::None => {}
            AuthMode::ApiKey | AuthMode::BearerToken => {
                if self.auth_secret.as_deref().unwrap_or("").is_empty() {
                    return Err(BillingError::Validation(
                        "auth_secret must be set when auth_mode is api_key or bearer_token"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            cache_ttl: Duration::from_millis(self.cache_ttl_ms),
            cache_max_entries: self.cache_max_entries,
        }
    }

    pub fn session(&self) -> Session {
        let session = Session::new(self.api_key.clone());
        match &self.environment_id {
            Some(env) => session.with_environment(env.clone()),
            None => session,
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}
fn default_cache_ttl_ms() -> u64 {
    30_000
}
fn default_cache_max_entries() -> u64 {
    1_000
}
fn default_port() -> u16 {
    8080
}
