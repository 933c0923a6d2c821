use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{error, info, instrument, warn};

use crate::{
    client::{cache::QueryCache, error::ApiError, session::Session},
    types::{
        coupon::Coupon,
        models::{
            CreditGrant, Customer, Invoice, ListResponse, Meter, Plan, Subscription, TopUpRequest,
            Wallet,
        },
    },
    utils::metrics::METRICS,
};

const API_KEY_HEADER: &str = "x-api-key";
const ENVIRONMENT_HEADER: &str = "X-Environment-ID";
const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(30),
            cache_max_entries: 1_000,
        }
    }
}

/// REST client for the billing API.
pub struct BillingApiClient {
    client: Client,
    api_url: String,
    session: Session,
    cache: QueryCache,
}

impl BillingApiClient {
    pub fn new(cfg: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        if !(cfg.api_url.starts_with("http://") || cfg.api_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "api_url must be an http(s) URL, got {}",
                cfg.api_url
            )));
        }

        let client = Client::builder()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(cfg.request_timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            session,
            cache: QueryCache::new(cfg.cache_ttl, cfg.cache_max_entries),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Tear down everything tied to the session. The client is consumed.
    pub fn end_session(self) {
        self.cache.clear();
        info!("Session ended, query cache cleared");
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, self.session.api_key())
            .header("Content-Type", "application/json");

        if let Some(env) = self.session.environment_id() {
            req = req.header(ENVIRONMENT_HEADER, env);
        }
        req
    }

    async fn send(&self, method: Method, req: RequestBuilder) -> Result<Response, ApiError> {
        let timer = Instant::now();
        METRICS
            .api_requests
            .with_label_values(&[method.as_str()])
            .inc();

        let result = req.send().await;
        METRICS
            .request_duration
            .observe(timer.elapsed().as_secs_f64());

        let resp = result.map_err(|e| {
            METRICS.api_errors.inc();
            error!(error = %e, "Billing API unreachable");
            ApiError::Unreachable(e.to_string())
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        METRICS.api_errors.inc();
        let body = resp.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(status = %status, message = %message, "Billing API returned non-2xx");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Cached GET.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let key = QueryCache::key(path, query);

        let body = match self.cache.get(&key).await {
            Some(body) => body,
            None => {
                let generation = self.cache.generation();
                let req = self.request(Method::GET, path).query(query);
                let resp = self.send(Method::GET, req).await?;
                let body = resp
                    .text()
                    .await
                    .map_err(|e| ApiError::Parse(e.to_string()))?;
                self.cache.insert_if_current(key, body.clone(), generation).await;
                body
            }
        };

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, path, "Failed to parse billing API response");
            ApiError::Parse(e.to_string())
        })
    }

    /// POST that invalidates cached queries under each of `invalidates`.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        invalidates: &[&str],
    ) -> Result<T, ApiError> {
        let req = self
            .request(Method::POST, path)
            .header(IDEMPOTENCY_HEADER, uuid::Uuid::new_v4().to_string())
            .json(body);

        let resp = self.send(Method::POST, req).await?;
        for prefix in invalidates {
            self.cache.invalidate_prefix(prefix);
        }

        resp.json::<T>().await.map_err(|e| {
            error!(error = %e, path, "Failed to parse billing API response");
            ApiError::Parse(e.to_string())
        })
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<ListResponse<Customer>, ApiError> {
        self.get_json(
            "/v1/customers",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: &str) -> Result<Customer, ApiError> {
        self.get_json(&format!("/v1/customers/{}", id), &[]).await
    }

    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<ListResponse<Plan>, ApiError> {
        self.get_json("/v1/plans", &[]).await
    }

    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<ListResponse<Coupon>, ApiError> {
        self.get_json("/v1/coupons", &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get_coupon(&self, id: &str) -> Result<Coupon, ApiError> {
        self.get_json(&format!("/v1/coupons/{}", id), &[]).await
    }

    #[instrument(skip(self))]
    pub async fn list_subscriptions(
        &self,
        customer_id: &str,
    ) -> Result<ListResponse<Subscription>, ApiError> {
        self.get_json(
            "/v1/subscriptions",
            &[("customer_id", customer_id.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_wallets(&self, customer_id: &str) -> Result<Vec<Wallet>, ApiError> {
        self.get_json(&format!("/v1/customers/{}/wallets", customer_id), &[])
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet, ApiError> {
        self.get_json(&format!("/v1/wallets/{}", wallet_id), &[]).await
    }

    #[instrument(skip(self, request))]
    pub async fn top_up_wallet(
        &self,
        wallet_id: &str,
        request: &TopUpRequest,
    ) -> Result<Wallet, ApiError> {
        let wallet: Wallet = self
            .post_json(
                &format!("/v1/wallets/{}/top-up", wallet_id),
                request,
                &["/v1/wallets", "/v1/customers"],
            )
            .await?;

        info!(
            wallet = %wallet.id,
            credits = %request.credits_to_add,
            balance = %wallet.balance,
            "Wallet topped up"
        );
        Ok(wallet)
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(&self, customer_id: &str) -> Result<ListResponse<Invoice>, ApiError> {
        self.get_json("/v1/invoices", &[("customer_id", customer_id.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_meters(&self) -> Result<ListResponse<Meter>, ApiError> {
        self.get_json("/v1/meters", &[]).await
    }

    /// Credit grants, optionally only those attached to one plan.
    #[instrument(skip(self))]
    pub async fn list_credit_grants(
        &self,
        plan_id: Option<&str>,
    ) -> Result<ListResponse<CreditGrant>, ApiError> {
        let query: Vec<(&str, String)> = plan_id
            .map(|id| vec![("plan_ids", id.to_string())])
            .unwrap_or_default();
        self.get_json("/v1/creditgrants", &query).await
    }
}

/// Pull a readable message out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("error"))
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
