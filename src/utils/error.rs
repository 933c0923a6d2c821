use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;

use crate::client::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Unsupported billing period: {0}")]
    UnsupportedPeriod(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid conversion rate: {0} (must be greater than zero)")]
    InvalidConversionRate(Decimal),
    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Billing API error: {0}")]
    Api(#[from] ApiError),
}

impl BillingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BillingError::UnsupportedPeriod(_)
            | BillingError::InvalidTimestamp(_)
            | BillingError::InvalidConversionRate(_)
            | BillingError::AmountOverflow(_)
            | BillingError::Validation(_) => StatusCode::BAD_REQUEST,
            BillingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BillingError::Api(ApiError::Status { status: 404, .. }) => StatusCode::NOT_FOUND,
            BillingError::Api(ApiError::Status { status: 401 | 403, .. }) => StatusCode::BAD_GATEWAY,
            BillingError::Api(e) if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            BillingError::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
