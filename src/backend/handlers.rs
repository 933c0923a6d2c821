use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    backend::AppState,
    billing::{anchor::billing_anchor, coupons::filter_eligible_at},
    client::client_ext::BillingClientExt,
    types::{
        coupon::Coupon,
        period::{BillingCycle, BillingPeriod},
    },
    utils::error::BillingError,
};

#[derive(Debug, Deserialize)]
pub struct AnchorRequest {
    /// RFC 3339 instant
    pub start: String,
    pub period: String,
    pub cycle: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnchorResponse {
    pub anchor: DateTime<Utc>,
    pub period: BillingPeriod,
    pub cycle: BillingCycle,
}

#[derive(Debug, Deserialize)]
pub struct EligibleCouponsRequest {
    pub coupons: Vec<Coupon>,
    pub currency: Option<String>,
    /// Evaluation instant, defaults to now
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EligibleCouponsResponse {
    pub coupons: Vec<Coupon>,
}

#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    pub currency: Option<String>,
}

pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "billdesk-server"
    }))
}

pub async fn next_anchor_handler(
    Json(payload): Json<AnchorRequest>,
) -> Result<Json<AnchorResponse>, BillingError> {
    let start = DateTime::parse_from_rfc3339(&payload.start)
        .map_err(|e| BillingError::InvalidTimestamp(format!("{}: {}", payload.start, e)))?
        .with_timezone(&Utc);
    let period: BillingPeriod = payload.period.parse()?;
    let cycle = match payload.cycle.as_deref() {
        Some(c) => c.parse()?,
        None => BillingCycle::Calendar,
    };

    let anchor = billing_anchor(start, period, cycle);

    info!(%start, %period, ?cycle, %anchor, "Computed billing anchor");

    Ok(Json(AnchorResponse {
        anchor,
        period,
        cycle,
    }))
}

pub async fn preview_eligible_coupons_handler(
    Json(payload): Json<EligibleCouponsRequest>,
) -> Json<EligibleCouponsResponse> {
    let now = payload.at.unwrap_or_else(Utc::now);
    let coupons = filter_eligible_at(&payload.coupons, payload.currency.as_deref(), now);

    Json(EligibleCouponsResponse { coupons })
}

pub async fn eligible_coupons_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<EligibleCouponsResponse>, BillingError> {
    let coupons = state
        .client
        .eligible_coupons(query.currency.as_deref())
        .await?;

    Ok(Json(EligibleCouponsResponse { coupons }))
}
