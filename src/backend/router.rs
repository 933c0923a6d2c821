use std::{sync::Arc, time::Duration};

use axum::{Router, middleware, routing};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    backend::{
        AppState,
        handlers::{
            eligible_coupons_handler, health_handler, next_anchor_handler,
            preview_eligible_coupons_handler,
        },
        middleware::auth_middleware,
    },
    utils::metrics::metrics_handler,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/anchors/next", routing::post(next_anchor_handler))
        .route(
            "/coupons/eligible",
            routing::get(eligible_coupons_handler).post(preview_eligible_coupons_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/healthz", routing::get(health_handler))
        .route("/metrics", routing::get(metrics_handler))
        .nest("/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.cfg.request_timeout_ms,
        )))
        .with_state(state)
}
