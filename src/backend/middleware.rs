use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::backend::AppState;

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    None,
    ApiKey,      // require X-Api-Key header
    BearerToken, // require Authorization: Bearer <token>
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let expected = state.cfg.auth_secret.as_deref().unwrap_or("");

    let provided = match state.cfg.auth_mode {
        AuthMode::None => return next.run(req).await,
        AuthMode::ApiKey => req
            .headers()
            .get("X-Api-Key")
            .and_then(|v| v.to_str().ok()),
        AuthMode::BearerToken => req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ")),
    };

    let authorized = matches!(provided, Some(key) if !expected.is_empty() && key == expected);

    if authorized {
        next.run(req).await
    } else {
        warn!(path = %req.uri().path(), "Rejected unauthenticated request");
        deny_response(StatusCode::UNAUTHORIZED, "invalid or missing credentials")
    }
}

pub fn deny_response(status: StatusCode, reason: &str) -> Response {
    let body = Json(serde_json::json!({
        "error": reason,
        "status": status.as_u16(),
    }));
    (status, body).into_response()
}
