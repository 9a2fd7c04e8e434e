use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified token subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

// Every token-path failure collapses into this one answer; the specific
// cause (missing header, malformed, bad signature, expired) is logged
// server-side only.
fn not_authorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Not authorized"
        })),
    )
        .into_response()
}

/// Middleware that verifies bearer tokens and adds the asserted account
/// identity to request extensions
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.jwt_handler.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        not_authorized()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Failed to parse account ID from token subject: {}", e);
        not_authorized()
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            not_authorized()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid UTF-8");
        not_authorized()
    })?;

    if !auth_str.starts_with("Bearer ") {
        tracing::warn!("Authorization header is not a bearer token");
        return Err(not_authorized());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
