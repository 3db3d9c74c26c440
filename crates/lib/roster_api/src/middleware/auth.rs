//! Authentication middleware — bearer token extraction and verification.
//!
//! Per-request gate in front of every `/api` route: no header → 401,
//! unverifiable token (expired or forged, deliberately indistinguishable)
//! → 401, verified token → principal attached to the request extensions
//! for the handlers and the policy checks downstream.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use roster_core::models::user::Principal;

use crate::AppState;
use crate::error::AppError;

/// Verified principal stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// Axum middleware: extracts `Authorization: bearer <token>`, verifies it,
/// and injects the [`Principal`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".into()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized("Invalid authorization scheme".into()));
    }

    // Verification failures all map to the same 401; the reason is logged
    // server-side only.
    let principal = state.tokens.verify(token.trim()).map_err(|e| {
        debug!("token rejected: {e}");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(AuthenticatedUser(principal));

    Ok(next.run(request).await)
}
