//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use roster_core::auth::password::verify_password;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::users::UserSummary;
use crate::validate;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub data: UserSummary,
    pub token: String,
}

/// `POST /authenticate` — verify credentials and issue a token.
///
/// Wrong username and wrong password are indistinguishable to the caller:
/// both are the same 403. Accounts without a stored hash cannot sign in.
pub async fn authenticate_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<AuthenticateResponse>> {
    let body: AuthenticateRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let username = validate::username(&body.username)?;

    let Some(record) = state.store.find_by_username(&username).await else {
        debug!(%username, "authentication rejected: unknown username");
        return Err(AppError::from(
            roster_core::auth::AuthError::InvalidCredentials,
        ));
    };
    let Some(hash) = record.hashed_password.clone() else {
        debug!(%username, "authentication rejected: account has no password");
        return Err(AppError::from(
            roster_core::auth::AuthError::InvalidCredentials,
        ));
    };

    // bcrypt is the dominant cost of this path; run it off the async
    // executor so it cannot stall other requests.
    let password = body.password;
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verifier task: {e}")))?;
    if !verified {
        debug!(%username, "authentication rejected: wrong password");
        return Err(AppError::from(
            roster_core::auth::AuthError::InvalidCredentials,
        ));
    }

    let principal = record.principal();
    let token = state.tokens.issue(&principal, state.config.token_ttl_secs)?;
    info!(user = %principal.username, id = principal.id, "authenticated");

    Ok(Json(AuthenticateResponse {
        data: UserSummary::from(&record),
        token,
    }))
}
