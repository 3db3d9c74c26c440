//! User account request handlers.
//!
//! Every handler runs behind [`crate::middleware::auth::require_auth`];
//! the principal arrives via request extensions. Ordering per request:
//! path-id validation (400) → policy (403) → lookup (404).

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use roster_core::auth::password::hash_password;
use roster_core::auth::policy::{Action, Decision, decide};
use roster_core::models::user::{NewUser, Role, UserPatch, UserRecord};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::validate;

/// Sanitized user shape returned by every endpoint; never carries the
/// stored hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
}

impl From<&UserRecord> for UserSummary {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            role: record.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Update response; `token` is present when the caller changed their own
/// record and received a re-issued credential.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub data: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}

/// Hash a password on a blocking thread.
async fn hash_off_thread(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hash task: {e}")))?
        .map_err(AppError::from)
}

/// `GET /api/users[?username=x]` — list accounts. Admin only.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    if decide(&principal, Action::ListUsers, None) == Decision::Deny {
        return Err(AppError::Forbidden("Not allowed to list accounts".into()));
    }
    let users = state.store.list(query.username.as_deref()).await;
    Ok(Json(DataResponse {
        data: users.iter().map(UserSummary::from).collect(),
    }))
}

/// `GET /api/users/{id}` — fetch one account. Self or Admin.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserSummary>>> {
    let id = validate::user_id(&id)?;
    if decide(&principal, Action::ReadUser, Some(id)) == Decision::Deny {
        return Err(AppError::Forbidden("Not allowed to read this account".into()));
    }
    let record = state
        .store
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No user with id {id}")))?;
    Ok(Json(DataResponse {
        data: UserSummary::from(&record),
    }))
}

/// `POST /api/users` — create an account. Admin only; password optional.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<DataResponse<UserSummary>>)> {
    if decide(&principal, Action::CreateUser, None) == Decision::Deny {
        return Err(AppError::Forbidden("Not allowed to create accounts".into()));
    }
    let body: CreateUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let username = validate::username(&body.username)?;
    let email = validate::email(&body.email)?;

    let hashed_password = match body.password {
        Some(password) => Some(hash_off_thread(password).await?),
        None => None,
    };

    let record = state
        .store
        .create(NewUser {
            username,
            email,
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role.unwrap_or(Role::User),
            hashed_password,
        })
        .await?;
    info!(user = %record.username, id = record.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserSummary::from(&record),
        }),
    ))
}

/// `PUT /api/users/{id}` — patch an account. Self or Admin.
///
/// When callers update their own record a fresh token is issued alongside
/// the data, so the identity cached client-side stays consistent with the
/// stored account.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<UpdateResponse>> {
    let id = validate::user_id(&id)?;
    if decide(&principal, Action::UpdateUser, Some(id)) == Decision::Deny {
        return Err(AppError::Forbidden(
            "Not allowed to update this account".into(),
        ));
    }
    let body: UpdateUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    // Role changes stay an admin-only concern; self-service updates must
    // not escalate privileges.
    if body.role.is_some() && principal.role != Role::Admin {
        return Err(AppError::Forbidden("Not allowed to change roles".into()));
    }

    let mut patch = UserPatch {
        first_name: body.first_name,
        last_name: body.last_name,
        role: body.role,
        ..UserPatch::default()
    };
    if let Some(raw) = body.username {
        patch.username = Some(validate::username(&raw)?);
    }
    if let Some(raw) = body.email {
        patch.email = Some(validate::email(&raw)?);
    }
    if let Some(password) = body.password {
        patch.hashed_password = Some(hash_off_thread(password).await?);
    }

    let record = state
        .store
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {id}")))?;
    info!(user = %record.username, id = record.id, "account updated");

    let token = if principal.id == id {
        Some(
            state
                .tokens
                .issue(&record.principal(), state.config.token_ttl_secs)?,
        )
    } else {
        None
    };

    Ok(Json(UpdateResponse {
        data: UserSummary::from(&record),
        token,
    }))
}

/// `DELETE /api/users/{id}` — remove an account. Self or Admin.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserSummary>>> {
    let id = validate::user_id(&id)?;
    if decide(&principal, Action::DeleteUser, Some(id)) == Decision::Deny {
        return Err(AppError::Forbidden(
            "Not allowed to delete this account".into(),
        ));
    }
    let record = state
        .store
        .delete(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No user with id {id}")))?;
    info!(user = %record.username, id = record.id, "account deleted");
    Ok(Json(DataResponse {
        data: UserSummary::from(&record),
    }))
}
