//! Request handlers.

pub mod auth;
pub mod users;

/// `GET /` — liveness banner.
pub async fn banner() -> &'static str {
    "API Server!"
}
