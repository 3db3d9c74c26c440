//! # roster_api
//!
//! HTTP API library for Roster: router, auth middleware, and the user
//! account handlers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use roster_core::auth::token::TokenService;
use roster_core::store::UserStore;

use crate::config::ApiConfig;
use crate::handlers::{auth, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User-record store (persistence is an external collaborator).
    pub store: Arc<dyn UserStore>,
    /// Token service holding the signing key, built once at startup.
    pub tokens: Arc<TokenService>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/", get(handlers::banner))
        .route("/authenticate", post(auth::authenticate_handler));

    // Protected routes (require a verified bearer token)
    let protected = Router::new()
        .route(
            "/api/users",
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
