//! Integration tests for `POST /authenticate` — build the router over an
//! in-memory store and drive it with oneshot requests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use roster_api::config::ApiConfig;
use roster_api::{AppState, router};
use roster_core::auth::password::hash_password;
use roster_core::auth::token::TokenService;
use roster_core::models::user::{NewUser, Role};
use roster_core::store::UserStore;
use roster_core::store::memory::MemStore;

const SECRET: &[u8] = b"test-secret";

async fn setup() -> (Router, Arc<TokenService>) {
    let store = MemStore::new();
    store
        .create(NewUser {
            username: "user1".into(),
            email: "user1@test.io".into(),
            first_name: None,
            last_name: None,
            role: Role::User,
            hashed_password: Some(hash_password("user1").expect("hash")),
        })
        .await
        .expect("seed user");

    let tokens = Arc::new(TokenService::new(SECRET));
    let state = AppState {
        store: Arc::new(store),
        tokens: tokens.clone(),
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            token_ttl_secs: 3600,
        },
    };
    (router(state), tokens)
}

fn authenticate_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/authenticate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn missing_username_is_400() {
    let (app, _) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({"password": "user1"})))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_password_is_400() {
    let (app, _) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({"username": "user1"})))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_username_is_403() {
    let (app, _) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({
            "username": "wrong-username",
            "password": "user1",
        })))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wrong_password_is_403() {
    let (app, _) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({
            "username": "user1",
            "password": "wrong-password",
        })))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wrong_username_and_wrong_password_responses_match() {
    // The two rejections must be indistinguishable to the caller.
    let (app, _) = setup().await;
    let unknown = app
        .clone()
        .oneshot(authenticate_request(serde_json::json!({
            "username": "wrong-username",
            "password": "user1",
        })))
        .await
        .expect("response");
    let wrong_pw = app
        .oneshot(authenticate_request(serde_json::json!({
            "username": "user1",
            "password": "wrong-password",
        })))
        .await
        .expect("response");
    assert_eq!(unknown.status(), wrong_pw.status());
    assert_eq!(body_json(unknown).await, body_json(wrong_pw).await);
}

#[tokio::test]
async fn successful_authentication_returns_a_verifiable_token() {
    let (app, tokens) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({
            "username": "user1",
            "password": "user1",
        })))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["username"], "user1");
    assert!(
        json["data"].get("hashedPassword").is_none(),
        "payload must not carry the stored hash"
    );

    let token = json["token"].as_str().expect("token is string");
    let principal = tokens.verify(token).expect("token verifies");
    assert_eq!(principal.username, "user1");
    assert_eq!(principal.role, Role::User);
}

#[tokio::test]
async fn username_is_normalized_before_lookup() {
    let (app, _) = setup().await;
    let resp = app
        .oneshot(authenticate_request(serde_json::json!({
            "username": "  USER1 ",
            "password": "user1",
        })))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
}
