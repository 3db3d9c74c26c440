//! Roster API server binary.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use roster_api::config::ApiConfig;
use roster_api::{AppState, router};
use roster_core::auth::password::hash_password;
use roster_core::auth::token::{TokenService, resolve_token_secret};
use roster_core::models::user::{NewUser, Role};
use roster_core::store::UserStore;
use roster_core::store::memory::MemStore;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "roster_server", about = "Roster API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind: String,

    /// Lifetime of issued tokens, in seconds.
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = 86_400)]
    token_ttl_secs: i64,
}

/// Seed the demo accounts named by `ADMIN_USERNAME`/`ADMIN_PASSWORD` and
/// `USER_USERNAME`/`USER_PASSWORD`, when set. Local development only.
async fn seed_demo_accounts(store: &MemStore) -> Result<(), Box<dyn std::error::Error>> {
    let seeds = [
        ("ADMIN_USERNAME", "ADMIN_PASSWORD", Role::Admin),
        ("USER_USERNAME", "USER_PASSWORD", Role::User),
    ];
    for (user_var, pass_var, role) in seeds {
        let (Ok(username), Ok(password)) = (std::env::var(user_var), std::env::var(pass_var))
        else {
            continue;
        };
        let username = username.trim().to_lowercase();
        let hashed = hash_password(&password)?;
        store
            .create(NewUser {
                email: format!("{username}@example.com"),
                username: username.clone(),
                first_name: None,
                last_name: None,
                role,
                hashed_password: Some(hashed),
            })
            .await?;
        info!(%username, ?role, "seeded demo account");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roster_api=debug,roster_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let store = MemStore::new();
    seed_demo_accounts(&store).await?;

    let config = ApiConfig {
        bind_addr: args.bind,
        token_ttl_secs: args.token_ttl_secs,
    };

    let state = AppState {
        store: Arc::new(store),
        tokens: Arc::new(TokenService::new(resolve_token_secret().as_bytes())),
        config: config.clone(),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
