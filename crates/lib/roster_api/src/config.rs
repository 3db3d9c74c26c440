//! API server configuration.

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default          |
    /// |------------------|------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3100` |
    /// | `TOKEN_TTL_SECS` | `86400` (1 day)  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            token_ttl_secs: std::env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
        }
    }
}
