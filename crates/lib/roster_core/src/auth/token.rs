//! Token issuance and verification (HS256 JWTs).

use std::path::PathBuf;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AuthError;
use crate::models::user::{Principal, Role};

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user id (standard JWT `sub` claim, stringified).
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    fn principal(&self) -> Result<Principal, AuthError> {
        // A non-numeric `sub` is structural corruption, same as a bad
        // signature.
        let id = self
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidSignature)?;
        Ok(Principal {
            id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        })
    }
}

/// Issues and verifies signed, time-bound tokens.
///
/// Holds the HS256 keys. Constructed once from the signing secret at
/// startup and shared read-only across request handlers; nothing here
/// mutates during request handling.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed token for `principal`, valid for `ttl_secs` seconds.
    ///
    /// A ttl of zero yields an already-expired token (`exp == iat`), used
    /// on the expiry test path.
    pub fn issue(&self, principal: &Principal, ttl_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: principal.id.to_string(),
            username: principal.username.clone(),
            email: principal.email.clone(),
            role: principal.role,
            iat: now,
            exp: now + ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token encode: {e}")))
    }

    /// Verify signature first, then expiry, returning the embedded
    /// principal.
    ///
    /// Any structural or signature failure is `InvalidSignature`; a good
    /// signature at or past its expiry is `Expired`. Callers at the HTTP
    /// boundary must collapse both into one indistinguishable response.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked manually below so that `exp == now` already
        // counts as expired (ttl-0 tokens must fail immediately).
        validation.validate_exp = false;
        let data = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidSignature)?;
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::Expired);
        }
        data.claims.principal()
    }

    /// Decode claims without checking the signature.
    ///
    /// For client-side route guards only, which hold no signing key. The
    /// server never trusts an unverified decode.
    pub fn decode_unverified(token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidSignature)
    }
}

/// Resolve the signing secret: env `TOKEN_SECRET` → `AUTH_SECRET` →
/// persisted file, generated on first run.
pub fn resolve_token_secret() -> String {
    if let Ok(secret) = std::env::var("TOKEN_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    // Generate and persist
    let secret_path = token_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new token signing secret");
    secret
}

/// Path to the persisted signing secret file.
fn token_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster")
        .join("token-secret")
}
