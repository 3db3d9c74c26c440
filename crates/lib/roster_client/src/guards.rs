//! Client route guards — advisory mirrors of the server policy.
//!
//! Re-derived on every navigation from an unverified decode of the stored
//! token; no network round-trip is needed to gate the UI. The client holds
//! no signing key, so a forged token can fool a guard — which is why the
//! server middleware stays authoritative.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::debug;

use roster_core::auth::token::{TokenClaims, TokenService};
use roster_core::models::user::Role;

use crate::session::SessionStore;

/// Where a navigation should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view.
    Render,
    /// No usable session; go to the sign-in view.
    RedirectToSignIn,
    /// Signed in, but the view needs the Admin role.
    NotAuthorized,
}

fn current_claims(session: &SessionStore) -> Option<TokenClaims> {
    let token = session.current_token()?;
    TokenService::decode_unverified(&token).ok()
}

/// True when a token is present, decodable, and not yet expired.
pub fn is_authenticated(session: &SessionStore) -> bool {
    match current_claims(session) {
        Some(claims) => Utc::now().timestamp() < claims.exp,
        None => false,
    }
}

/// True when a token is present but at or past its expiry.
pub fn is_token_expired(session: &SessionStore) -> bool {
    matches!(current_claims(session), Some(c) if Utc::now().timestamp() >= c.exp)
}

/// True when the current token carries the Admin role.
pub fn is_admin(session: &SessionStore) -> bool {
    matches!(current_claims(session), Some(c) if c.role == Role::Admin)
}

/// Gate for views that require a signed-in user.
pub fn guard_protected(session: &SessionStore) -> RouteDecision {
    if is_authenticated(session) {
        RouteDecision::Render
    } else {
        RouteDecision::RedirectToSignIn
    }
}

/// Gate for admin-only views, evaluated after the protected gate.
pub fn guard_admin_only(session: &SessionStore) -> RouteDecision {
    if !is_authenticated(session) {
        return RouteDecision::RedirectToSignIn;
    }
    if is_admin(session) {
        RouteDecision::Render
    } else {
        RouteDecision::NotAuthorized
    }
}

/// Outcome of a focus-driven expiry check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Session still usable.
    Active,
    /// Token expired; the session was cleared and a fresh sign-in is
    /// required.
    Ended,
}

/// Expiry check driven by window-focus events.
///
/// Focus events are a polling signal with no delivery guarantee, so the
/// watcher carries an explicit staleness bound: once more than `max_gap`
/// passes without a check, the session is no longer presumed valid and
/// callers must run [`FocusWatcher::on_focus`] before trusting it.
pub struct FocusWatcher {
    last_check: Mutex<Instant>,
    max_gap: Duration,
}

impl FocusWatcher {
    /// Default staleness bound between checks.
    pub const DEFAULT_MAX_GAP: Duration = Duration::from_secs(300);

    pub fn new(max_gap: Duration) -> Self {
        Self {
            last_check: Mutex::new(Instant::now()),
            max_gap,
        }
    }

    /// Run the expiry check for a focus event. Clears the session when the
    /// token has expired.
    pub fn on_focus(&self, session: &SessionStore) -> FocusOutcome {
        *self.last_check.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
        if is_token_expired(session) {
            debug!("token expired; ending session");
            session.clear();
            return FocusOutcome::Ended;
        }
        FocusOutcome::Active
    }

    /// Whether the last check is recent enough to trust without another
    /// [`FocusWatcher::on_focus`] pass.
    pub fn is_fresh(&self) -> bool {
        self.last_check
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed()
            <= self.max_gap
    }
}

impl Default for FocusWatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_GAP)
    }
}
