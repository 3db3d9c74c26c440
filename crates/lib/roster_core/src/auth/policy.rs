//! Role-based access policy.
//!
//! One declarative rule set, evaluated twice: server-side in the API layer
//! (authoritative) and client-side by the route guards (advisory). Keeping
//! a single definition here prevents the two from drifting.

use crate::models::user::{Principal, Role};

/// Operations on user accounts subject to the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListUsers,
    ReadUser,
    UpdateUser,
    DeleteUser,
    CreateUser,
}

/// Outcome of a policy evaluation. Never persisted; recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Decide whether `principal` may perform `action` on `target`.
///
/// The role check precedes the self-match check: an Admin is allowed
/// without consulting the target. Target ids are assumed syntactically
/// valid here; parse failures are a request-validation concern upstream.
pub fn decide(principal: &Principal, action: Action, target: Option<i64>) -> Decision {
    if principal.role == Role::Admin {
        return Decision::Allow;
    }
    match action {
        Action::ListUsers | Action::CreateUser => Decision::Deny,
        Action::ReadUser | Action::UpdateUser | Action::DeleteUser => {
            if target == Some(principal.id) {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }
    }
}
