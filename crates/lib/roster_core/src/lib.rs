//! # roster_core
//!
//! Core domain logic for Roster: principals and user records, token
//! issuance/verification, the role-based access policy, and the abstract
//! user-record store.

pub mod auth;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
