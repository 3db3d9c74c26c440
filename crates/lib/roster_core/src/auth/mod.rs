//! Authentication and authorization logic.
//!
//! Password verification, token issuance/verification, and the role-based
//! access policy shared by the server (authoritative) and the client
//! (advisory route guards).

pub mod password;
pub mod policy;
pub mod token;

use thiserror::Error;

/// Authentication errors.
///
/// `InvalidSignature` and `Expired` must surface identically at the HTTP
/// boundary; the distinction exists for tests and logging only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token signature or structure is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Internal error: {0}")]
    Internal(String),
}
