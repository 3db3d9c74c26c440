//! User domain models.
//!
//! These are internal domain models; the API layer owns the sanitized
//! camelCase shapes it puts on the wire.

use serde::{Deserialize, Serialize};

/// Account role. Admins may act on any account; Users only on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

/// Identity asserted by a verified token.
///
/// A point-in-time snapshot: later changes to the underlying account do
/// not retroactively alter principals decoded from tokens already issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Stored user record, including the credential hash.
///
/// The hash never leaves the store layer unsanitized; response shapes are
/// built from [`UserRecord::principal`] or the API's summary type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub hashed_password: Option<String>,
}

impl UserRecord {
    /// The principal this record would assert if a token were issued now.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Attributes for creating a user. Accounts without a password exist but
/// cannot sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub hashed_password: Option<String>,
}

/// Partial update of a user record; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub hashed_password: Option<String>,
}
