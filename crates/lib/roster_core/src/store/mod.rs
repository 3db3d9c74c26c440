//! Abstract user-record store.
//!
//! The auth core consumes credential records only through this interface;
//! the persistence engine behind it is an external collaborator. `MemStore`
//! is the in-process implementation used by the demo server and the tests.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::user::{NewUser, UserPatch, UserRecord};

/// Store errors visible to the API layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username '{0}' is already taken")]
    Duplicate(String),
}

/// User-record persistence interface.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List users ordered by id, optionally filtered by exact username.
    async fn list(&self, username: Option<&str>) -> Vec<UserRecord>;

    async fn find(&self, id: i64) -> Option<UserRecord>;

    async fn find_by_username(&self, username: &str) -> Option<UserRecord>;

    async fn create(&self, new: NewUser) -> Result<UserRecord, StoreError>;

    /// Apply a partial update, returning `Ok(None)` when no such record.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<Option<UserRecord>, StoreError>;

    /// Remove a record, returning it when it existed.
    async fn delete(&self, id: i64) -> Option<UserRecord>;
}
