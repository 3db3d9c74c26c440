//! In-memory user store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::user::{NewUser, UserPatch, UserRecord};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, UserRecord>,
}

/// Process-local store backed by a `BTreeMap` keyed by id.
///
/// Ids are assigned monotonically starting at 1 and never reused.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn list(&self, username: Option<&str>) -> Vec<UserRecord> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .filter(|u| username.is_none_or(|name| u.username == name))
            .cloned()
            .collect()
    }

    async fn find(&self, id: i64) -> Option<UserRecord> {
        self.inner.read().await.users.get(&id).cloned()
    }

    async fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    async fn create(&self, new: NewUser) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::Duplicate(new.username));
        }
        inner.next_id += 1;
        let record = UserRecord {
            id: inner.next_id,
            username: new.username,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
            hashed_password: new.hashed_password,
        };
        inner.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<Option<UserRecord>, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(new_name) = &patch.username
            && inner
                .users
                .values()
                .any(|u| u.id != id && u.username == *new_name)
        {
            return Err(StoreError::Duplicate(new_name.clone()));
        }
        let Some(record) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = patch.username {
            record.username = username;
        }
        if let Some(email) = patch.email {
            record.email = email;
        }
        if let Some(first_name) = patch.first_name {
            record.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            record.last_name = Some(last_name);
        }
        if let Some(role) = patch.role {
            record.role = role;
        }
        if let Some(hash) = patch.hashed_password {
            record.hashed_password = Some(hash);
        }
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> Option<UserRecord> {
        self.inner.write().await.users.remove(&id)
    }
}
