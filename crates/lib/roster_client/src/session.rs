//! Persistent single-token session store.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

/// Holds the current bearer token for this client process.
///
/// Single writer (the signed-in user's own actions), many readers across
/// UI components; updates are atomic and visible to every reader as soon
/// as the setter returns. The token is mirrored to disk so a restart
/// resumes the session.
pub struct SessionStore {
    token: RwLock<Option<String>>,
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the default location under the user data dir.
    pub fn open_default() -> Self {
        Self::open(default_session_path())
    }

    /// Open the store backed by `path`, loading any persisted token.
    pub fn open(path: PathBuf) -> Self {
        let token = std::fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            token: RwLock::new(token),
            path,
        }
    }

    /// The current token, if a session is active.
    pub fn current_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Replace the current token and persist it.
    pub fn set_token(&self, token: &str) {
        debug!("updating session token");
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
        // Persist inside the write lock so readers never observe a token
        // newer than the one on disk.
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), "failed to persist session token: {e}");
        }
    }

    /// Drop the current token (sign-out or detected expiry).
    pub fn clear(&self) {
        debug!("clearing session token");
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Default path for the persisted session token.
fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster")
        .join("session-token")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::open(dir.path().join("session-token"));
        (dir, store)
    }

    #[test]
    fn starts_empty_on_first_run() {
        let (_dir, store) = temp_store();
        assert_eq!(store.current_token(), None);
    }

    #[test]
    fn set_clear_lifecycle() {
        let (_dir, store) = temp_store();
        store.set_token("abc.def.ghi");
        assert_eq!(store.current_token().as_deref(), Some("abc.def.ghi"));
        store.clear();
        assert_eq!(store.current_token(), None);
    }

    #[test]
    fn token_survives_a_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session-token");

        let store = SessionStore::open(path.clone());
        store.set_token("abc.def.ghi");
        drop(store);

        let reopened = SessionStore::open(path);
        assert_eq!(reopened.current_token().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn clear_removes_the_persisted_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session-token");

        let store = SessionStore::open(path.clone());
        store.set_token("abc.def.ghi");
        store.clear();
        drop(store);

        let reopened = SessionStore::open(path);
        assert_eq!(reopened.current_token(), None);
    }
}
