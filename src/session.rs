//! Demo identity: any non-empty username logs in

use chrono::Utc;
use thiserror::Error;

use crate::models::Session;
use crate::store::{load_json, save_json, KeyValueStore, StoreError};

pub const SESSION_KEY: &str = "session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Username must not be empty")]
    EmptyUsername,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validation errors of the login form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error("Please enter both username and password")]
    MissingCredentials,
}

/// No credential check happens, both fields only have to be filled in
pub fn validate_login(username: &str, password: &str) -> Result<(), LoginError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(LoginError::MissingCredentials);
    }
    Ok(())
}

#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn load(store: S) -> Self {
        let current: Option<Session> = load_json(&store, SESSION_KEY);
        if let Some(session) = &current {
            log::info!("Restored session of '{}'", session.username);
        }
        Self { store, current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn login(&mut self, username: &str) -> Result<&Session, SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::EmptyUsername);
        }
        let session = Session {
            username: username.to_string(),
            login_timestamp: Utc::now(),
        };
        save_json(&mut self.store, SESSION_KEY, &session)?;
        log::info!("Logged in as '{}'", session.username);
        Ok(self.current.insert(session))
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(session) = self.current.take() {
            log::info!("Logged out '{}'", session.username);
        }
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login("", "secret"), Err(LoginError::MissingCredentials));
        assert_eq!(validate_login("neo", "  "), Err(LoginError::MissingCredentials));
        assert_eq!(validate_login("neo", "secret"), Ok(()));
        assert_eq!(
            LoginError::MissingCredentials.to_string(),
            "Please enter both username and password"
        );
    }

    #[test]
    fn test_login_rejects_empty_username() {
        let mut sessions = SessionStore::load(MemoryStore::default());
        assert!(matches!(sessions.login("   "), Err(SessionError::EmptyUsername)));
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_login_and_logout() {
        let mut sessions = SessionStore::load(MemoryStore::default());
        let session = sessions.login(" trinity ").unwrap();
        assert_eq!(session.username, "trinity");
        assert!(sessions.is_logged_in());
        sessions.logout().unwrap();
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_session_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let login_timestamp = {
            let mut sessions = SessionStore::load(FileStore::new(temp_dir.path()));
            sessions.login("morpheus").unwrap().login_timestamp
        };
        let sessions = SessionStore::load(FileStore::new(temp_dir.path()));
        let session = sessions.current().unwrap();
        assert_eq!(session.username, "morpheus");
        assert_eq!(session.login_timestamp, login_timestamp);
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut sessions = SessionStore::load(FileStore::new(temp_dir.path()));
        sessions.login("morpheus").unwrap();
        sessions.logout().unwrap();
        let reloaded = SessionStore::load(FileStore::new(temp_dir.path()));
        assert!(reloaded.current().is_none());
    }

    #[test]
    fn test_unparsable_session_is_absent() {
        let mut store = MemoryStore::default();
        store.set(SESSION_KEY, "{\"username\": 42}").unwrap();
        let sessions = SessionStore::load(store);
        assert!(!sessions.is_logged_in());
    }
}
