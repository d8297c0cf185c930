//! Client-side session: who is logged in, and which token to send.
//!
//! The token and user are persisted under the keys `"token"` and `"user"` so a
//! restarted client picks the session back up.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::ClientError;
use crate::models::AccountView;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const TASKS_KEY: &str = "tasks";

/// String key/value storage that survives restarts.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&mut self, key: &str) -> Result<(), ClientError>;
}

/// Non-persistent storage, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Opens `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| ClientError::Storage(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(ClientError::Storage(format!("{}: {}", path.display(), e))),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), ClientError> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String, user: AccountView },
}

/// The single source of truth for "is someone logged in" on the client.
#[derive(Debug)]
pub struct SessionContext<S: SessionStorage> {
    storage: S,
    state: SessionState,
}

impl<S: SessionStorage> SessionContext<S> {
    /// Rehydrates from `storage`. Both keys must be present and the user must parse.
    pub fn new(storage: S) -> Self {
        let token = storage.get(TOKEN_KEY);
        let user = storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<AccountView>(&raw).ok());

        let state = match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                log::debug!("session restored for {}", user.useremail);
                SessionState::Authenticated { token, user }
            }
            _ => SessionState::Anonymous,
        };
        Self { storage, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// The token to attach as `Authorization: Bearer`, if any.
    pub fn bearer(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&AccountView> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }

    /// Enters (or refreshes) the authenticated state and persists it.
    pub fn login(&mut self, token: String, user: AccountView) -> Result<(), ClientError> {
        let raw_user =
            serde_json::to_string(&user).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(TOKEN_KEY, &token)?;
        self.storage.set(USER_KEY, &raw_user)?;
        self.state = SessionState::Authenticated { token, user };
        Ok(())
    }

    /// Returns to the anonymous state and clears everything persisted for the session.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.state = SessionState::Anonymous;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        self.storage.remove(TASKS_KEY)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
