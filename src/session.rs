//! Persisted session — bearer token plus the signed-in user/role record.
//!
//! Written on login, cleared on logout; those are the only writers. Every
//! reader re-reads the file on each call, so a token refreshed by a second
//! console window is picked up without restart ("always fresh" semantics).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{Role, StatusCode};

/// Signed-in user as returned by the login call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rolId", alias = "rolID")]
    pub role: Role,
    #[serde(rename = "estado", default)]
    pub status: StatusCode,
}

/// Token + user payload, persisted verbatim from the login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "usuario", alias = "user")]
    pub user: SessionUser,
}

/// Errors from session persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Session record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted session store.
///
/// Login and logout are the only writers; the transport reads the token
/// through [`SessionStore::token`] at call time, never caching it.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location under the app data directory.
    pub fn open_default() -> Self {
        Self::at(config::session_file())
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session (login is the sole caller).
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        tracing::debug!(user = %session.user.username, "session persisted");
        Ok(())
    }

    /// Remove the persisted session (logout). Clearing an absent session
    /// is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-read the persisted session. Missing file yields `None`; a corrupt
    /// file yields `None` with a warn log — a broken session file must act
    /// like a logged-out console, not a crash.
    pub fn current(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt session file ignored");
                None
            }
        }
    }

    /// Fresh token read, used by the transport on every call.
    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn role(&self) -> Option<Role> {
        self.current().map(|s| s.user.role)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }
}
