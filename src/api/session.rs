//! Persisted login session
//!
//! The access token and user record from the last successful login, kept as
//! one JSON file next to the settings.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{LoginResponse, UserResponse};
use crate::error::LanaError;
use crate::storage::{read_json_required, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_data: UserResponse,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            user_data: response.user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored session, if any
    pub fn load(&self) -> Result<Option<Session>, LanaError> {
        if !self.path.exists() {
            return Ok(None);
        }
        read_json_required(&self.path).map(Some)
    }

    pub fn save(&self, session: &Session) -> Result<(), LanaError> {
        write_json_atomic(&self.path, session)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session; returns whether one existed
    pub fn clear(&self) -> Result<bool, LanaError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}
